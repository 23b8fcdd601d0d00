//! Secret CLI commands
//!
//! Implements the non-interactive command surface for secret management.

use clap::Subcommand;

use crate::display::{format_revealed_list, format_secret_details, format_secret_list};
use crate::error::{VaultError, VaultResult};
use crate::models::EndDate;
use crate::services::{AddOutcome, SecretService};
use crate::storage::Storage;

/// Secret subcommands
#[derive(Subcommand)]
pub enum SecretCommands {
    /// Add a new secret or update an existing one
    Add {
        /// Secret name (e.g., "GITHUB_TOKEN")
        name: String,
        /// Secret value; prompted for if omitted
        #[arg(short, long)]
        value: Option<String>,
        /// Expiration date (dd-mm-yyyy); no expiry if omitted
        #[arg(short, long)]
        end_date: Option<String>,
    },
    /// Decrypt and show secrets
    Show {
        /// Secret name; shows every secret if omitted
        name: Option<String>,
    },
    /// List stored secrets without decrypting
    #[command(alias = "ls")]
    List,
    /// Delete a secret
    #[command(alias = "rm")]
    Delete {
        /// Secret name
        name: String,
    },
}

/// Handle a secret command
pub fn handle_secret_command(storage: &Storage, cmd: SecretCommands) -> VaultResult<()> {
    let service = SecretService::new(storage);

    match cmd {
        SecretCommands::Add {
            name,
            value,
            end_date,
        } => {
            let end_date = match end_date {
                Some(raw) => EndDate::parse(&raw)?,
                None => EndDate::NoSetDate,
            };

            let value = match value {
                Some(v) => v,
                None => prompt_value()?,
            };

            let password = prompt_password("Encryption password: ")?;
            let outcome = service.add_or_update(&name, &value, end_date, &password)?;

            match outcome {
                AddOutcome::Created => println!("Created secret '{}'", name),
                AddOutcome::Updated => println!("Updated secret '{}'", name),
            }
        }

        SecretCommands::Show { name } => {
            let password = prompt_password("Decryption password: ")?;

            match name {
                Some(name) => {
                    let view = service.reveal(&name, &password)?;
                    print!("{}", format_secret_details(&view));
                }
                None => {
                    let views = service.reveal_all(&password)?;
                    print!("{}", format_revealed_list(&views));
                }
            }
        }

        SecretCommands::List => {
            let summaries = service.summaries()?;
            let today = chrono::Local::now().date_naive();
            print!("{}", format_secret_list(&summaries, today));
        }

        SecretCommands::Delete { name } => {
            service.delete(&name)?;
            println!("Deleted secret '{}'", name);
        }
    }

    Ok(())
}

/// Prompt for the secret value on stdin
fn prompt_value() -> VaultResult<String> {
    use std::io::{self, Write};

    print!("Secret value: ");
    io::stdout()
        .flush()
        .map_err(|e| VaultError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| VaultError::Io(e.to_string()))?;

    Ok(input.trim().to_string())
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> VaultResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| VaultError::Encryption(format!("Failed to read password: {}", e)))
}
