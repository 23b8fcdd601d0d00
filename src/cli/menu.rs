//! Interactive menu
//!
//! The primary surface of the tool: a text menu for adding secrets, viewing
//! them decrypted, viewing the masked summary, and deleting entries.

use std::io::{self, Write};

use crate::display::{format_revealed_list, format_secret_list};
use crate::error::{VaultError, VaultResult};
use crate::models::EndDate;
use crate::services::{AddOutcome, SecretService};
use crate::storage::Storage;

const BANNER_WIDTH: usize = 70;

/// Run the interactive menu loop until the user exits
pub fn run_menu(storage: &Storage) -> VaultResult<()> {
    loop {
        print_banner("SECRET VAULT - Main Menu");
        println!();
        println!("1. Add or update secrets");
        println!("2. View stored secrets (decrypted)");
        println!("3. View summary (encrypted)");
        println!("4. Delete a secret");
        println!("5. Exit");
        println!();

        let choice = prompt_string("Select an option: ")?;

        match choice.as_str() {
            "1" => add_session(storage)?,
            "2" => view_secrets(storage)?,
            "3" => view_summary(storage)?,
            "4" => delete_secret(storage)?,
            "5" => {
                println!("\nGoodbye!");
                break;
            }
            _ => println!("\nInvalid option"),
        }
    }

    Ok(())
}

/// Interactive add/update session
///
/// Asks for the password once, then loops over name/value/end-date entry
/// until an empty name ends the session.
fn add_session(storage: &Storage) -> VaultResult<()> {
    let service = SecretService::new(storage);

    print_banner("SECRET VAULT - Add Secrets");
    println!();
    println!("Step 1: security setup");
    let password = prompt_password("Encryption password: ")?;

    if password.is_empty() {
        println!("The encryption password cannot be empty");
        return Ok(());
    }

    println!();
    println!("Step 2: add secrets");
    println!("Press Enter on 'Key name' to finish");
    println!();

    let mut added = 0usize;

    loop {
        let name = prompt_string("Key name        : ")?;
        if name.is_empty() {
            if added == 0 {
                println!("\nNo secrets added.");
            }
            break;
        }

        // Value is required
        let value = loop {
            let value = prompt_string("Key content     : ")?;
            if !value.is_empty() {
                break value;
            }
            println!("This field cannot be empty");
            println!();
        };

        // Expiration date is optional but must be valid when given
        let end_date = loop {
            let raw = prompt_string("End date        : ")?;
            match EndDate::parse(&raw) {
                Ok(end_date) => break end_date,
                Err(_) => {
                    println!("Invalid format. Use dd-mm-yyyy (example: 31-12-2025)");
                    println!("Or press Enter to skip");
                }
            }
        };

        match service.add_or_update(&name, &value, end_date, &password) {
            Ok(AddOutcome::Created) => println!("Secret '{}' created", name),
            Ok(AddOutcome::Updated) => println!("Secret '{}' updated", name),
            Err(e) => println!("Error: {}", e),
        }

        added += 1;
        println!();
    }

    if added > 0 {
        println!();
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!("{} secret(s) added or updated", added);
        println!("{}", "=".repeat(BANNER_WIDTH));

        view_summary(storage)?;
    }

    Ok(())
}

/// View all secrets decrypted
fn view_secrets(storage: &Storage) -> VaultResult<()> {
    let service = SecretService::new(storage);

    print_banner("SECRET VAULT - Stored Secrets");

    if service.count()? == 0 {
        println!("\nNo secrets stored. Add some first.");
        return Ok(());
    }

    println!();
    let password = prompt_password("Decryption password: ")?;

    let views = service.reveal_all(&password)?;
    print!("{}", format_revealed_list(&views));

    Ok(())
}

/// View the masked summary
fn view_summary(storage: &Storage) -> VaultResult<()> {
    let service = SecretService::new(storage);

    print_banner("SECRET VAULT - Summary");

    let summaries = service.summaries()?;
    let today = chrono::Local::now().date_naive();
    print!("{}", format_secret_list(&summaries, today));

    Ok(())
}

/// Delete a single secret by name
fn delete_secret(storage: &Storage) -> VaultResult<()> {
    let service = SecretService::new(storage);

    print_banner("SECRET VAULT - Delete Secret");
    println!();

    let name = prompt_string("Key name to delete (Enter to cancel): ")?;
    if name.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    match service.delete(&name) {
        Ok(()) => println!("Secret '{}' deleted", name),
        Err(e) if e.is_not_found() => println!("Secret '{}' does not exist", name),
        Err(e) => return Err(e),
    }

    Ok(())
}

fn print_banner(title: &str) {
    println!();
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("{:^width$}", title, width = BANNER_WIDTH);
    println!("{}", "=".repeat(BANNER_WIDTH));
}

/// Prompt for a string input
fn prompt_string(prompt: &str) -> VaultResult<String> {
    print!("{}", prompt);
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
