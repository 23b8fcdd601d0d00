use anyhow::Result;
use clap::{Parser, Subcommand};

use secret_vault::cli::{handle_secret_command, run_menu, SecretCommands};
use secret_vault::config::{paths::VaultPaths, settings::Settings};
use secret_vault::storage::{json_file_valid, Storage};

#[derive(Parser)]
#[command(
    name = "secret-vault",
    version,
    about = "Local encrypted secret manager",
    long_about = "secret-vault is a small local manager for API keys and tokens. \
                  Values are encrypted with a password-derived key before they \
                  are written to disk; run it without arguments for the \
                  interactive menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu
    Menu,

    #[command(flatten)]
    Secret(SecretCommands),

    /// Initialize the vault directories and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = VaultPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), &settings)?;
    storage.load()?;

    match cli.command {
        Some(Commands::Menu) | None => {
            run_menu(&storage)?;
        }
        Some(Commands::Secret(cmd)) => {
            handle_secret_command(&storage, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing secret-vault at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            if !storage.vault_file().exists() {
                storage.save()?;
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'secret-vault' for the interactive menu.");
            println!("Run 'secret-vault add <NAME>' to store a secret.");
        }
        Some(Commands::Config) => {
            let vault_file = storage.vault_file();
            let vault_status = if !vault_file.exists() {
                "missing (created on first save)"
            } else if json_file_valid(vault_file) {
                "ok"
            } else {
                "not valid JSON"
            };

            println!("secret-vault Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Vault file:       {} [{}]", vault_file.display(), vault_status);
            println!();
            println!("Settings:");
            println!("  Schema version: {}", settings.schema_version);
            println!("  Vault file name: {}", settings.vault_file);
        }
    }

    Ok(())
}
