//! CLI command handlers
//!
//! This module contains the implementation of CLI commands and the
//! interactive menu, bridging argument parsing with the service layer.

pub mod menu;
pub mod secret;

pub use menu::run_menu;
pub use secret::{handle_secret_command, SecretCommands};
