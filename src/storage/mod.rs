//! Storage layer for the secret vault
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod secrets;

pub use file_io::{json_file_valid, read_json, write_json_atomic};
pub use secrets::SecretRepository;

use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::error::VaultError;

/// Main storage coordinator
pub struct Storage {
    paths: VaultPaths,
    vault_file: std::path::PathBuf,
    pub secrets: SecretRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: VaultPaths, settings: &Settings) -> Result<Self, VaultError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        let vault_file = paths.vault_file(&settings.vault_file);
        Ok(Self {
            secrets: SecretRepository::new(vault_file.clone()),
            vault_file,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// Get the resolved vault file path
    pub fn vault_file(&self) -> &std::path::Path {
        &self.vault_file
    }

    /// Load all data from disk
    pub fn load(&mut self) -> Result<(), VaultError> {
        self.secrets.load()
    }

    /// Save all data to disk
    pub fn save(&self) -> Result<(), VaultError> {
        self.secrets.save()
    }
}
