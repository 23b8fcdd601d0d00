//! Secret repository for JSON storage
//!
//! Manages loading and saving the encrypted secret records. The vault file
//! is a JSON object mapping secret names directly to records, so files
//! written by earlier versions of the tool load unchanged.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::VaultError;
use crate::models::{EndDate, Secret};

use super::file_io::{read_json, write_json_atomic};

/// Repository for secret persistence
pub struct SecretRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, Secret>>,
}

impl SecretRepository {
    /// Create a new secret repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load secrets from disk
    ///
    /// A missing or malformed vault file yields an empty store; the file on
    /// disk is never modified by a load.
    pub fn load(&self) -> Result<(), VaultError> {
        let file_data: BTreeMap<String, Secret> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data;
        Ok(())
    }

    /// Save secrets to disk
    pub fn save(&self) -> Result<(), VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Get a secret by name
    pub fn get(&self, name: &str) -> Result<Option<Secret>, VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(name).cloned())
    }

    /// Insert or update a secret
    ///
    /// An existing record keeps its original start date; only the payload
    /// and end date are replaced. Returns true if the secret was created,
    /// false if an existing one was updated.
    pub fn upsert(
        &self,
        name: &str,
        value: String,
        end_date: EndDate,
    ) -> Result<bool, VaultError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.get_mut(name) {
            Some(secret) => {
                secret.update(value, end_date);
                Ok(false)
            }
            None => {
                data.insert(name.to_string(), Secret::new(value, end_date));
                Ok(true)
            }
        }
    }

    /// Delete a secret
    pub fn delete(&self, name: &str) -> Result<bool, VaultError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(name).is_some())
    }

    /// List all secret names in sorted order
    pub fn names(&self) -> Result<Vec<String>, VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.keys().cloned().collect())
    }

    /// Get all records with their names, in name order
    pub fn entries(&self) -> Result<Vec<(String, Secret)>, VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    /// Check if a secret exists
    pub fn exists(&self, name: &str) -> Result<bool, VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(name))
    }

    /// Count stored secrets
    pub fn count(&self) -> Result<usize, VaultError> {
        let data = self
            .data
            .read()
            .map_err(|e| VaultError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SecretRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.json");
        let repo = SecretRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let created = repo
            .upsert("API_KEY", "payload".into(), EndDate::NoSetDate)
            .unwrap();
        assert!(created);

        let secret = repo.get("API_KEY").unwrap().unwrap();
        assert_eq!(secret.value, "payload");
    }

    #[test]
    fn test_upsert_existing_preserves_start_date() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert("API_KEY", "old".into(), EndDate::NoSetDate)
            .unwrap();
        let original = repo.get("API_KEY").unwrap().unwrap();

        let created = repo
            .upsert(
                "API_KEY",
                "new".into(),
                EndDate::parse("31-12-2025").unwrap(),
            )
            .unwrap();
        assert!(!created);

        let updated = repo.get("API_KEY").unwrap().unwrap();
        assert_eq!(updated.value, "new");
        assert!(updated.end_date.is_set());
        assert_eq!(updated.start_date, original.start_date);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.load().unwrap();
        repo.upsert("TOKEN", "payload".into(), EndDate::NoSetDate)
            .unwrap();
        repo.save().unwrap();

        // Create new repo and load
        let path = temp_dir.path().join("secrets.json");
        let repo2 = SecretRepository::new(path);
        repo2.load().unwrap();

        let secret = repo2.get("TOKEN").unwrap().unwrap();
        assert_eq!(secret.value, "payload");
    }

    #[test]
    fn test_vault_file_is_a_name_keyed_object() {
        let (temp_dir, repo) = create_test_repo();

        repo.load().unwrap();
        repo.upsert("TOKEN", "payload".into(), EndDate::NoSetDate)
            .unwrap();
        repo.save().unwrap();

        let raw = std::fs::read_to_string(temp_dir.path().join("secrets.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(json.is_object());
        assert_eq!(json["TOKEN"]["value"], "payload");
        assert_eq!(json["TOKEN"]["end_date"], "No set date");
    }

    #[test]
    fn test_malformed_vault_file_loads_empty() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("secrets.json");

        std::fs::write(&path, "{{{ definitely not json").unwrap();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);

        // The malformed file stays on disk untouched
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "{{{ definitely not json");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert("TOKEN", "payload".into(), EndDate::NoSetDate)
            .unwrap();
        assert!(repo.exists("TOKEN").unwrap());

        assert!(repo.delete("TOKEN").unwrap());
        assert!(!repo.exists("TOKEN").unwrap());

        // Deleting again reports nothing removed
        assert!(!repo.delete("TOKEN").unwrap());
    }

    #[test]
    fn test_names_are_sorted() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert("ZULU", "z".into(), EndDate::NoSetDate).unwrap();
        repo.upsert("ALPHA", "a".into(), EndDate::NoSetDate)
            .unwrap();
        repo.upsert("MIKE", "m".into(), EndDate::NoSetDate).unwrap();

        assert_eq!(repo.names().unwrap(), vec!["ALPHA", "MIKE", "ZULU"]);
    }
}
