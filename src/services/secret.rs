//! Secret service
//!
//! Provides business logic for secret management: validation, encryption of
//! values on the way in, decryption on the way out, and metadata listings.

use chrono::NaiveDateTime;

use crate::crypto::{decrypt_value, encrypt_value};
use crate::error::{VaultError, VaultResult};
use crate::models::EndDate;
use crate::storage::Storage;

/// Service for secret management
pub struct SecretService<'a> {
    storage: &'a Storage,
}

/// Outcome of an add-or-update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new secret was created
    Created,
    /// An existing secret was updated in place
    Updated,
}

/// A secret with its decrypted value
#[derive(Debug, Clone)]
pub struct SecretView {
    pub name: String,
    /// Decrypted value; None when the payload could not be decrypted
    pub value: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: EndDate,
}

/// Metadata-only view of a secret, no password required
#[derive(Debug, Clone)]
pub struct SecretSummary {
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: EndDate,
}

impl<'a> SecretService<'a> {
    /// Create a new secret service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new secret or update an existing one
    ///
    /// The value is encrypted with a key derived from the password before it
    /// touches storage. Updating an existing secret preserves its original
    /// start date.
    pub fn add_or_update(
        &self,
        name: &str,
        value: &str,
        end_date: EndDate,
        password: &str,
    ) -> VaultResult<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::Validation("Secret name cannot be empty".into()));
        }
        if value.is_empty() {
            return Err(VaultError::Validation(
                "Secret value cannot be empty".into(),
            ));
        }
        if password.is_empty() {
            return Err(VaultError::Validation("Password cannot be empty".into()));
        }

        let payload = encrypt_value(value, password)?;
        let created = self.storage.secrets.upsert(name, payload, end_date)?;
        self.storage.secrets.save()?;

        Ok(if created {
            AddOutcome::Created
        } else {
            AddOutcome::Updated
        })
    }

    /// Decrypt and return a single secret
    pub fn reveal(&self, name: &str, password: &str) -> VaultResult<SecretView> {
        let secret = self
            .storage
            .secrets
            .get(name)?
            .ok_or_else(|| VaultError::secret_not_found(name))?;

        let value =
            decrypt_value(&secret.value, password).ok_or_else(|| VaultError::cannot_decrypt(name))?;

        Ok(SecretView {
            name: name.to_string(),
            value: Some(value),
            start_date: secret.start_date,
            end_date: secret.end_date,
        })
    }

    /// Decrypt and return all secrets
    ///
    /// A payload that fails to decrypt does not abort the listing; it shows
    /// up with a `None` value so the caller can report it alongside the
    /// entries that did decrypt.
    pub fn reveal_all(&self, password: &str) -> VaultResult<Vec<SecretView>> {
        let entries = self.storage.secrets.entries()?;

        Ok(entries
            .into_iter()
            .map(|(name, secret)| {
                let value = decrypt_value(&secret.value, password);
                SecretView {
                    name,
                    value,
                    start_date: secret.start_date,
                    end_date: secret.end_date,
                }
            })
            .collect())
    }

    /// List secret metadata without decrypting anything
    pub fn summaries(&self) -> VaultResult<Vec<SecretSummary>> {
        let entries = self.storage.secrets.entries()?;

        Ok(entries
            .into_iter()
            .map(|(name, secret)| SecretSummary {
                name,
                start_date: secret.start_date,
                end_date: secret.end_date,
            })
            .collect())
    }

    /// Delete a secret
    pub fn delete(&self, name: &str) -> VaultResult<()> {
        if !self.storage.secrets.delete(name)? {
            return Err(VaultError::secret_not_found(name));
        }
        self.storage.secrets.save()?;
        Ok(())
    }

    /// Count stored secrets
    pub fn count(&self) -> VaultResult<usize> {
        self.storage.secrets.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{paths::VaultPaths, settings::Settings};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let mut storage = Storage::new(paths, &settings).unwrap();
        storage.load().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_reveal() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        let outcome = service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();
        assert_eq!(outcome, AddOutcome::Created);

        let view = service.reveal("API_KEY", "password").unwrap();
        assert_eq!(view.value.as_deref(), Some("sk-12345"));
    }

    #[test]
    fn test_stored_payload_is_not_plaintext() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();

        let stored = storage.secrets.get("API_KEY").unwrap().unwrap();
        assert!(!stored.value.contains("sk-12345"));
    }

    #[test]
    fn test_update_reports_updated_and_keeps_start_date() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "old", EndDate::NoSetDate, "password")
            .unwrap();
        let original = storage.secrets.get("API_KEY").unwrap().unwrap();

        let outcome = service
            .add_or_update(
                "API_KEY",
                "new",
                EndDate::parse("31-12-2030").unwrap(),
                "password",
            )
            .unwrap();
        assert_eq!(outcome, AddOutcome::Updated);

        let view = service.reveal("API_KEY", "password").unwrap();
        assert_eq!(view.value.as_deref(), Some("new"));
        assert_eq!(view.start_date, original.start_date);
        assert!(view.end_date.is_set());
    }

    #[test]
    fn test_add_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        let err = service
            .add_or_update("", "value", EndDate::NoSetDate, "password")
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_or_update("NAME", "", EndDate::NoSetDate, "password")
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_or_update("NAME", "value", EndDate::NoSetDate, "")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_reveal_missing_secret() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        let err = service.reveal("NOPE", "password").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reveal_wrong_password() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();

        let err = service.reveal("API_KEY", "wrong").unwrap_err();
        assert!(matches!(err, VaultError::Encryption(_)));
    }

    #[test]
    fn test_reveal_all_collects_failures() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("GOOD", "value", EndDate::NoSetDate, "password")
            .unwrap();

        // A record with a payload no password can open
        storage
            .secrets
            .upsert("BROKEN", "garbage payload".into(), EndDate::NoSetDate)
            .unwrap();

        let views = service.reveal_all("password").unwrap();
        assert_eq!(views.len(), 2);

        let broken = views.iter().find(|v| v.name == "BROKEN").unwrap();
        assert!(broken.value.is_none());

        let good = views.iter().find(|v| v.name == "GOOD").unwrap();
        assert_eq!(good.value.as_deref(), Some("value"));
    }

    #[test]
    fn test_summaries_need_no_password() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();

        let summaries = service.summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "API_KEY");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();

        service.delete("API_KEY").unwrap();
        assert_eq!(service.count().unwrap(), 0);

        let err = service.delete("API_KEY").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_changes_persist_to_disk() {
        let (temp_dir, storage) = create_test_storage();
        let service = SecretService::new(&storage);

        service
            .add_or_update("API_KEY", "sk-12345", EndDate::NoSetDate, "password")
            .unwrap();

        // Reopen from disk and decrypt
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let mut storage2 = Storage::new(paths, &settings).unwrap();
        storage2.load().unwrap();

        let service2 = SecretService::new(&storage2);
        let view = service2.reveal("API_KEY", "password").unwrap();
        assert_eq!(view.value.as_deref(), Some("sk-12345"));
    }
}
