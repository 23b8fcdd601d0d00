//! Fernet encryption/decryption of secret values
//!
//! The stored payload is `urlsafe_b64(salt || fernet_token)`: a fresh 16-byte
//! salt followed by the ASCII Fernet token produced with the key derived from
//! that salt. Decryption also accepts the legacy payload layout (a bare
//! Fernet token keyed by an unsalted SHA-256 of the password).

use base64::{engine::general_purpose::URL_SAFE, Engine};
use fernet::Fernet;

use crate::error::{VaultError, VaultResult};

use super::key_derivation::{derive_key, derive_key_legacy, generate_salt, DerivedKey, SALT_LEN};

fn cipher_for(key: &DerivedKey) -> VaultResult<Fernet> {
    Fernet::new(&key.to_fernet_key())
        .ok_or_else(|| VaultError::Encryption("Failed to construct Fernet cipher".to_string()))
}

/// Encrypt a secret value with a password-derived key
///
/// Every call generates a fresh salt, so encrypting the same plaintext twice
/// yields different payloads.
pub fn encrypt_value(plaintext: &str, password: &str) -> VaultResult<String> {
    let salt = generate_salt();
    let key = derive_key(password, &salt);
    let token = cipher_for(&key)?.encrypt(plaintext.as_bytes());

    let mut payload = Vec::with_capacity(SALT_LEN + token.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(token.as_bytes());

    Ok(URL_SAFE.encode(payload))
}

/// Decrypt a stored payload with a password-derived key
///
/// Returns `None` on any failure: bad encoding, truncated payload, wrong
/// password, or a corrupted token. The causes are deliberately collapsed;
/// callers report a single "cannot decrypt" condition.
pub fn decrypt_value(payload: &str, password: &str) -> Option<String> {
    decrypt_salted(payload, password).or_else(|| decrypt_legacy(payload, password))
}

/// Decrypt the current payload layout: salt-prefixed Fernet token
fn decrypt_salted(payload: &str, password: &str) -> Option<String> {
    let data = URL_SAFE.decode(payload).ok()?;
    if data.len() <= SALT_LEN {
        return None;
    }

    let (salt, token) = data.split_at(SALT_LEN);
    let token = std::str::from_utf8(token).ok()?;

    let key = derive_key(password, salt);
    let cipher = Fernet::new(&key.to_fernet_key())?;
    let plaintext = cipher.decrypt(token).ok()?;

    String::from_utf8(plaintext).ok()
}

/// Decrypt the legacy payload layout: a bare token, unsalted SHA-256 key
fn decrypt_legacy(payload: &str, password: &str) -> Option<String> {
    let key = derive_key_legacy(password);
    let cipher = Fernet::new(&key.to_fernet_key())?;
    let plaintext = cipher.decrypt(payload).ok()?;

    String::from_utf8(plaintext).ok()
}
