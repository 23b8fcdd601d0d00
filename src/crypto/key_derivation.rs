//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives Fernet encryption keys from user passwords. Each encrypted payload
//! carries its own random salt, so no key material is ever stored.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt length in bytes, prepended to every encrypted payload
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (Fernet keys are 32 bytes)
const KEY_LEN: usize = 32;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Encode the key in the url-safe base64 form Fernet consumes
    pub fn to_fernet_key(&self) -> String {
        URL_SAFE.encode(self.key)
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive an encryption key from a password and salt
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

/// Derive a key the way early vault files did: a single unsalted SHA-256
/// of the password
///
/// Only used as a decryption fallback for payloads written by the old
/// format. New payloads always use [`derive_key`].
pub fn derive_key_legacy(password: &str) -> DerivedKey {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest);
    DerivedKey { key }
}
