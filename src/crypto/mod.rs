//! Cryptographic functions for the secret vault
//!
//! Provides Fernet authenticated encryption with PBKDF2-HMAC-SHA256 key
//! derivation for the stored secret values.

pub mod encryption;
pub mod key_derivation;

pub use encryption::{decrypt_value, encrypt_value};
pub use key_derivation::{derive_key, derive_key_legacy, generate_salt, DerivedKey};
