//! Service layer for the secret vault
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, encryption, and computed fields.

pub mod secret;

pub use secret::{AddOutcome, SecretService, SecretSummary, SecretView};
