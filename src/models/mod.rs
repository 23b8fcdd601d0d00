//! Core data models for the secret vault
//!
//! This module contains the data structures that represent stored secrets
//! and their date metadata.

pub mod dates;
pub mod secret;

pub use dates::{EndDate, NO_SET_DATE};
pub use secret::Secret;
