//! Display formatting for terminal output
//!
//! Provides utilities for formatting secrets for terminal display, both
//! masked summaries and decrypted listings.

pub mod secret;

pub use secret::{format_revealed_list, format_secret_details, format_secret_list};
