//! Secret display formatting
//!
//! Formats secrets for terminal output. The summary view masks every value;
//! only the revealed views print plaintext.

use chrono::NaiveDate;

use crate::models::secret::START_DATE_FORMAT;
use crate::services::{SecretSummary, SecretView};

/// Mask shown in place of an encrypted value
const VALUE_MASK_LEN: usize = 30;

fn masked_value() -> String {
    format!("{} (encrypted)", "*".repeat(VALUE_MASK_LEN))
}

/// Format a masked summary of all secrets
///
/// Requires no password; values stay masked. Secrets whose end date has
/// passed relative to `today` are marked expired.
pub fn format_secret_list(summaries: &[SecretSummary], today: NaiveDate) -> String {
    if summaries.is_empty() {
        return "No secrets stored.".to_string();
    }

    let mut output = String::new();

    for summary in summaries {
        let expired = if summary.end_date.is_expired(today) {
            " (expired)"
        } else {
            ""
        };

        output.push('\n');
        output.push_str(&format!("Key name        : {}\n", summary.name));
        output.push_str(&format!("Key content     : {}\n", masked_value()));
        output.push_str(&format!(
            "Start date      : {}\n",
            summary.start_date.format(START_DATE_FORMAT)
        ));
        output.push_str(&format!(
            "End date        : {}{}\n",
            summary.end_date, expired
        ));
    }

    output.push_str(&format!(
        "\n{} secret(s) stored, values encrypted.\n",
        summaries.len()
    ));

    output
}

/// Format a decrypted listing of secrets
///
/// Entries that could not be decrypted are reported inline rather than
/// aborting the listing.
pub fn format_revealed_list(views: &[SecretView]) -> String {
    if views.is_empty() {
        return "No secrets stored.".to_string();
    }

    let mut output = String::new();
    for view in views {
        output.push('\n');
        output.push_str(&format_secret_details(view));
    }
    output
}

/// Format a single secret's details
pub fn format_secret_details(view: &SecretView) -> String {
    let mut output = String::new();

    match &view.value {
        Some(value) => {
            output.push_str(&format!("Key name        : {}\n", view.name));
            output.push_str(&format!("Key content     : {}\n", value));
            output.push_str(&format!(
                "Start date      : {}\n",
                view.start_date.format(START_DATE_FORMAT)
            ));
            output.push_str(&format!("End date        : {}\n", view.end_date));
        }
        None => {
            output.push_str(&format!(
                "Cannot decrypt '{}': wrong password or corrupted data\n",
                view.name
            ));
        }
    }

    output
}
