//! Secret record model
//!
//! A stored secret: the encrypted value plus its creation timestamp and
//! optional expiration date. The vault file is a JSON object mapping secret
//! names to these records.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::dates::EndDate;

/// Wire and display format for creation timestamps
pub const START_DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A stored secret record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Secret {
    /// Encrypted payload (salt-prefixed Fernet token, base64url wrapped)
    pub value: String,

    /// When the secret was first stored
    #[serde(with = "start_date_format")]
    pub start_date: NaiveDateTime,

    /// Optional expiration date
    pub end_date: EndDate,
}

impl Secret {
    /// Create a new record, stamping the creation time
    pub fn new(value: impl Into<String>, end_date: EndDate) -> Self {
        Self {
            value: value.into(),
            start_date: Local::now().naive_local(),
            end_date,
        }
    }

    /// Replace the payload and end date, keeping the original start date
    pub fn update(&mut self, value: impl Into<String>, end_date: EndDate) {
        self.value = value.into();
        self.end_date = end_date;
    }

    /// Format the creation timestamp for display
    pub fn start_date_display(&self) -> String {
        self.start_date.format(START_DATE_FORMAT).to_string()
    }
}

/// Serde adapter for the `dd-mm-yyyy HH:MM:SS` timestamp format
mod start_date_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::START_DATE_FORMAT;

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(START_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, START_DATE_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_secret_stamps_start_date() {
        let before = Local::now().naive_local();
        let secret = Secret::new("payload", EndDate::NoSetDate);
        let after = Local::now().naive_local();

        assert!(secret.start_date >= before && secret.start_date <= after);
        assert_eq!(secret.value, "payload");
        assert_eq!(secret.end_date, EndDate::NoSetDate);
    }

    #[test]
    fn test_update_preserves_start_date() {
        let mut secret = Secret::new("old payload", EndDate::NoSetDate);
        let original_start = secret.start_date;

        secret.update("new payload", EndDate::parse("31-12-2025").unwrap());

        assert_eq!(secret.value, "new payload");
        assert!(secret.end_date.is_set());
        assert_eq!(secret.start_date, original_start);
    }

    #[test]
    fn test_serialization_format() {
        let secret = Secret::new("payload", EndDate::NoSetDate);
        let json = serde_json::to_value(&secret).unwrap();

        assert_eq!(json["value"], "payload");
        assert_eq!(json["end_date"], "No set date");

        // dd-mm-yyyy HH:MM:SS
        let start = json["start_date"].as_str().unwrap();
        assert_eq!(start.len(), 19);
        assert_eq!(&start[2..3], "-");
        assert_eq!(&start[5..6], "-");
        assert_eq!(&start[10..11], " ");
    }

    #[test]
    fn test_round_trip_keeps_formatted_timestamp() {
        let secret = Secret::new("payload", EndDate::parse("01-01-2030").unwrap());
        let json = serde_json::to_string(&secret).unwrap();
        let back: Secret = serde_json::from_str(&json).unwrap();

        // Sub-second precision is dropped by the wire format, so compare
        // the formatted form
        assert_eq!(back.start_date_display(), secret.start_date_display());
        assert_eq!(back.end_date, secret.end_date);
        assert_eq!(back.value, secret.value);
    }

    #[test]
    fn test_deserialize_fixed_record() {
        let json = r#"{
            "value": "abc123",
            "start_date": "07-10-2025 14:30:45",
            "end_date": "31-12-2025"
        }"#;

        let secret: Secret = serde_json::from_str(json).unwrap();
        assert_eq!(secret.value, "abc123");
        assert_eq!(secret.start_date_display(), "07-10-2025 14:30:45");
        assert!(secret.end_date.is_set());
    }
}
