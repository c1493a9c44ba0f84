//! Field metadata
//!
//! Type-specific configuration is a tagged variant rather than an open bag,
//! so every field kind has a known payload shape. Host-specific keys that
//! the engine does not interpret go in `extra`.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Timestamps plus the kind-specific payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub details: TypeMetadata,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl FieldMetadata {
    pub fn new(details: TypeMetadata) -> Self {
        let now = Utc::now();
        Self { created_at: now, updated_at: now, details, extra: BTreeMap::new() }
    }
}

impl Default for FieldMetadata {
    fn default() -> Self {
        Self::new(TypeMetadata::Generic)
    }
}

/// Partial metadata change: replaces `details` when set, merges `extra` key by key
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataUpdate {
    pub details: Option<TypeMetadata>,
    pub extra: BTreeMap<String, Value>,
}

impl MetadataUpdate {
    pub fn details(details: TypeMetadata) -> Self {
        Self { details: Some(details), extra: BTreeMap::new() }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Kind-specific configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeMetadata {
    #[default]
    Generic,
    Heading {
        size: HeadingSize,
    },
    #[serde(rename_all = "camelCase")]
    Address {
        labels: AddressLabels,
    },
    #[serde(rename_all = "camelCase")]
    FullName {
        first_label: String,
        last_label: String,
        show_middle_name: bool,
    },
    #[serde(rename_all = "camelCase")]
    Appointment {
        intervals: Vec<AppointmentInterval>,
        timezone: String,
        slot_minutes: u32,
    },
    #[serde(rename_all = "camelCase")]
    Choice {
        allow_other: bool,
        randomize: bool,
    },
    #[serde(rename_all = "camelCase")]
    Signature {
        pen_color: String,
    },
    Rating {
        max: u8,
    },
    Date {
        format: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSize {
    H1,
    #[default]
    H2,
    H3,
}

/// Sub-labels of an address block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLabels {
    pub street: String,
    pub street_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for AddressLabels {
    fn default() -> Self {
        Self {
            street: "Street Address".into(),
            street_line2: "Street Address Line 2".into(),
            city: "City".into(),
            state: "State / Province".into(),
            postal_code: "Postal / Zip Code".into(),
            country: "Country".into(),
        }
    }
}

/// Bookable window on one weekday, times as `HH:MM`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInterval {
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

impl AppointmentInterval {
    pub fn new(day: Weekday, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { day, start: start.into(), end: end.into() }
    }

    /// Monday to Friday, 09:00-17:00
    pub fn working_week() -> Vec<Self> {
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
            .into_iter()
            .map(|day| Self::new(day, "09:00", "17:00"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_metadata_tagging() {
        let heading = TypeMetadata::Heading { size: HeadingSize::H1 };
        assert_eq!(
            serde_json::to_value(&heading).unwrap(),
            json!({ "kind": "heading", "size": "h1" })
        );
    }

    #[test]
    fn test_metadata_defaults_when_details_absent() {
        let meta: FieldMetadata = serde_json::from_value(json!({
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(meta.details, TypeMetadata::Generic);
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_working_week() {
        let week = AppointmentInterval::working_week();
        assert_eq!(week.len(), 5);
        assert_eq!(week[0].day, Weekday::Mon);
        assert_eq!(week[4].end, "17:00");
    }
}
