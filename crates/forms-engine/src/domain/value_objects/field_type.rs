//! Field kinds

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Closed set of field kinds.
///
/// Serialized as its kebab-case name. Any unrecognised name deserializes to
/// [`FieldType::Unknown`] instead of failing, and so does a missing name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Url,
    Date,
    Time,
    Appointment,
    Signature,
    Select,
    Radio,
    Checkbox,
    SingleChoice,
    MultipleChoice,
    Heading,
    Paragraph,
    Address,
    FullName,
    FileUpload,
    Rating,
    #[default]
    Unknown,
}

impl FieldType {
    /// Every known kind, in declaration order
    pub const ALL: [FieldType; 21] = [
        Self::Text,
        Self::Textarea,
        Self::Email,
        Self::Phone,
        Self::Number,
        Self::Url,
        Self::Date,
        Self::Time,
        Self::Appointment,
        Self::Signature,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::SingleChoice,
        Self::MultipleChoice,
        Self::Heading,
        Self::Paragraph,
        Self::Address,
        Self::FullName,
        Self::FileUpload,
        Self::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Url => "url",
            Self::Date => "date",
            Self::Time => "time",
            Self::Appointment => "appointment",
            Self::Signature => "signature",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::SingleChoice => "single-choice",
            Self::MultipleChoice => "multiple-choice",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Address => "address",
            Self::FullName => "full-name",
            Self::FileUpload => "file-upload",
            Self::Rating => "rating",
            Self::Unknown => "unknown",
        }
    }

    /// Whether fields of this kind carry an option list
    pub fn accepts_options(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::Radio | Self::Checkbox | Self::SingleChoice | Self::MultipleChoice
        )
    }

    /// Display-only kinds never hold a value
    pub fn is_display_only(&self) -> bool {
        matches!(self, Self::Heading | Self::Paragraph)
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Ok(Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .unwrap_or(Self::Unknown))
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
