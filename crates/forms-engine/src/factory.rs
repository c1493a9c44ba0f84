//! Field Factory
//!
//! Builds new fields with type-specific defaults, and clones existing ones.

use chrono::Utc;

use crate::config::FactoryConfig;
use crate::domain::{
    AddressLabels, AppointmentInterval, Field, FieldId, FieldMetadata, FieldOption, FieldType,
    HeadingSize, TypeMetadata,
};

/// Field factory
#[derive(Debug, Clone, Default)]
pub struct FieldFactory {
    config: FactoryConfig,
}

impl FieldFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    /// Create a field of `kind` at position `order`.
    ///
    /// Unknown kinds get the generic baseline instead of failing.
    pub fn create(&self, kind: FieldType, order: usize) -> Field {
        let mut field = Field {
            id: FieldId::new(),
            field_type: kind,
            label: format!("Field {}", order + 1),
            placeholder: String::new(),
            help_text: String::new(),
            required: false,
            order,
            options: kind.accepts_options().then(Vec::new),
            validation: Vec::new(),
            conditional: None,
            metadata: FieldMetadata::default(),
        };
        self.apply_type_defaults(&mut field);
        field
    }

    fn apply_type_defaults(&self, field: &mut Field) {
        let (label, placeholder) = match field.field_type {
            FieldType::Text => ("Short Text", "Enter text"),
            FieldType::Textarea => ("Long Text", "Type your answer here"),
            FieldType::Email => ("Email", "name@example.com"),
            FieldType::Phone => ("Phone Number", "(555) 555-5555"),
            FieldType::Number => ("Number", "0"),
            FieldType::Url => ("Website", "https://"),
            FieldType::Date => ("Date", "YYYY-MM-DD"),
            FieldType::Time => ("Time", "HH:MM"),
            FieldType::Appointment => ("Appointment", ""),
            FieldType::Signature => ("Signature", ""),
            FieldType::Select => ("Dropdown", "Select an option"),
            FieldType::Radio => ("Radio Buttons", ""),
            FieldType::Checkbox => ("Checkboxes", ""),
            FieldType::SingleChoice => ("Single Choice", ""),
            FieldType::MultipleChoice => ("Multiple Choice", ""),
            FieldType::Heading => ("Heading", ""),
            FieldType::Paragraph => ("Paragraph", ""),
            FieldType::Address => ("Address", ""),
            FieldType::FullName => ("Full Name", ""),
            FieldType::FileUpload => ("File Upload", ""),
            FieldType::Rating => ("Rating", ""),
            FieldType::Unknown => return,
        };
        field.label = label.to_string();
        field.placeholder = placeholder.to_string();

        if field.field_type.accepts_options() {
            field.options = Some(
                (1..=self.config.choice_option_count)
                    .map(|n| FieldOption::new(format!("Option {n}")))
                    .collect(),
            );
        }

        field.metadata.details = match field.field_type {
            FieldType::Heading => TypeMetadata::Heading { size: HeadingSize::default() },
            FieldType::Address => TypeMetadata::Address { labels: AddressLabels::default() },
            FieldType::FullName => TypeMetadata::FullName {
                first_label: "First Name".into(),
                last_label: "Last Name".into(),
                show_middle_name: false,
            },
            FieldType::Appointment => TypeMetadata::Appointment {
                intervals: AppointmentInterval::working_week(),
                timezone: self.config.appointment_timezone.clone(),
                slot_minutes: self.config.appointment_slot_minutes,
            },
            FieldType::Signature => TypeMetadata::Signature { pen_color: "#000000".into() },
            FieldType::Rating => TypeMetadata::Rating { max: 5 },
            FieldType::Date => TypeMetadata::Date { format: "YYYY-MM-DD".into() },
            kind if kind.accepts_options() => TypeMetadata::Choice { allow_other: false, randomize: false },
            _ => TypeMetadata::Generic,
        };
    }

    /// Deep copy of `field` with a fresh id and fresh timestamps
    pub fn clone_field(&self, field: &Field) -> Field {
        let now = Utc::now()
            .max(field.metadata.created_at)
            .max(field.metadata.updated_at);
        let mut copy = field.clone();
        copy.id = FieldId::new();
        copy.metadata.created_at = now;
        copy.metadata.updated_at = now;
        copy
    }
}

/// Create a field with the default factory settings
pub fn create_field(kind: FieldType, order: usize) -> Field {
    FieldFactory::default().create(kind, order)
}

/// Clone a field with a fresh id and timestamps
pub fn clone_field(field: &Field) -> Field {
    FieldFactory::default().clone_field(field)
}
