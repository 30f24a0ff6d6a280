use thiserror::Error;

use crate::config::{GeneratorSettings, Settings, SpecSettings, StoreSettings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_generator(&settings.generator) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_specs(&settings.specs) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_store(&settings.store) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_generator(generator: &GeneratorSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if generator.items_per_resource == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generator.items_per_resource".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if generator.array_max_items == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generator.array_max_items".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if generator.array_min_items > generator.array_max_items {
            errors.push(ValidationError::InvalidValue {
                field: "generator.array_min_items".to_string(),
                reason: format!(
                    "Must not exceed generator.array_max_items ({})",
                    generator.array_max_items
                ),
            });
        }

        for (definition, field) in &generator.id_fields {
            if field.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "generator.id_fields.{}",
                    definition
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_specs(specs: &SpecSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if specs.dir.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("specs.dir".to_string()));
        }

        if specs.patterns.iter().any(|p| p.trim().is_empty()) {
            errors.push(ValidationError::InvalidValue {
                field: "specs.patterns".to_string(),
                reason: "Patterns must not be empty".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_store(store: &StoreSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if store.path.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("store.path".to_string()));
        }

        if store.default_id_field.is_empty() {
            errors.push(ValidationError::MissingField(
                "store.default_id_field".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
