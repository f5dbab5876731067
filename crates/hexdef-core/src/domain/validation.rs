use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    datagram,
    entities::{ProjectStructure, ProjectTemplate},
    error::DomainError,
};

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid project name pattern"));

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &ProjectTemplate) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// Non-empty, letters, digits, `-` and `_` only.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidName {
                kind: "project",
                name: name.to_string(),
                reason: "name cannot be empty".into(),
            });
        }
        if !PROJECT_NAME.is_match(name) {
            return Err(DomainError::InvalidName {
                kind: "project",
                name: name.to_string(),
                reason: "only letters, digits, '-' and '_' are allowed".into(),
            });
        }
        Ok(())
    }

    pub fn validate_datagram_name(name: &str) -> Result<(), DomainError> {
        datagram::validate_datagram_name(name)
    }

    /// Model names become C++ class names.
    pub fn validate_model_name(name: &str) -> Result<(), DomainError> {
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidName {
                kind: "model",
                name: name.to_string(),
                reason: "must be a C++ identifier".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_names() {
        assert!(DomainValidator::validate_project_name("order-service_2").is_ok());
        assert!(DomainValidator::validate_project_name("").is_err());
        assert!(DomainValidator::validate_project_name("my app").is_err());
        assert!(DomainValidator::validate_project_name("a/b").is_err());
    }

    #[test]
    fn model_names() {
        assert!(DomainValidator::validate_model_name("Order").is_ok());
        assert!(DomainValidator::validate_model_name("9Lives").is_err());
        assert!(DomainValidator::validate_model_name("").is_err());
    }
}
