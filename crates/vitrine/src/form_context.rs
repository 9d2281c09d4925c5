// File: src/form_context.rs
// Purpose: Form context for templates to display validation errors and preserve values

use std::collections::{BTreeMap, HashMap};
use vitrine_validation::ValidationError;

/// Context for forms that includes validation errors and original values
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Field names to validation errors
    pub errors: BTreeMap<String, ValidationError>,
    /// Original field values submitted
    pub values: HashMap<String, String>,
    /// Flash message shown after a successful submission
    pub success: Option<String>,
}

impl FormContext {
    /// Create a new form context with errors and values
    pub fn new(errors: BTreeMap<String, ValidationError>, values: HashMap<String, String>) -> Self {
        Self {
            errors,
            values,
            success: None,
        }
    }

    /// Create empty form context
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context for a form that was accepted; submitted values are dropped
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            ..Self::default()
        }
    }

    /// Check if field has an error
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get error message for a field
    pub fn get_error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(ValidationError::message)
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get original value for a field, empty when it was not submitted
    pub fn get_value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }
}
