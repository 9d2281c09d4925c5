// File: src/contact.rs
// Purpose: Contact form validation flow

use std::collections::BTreeMap;
use tracing::{info, warn};
use vitrine_validation::{Params, SuccessEnvelope, ValidationError, Validator};

/// Hidden field that humans leave empty
pub const HONEYPOT_FIELD: &str = "website";

pub const SUCCESS_MESSAGE: &str = "Thank you, your message has been sent.";

const FIELDS: [&str; 3] = ["name", "email", "message"];

/// Result of a contact form submission
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    Sent(SuccessEnvelope),
    Invalid(BTreeMap<String, ValidationError>),
}

impl ContactOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ContactOutcome::Sent(_))
    }
}

/// Validate a contact form submission
pub fn validate_contact(params: &Params) -> ContactOutcome {
    let mut validator = Validator::new(params);
    validator
        .required(FIELDS)
        .not_empty(FIELDS)
        .text_length("name", Some(2), Some(100))
        .email("email")
        .text_length("message", Some(10), Some(3000))
        .must_be_empty(HONEYPOT_FIELD);

    if validator.is_valid() {
        info!("Contact form accepted");
        return ContactOutcome::Sent(validator.send_success(SUCCESS_MESSAGE));
    }

    if validator.has_error(HONEYPOT_FIELD) {
        warn!("Contact form rejected: honeypot field was filled");
    } else {
        let fields: Vec<&str> = validator.errors().keys().map(String::as_str).collect();
        info!(?fields, "Contact form rejected");
    }
    ContactOutcome::Invalid(validator.into_errors())
}
