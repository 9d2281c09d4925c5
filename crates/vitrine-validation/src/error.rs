// File: src/error.rs
// Purpose: Error records produced by failing validation rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the rule that rejected a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "must_be_empty")]
    MustBeEmpty,
    #[serde(rename = "minLength")]
    MinLength,
    #[serde(rename = "maxLength")]
    MaxLength,
    #[serde(rename = "betweenLength")]
    BetweenLength,
    #[serde(rename = "slug")]
    Slug,
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "numeric_range")]
    NumericRange,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "filetype")]
    FileType,
    #[serde(rename = "uploaded")]
    Uploaded,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "confirm")]
    Confirm,
}

impl Rule {
    /// Wire name of the rule, as used by templates and translations
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Empty => "empty",
            Rule::MustBeEmpty => "must_be_empty",
            Rule::MinLength => "minLength",
            Rule::MaxLength => "maxLength",
            Rule::BetweenLength => "betweenLength",
            Rule::Slug => "slug",
            Rule::Numeric => "numeric",
            Rule::NumericRange => "numeric_range",
            Rule::DateTime => "datetime",
            Rule::Date => "date",
            Rule::FileType => "filetype",
            Rule::Uploaded => "uploaded",
            Rule::Email => "email",
            Rule::Confirm => "confirm",
        }
    }

    /// English message template; `{field}` and `{0}`, `{1}` are substituted
    fn template(self) -> &'static str {
        match self {
            Rule::Required => "The field {field} is required",
            Rule::Empty => "The field {field} cannot be empty",
            Rule::MustBeEmpty => "The field {field} must stay empty",
            Rule::MinLength => "The field {field} must contain at least {0} characters",
            Rule::MaxLength => "The field {field} must contain at most {0} characters",
            Rule::BetweenLength => "The field {field} must contain between {0} and {1} characters",
            Rule::Slug => "The field {field} is not a valid slug",
            Rule::Numeric => "The field {field} must be a number",
            Rule::NumericRange => "The field {field} must be a number between {0} and {1}",
            Rule::DateTime => "The field {field} must be a valid date and time ({0})",
            Rule::Date => "The field {field} must be a valid date ({0})",
            Rule::FileType => "The field {field} is not in a valid format ({0})",
            Rule::Uploaded => "You must upload a file",
            Rule::Email => "The email address does not seem valid",
            Rule::Confirm => "The field {field} does not match its confirmation",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed rule on one field, with the values needed to explain it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: Rule, params: Vec<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            params,
        }
    }

    /// Default English message
    pub fn message(&self) -> String {
        let mut message = self.rule.template().replace("{field}", &self.field);
        for (i, param) in self.params.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), param);
        }
        message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
