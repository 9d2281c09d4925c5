// File: src/validator.rs
// Purpose: Chainable field validator collecting at most one error per field

use crate::date::{self, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use crate::error::{Rule, ValidationError};
use crate::params::{Params, Value};
use crate::predicates;
use crate::upload;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Result envelope returned to the client after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessEnvelope {
    pub success: String,
}

/// Applies named rules to the fields of one submission.
///
/// Every rule runs independently and never stops the chain. A later failure
/// on a field replaces an earlier one, so each field keeps only the last
/// rule that rejected it.
///
/// ```ignore
/// let mut validator = Validator::new(&params);
/// validator
///     .required(["name", "email", "message"])
///     .not_empty(["name"])
///     .email("email");
///
/// if !validator.is_valid() {
///     render_form(validator.errors());
/// }
/// ```
#[derive(Debug)]
pub struct Validator<'a> {
    params: &'a Params,
    errors: BTreeMap<String, ValidationError>,
}

impl<'a> Validator<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self {
            params,
            errors: BTreeMap::new(),
        }
    }

    /// Fails with `required` for every key that has no value.
    /// A present but empty string passes.
    pub fn required<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if self.value(key).is_none() {
                self.add_error(key, Rule::Required, Vec::new());
            }
        }
        self
    }

    /// Fails with `empty` for every key whose value is missing or empty
    pub fn not_empty<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if self.value(key).map_or(true, Value::is_empty) {
                self.add_error(key, Rule::Empty, Vec::new());
            }
        }
        self
    }

    /// Honeypot check: fails with `must_be_empty` when the field was filled
    pub fn must_be_empty(&mut self, key: &str) -> &mut Self {
        if self.value(key).is_some_and(|v| !v.is_empty()) {
            self.add_error(key, Rule::MustBeEmpty, Vec::new());
        }
        self
    }

    /// Checks the length in characters against optional bounds.
    ///
    /// At most one error per call, in this order: `betweenLength` when both
    /// bounds are set, then `minLength`, then `maxLength`.
    pub fn text_length(&mut self, key: &str, min: Option<usize>, max: Option<usize>) -> &mut Self {
        let length = self.value(key).map_or(0, Value::char_len);

        match (min, max) {
            (Some(min), Some(max)) if length < min || length > max => {
                self.add_error(key, Rule::BetweenLength, vec![min.to_string(), max.to_string()]);
            }
            (Some(min), None) if length < min => {
                self.add_error(key, Rule::MinLength, vec![min.to_string()]);
            }
            (None, Some(max)) if length > max => {
                self.add_error(key, Rule::MaxLength, vec![max.to_string()]);
            }
            _ => {}
        }
        self
    }

    /// Fails with `slug` when a value is present and is not a slug
    pub fn is_slug(&mut self, key: &str) -> &mut Self {
        if let Some(value) = self.value(key) {
            if !value.as_text().is_some_and(predicates::is_slug) {
                self.add_error(key, Rule::Slug, Vec::new());
            }
        }
        self
    }

    /// Fails with `numeric` when a non-empty value is not a number
    pub fn is_numeric(&mut self, key: &str) -> &mut Self {
        if let Some(value) = self.non_empty(key) {
            if !value.as_text().is_some_and(predicates::is_numeric) {
                self.add_error(key, Rule::Numeric, Vec::new());
            }
        }
        self
    }

    /// Fails with `numeric_range` when a non-empty value is not a number
    /// within `[min, max]`
    pub fn numeric_range(&mut self, key: &str, min: i64, max: i64) -> &mut Self {
        if let Some(value) = self.non_empty(key) {
            let number = value.as_text().and_then(predicates::parse_numeric);
            let out_of_range = match number {
                None => true,
                Some(n) if n < min as f64 => true,
                Some(n) => n > max as f64,
            };
            if out_of_range {
                self.add_error(key, Rule::NumericRange, vec![min.to_string(), max.to_string()]);
            }
        }
        self
    }

    /// Fails with `datetime` unless the value matches `format` exactly
    pub fn is_date_time(&mut self, key: &str, format: Option<&str>) -> &mut Self {
        let format = format.unwrap_or(DEFAULT_DATETIME_FORMAT);
        if !self.matches_date(key, format) {
            self.add_error(key, Rule::DateTime, vec![format.to_string()]);
        }
        self
    }

    /// Fails with `date` unless the value matches `format` exactly
    pub fn is_date(&mut self, key: &str, format: Option<&str>) -> &mut Self {
        let format = format.unwrap_or(DEFAULT_DATE_FORMAT);
        if !self.matches_date(key, format) {
            self.add_error(key, Rule::Date, vec![format.to_string()]);
        }
        self
    }

    /// Like [`is_date`](Self::is_date) but an empty string is accepted.
    /// The format defaults to a full date and time.
    pub fn empty_or_is_date(&mut self, key: &str, format: Option<&str>) -> &mut Self {
        if self.value(key).and_then(Value::as_text) == Some("") {
            return self;
        }
        let format = format.unwrap_or(DEFAULT_DATETIME_FORMAT);
        if !self.matches_date(key, format) {
            self.add_error(key, Rule::Date, vec![format.to_string()]);
        }
        self
    }

    /// Checks an uploaded file against an extension allow-list.
    ///
    /// Only files that were received successfully are checked. The
    /// extension must be allowed and the declared MIME type must be the one
    /// expected for it; otherwise `filetype` is recorded with the list.
    pub fn extension<S: AsRef<str>>(&mut self, key: &str, allowed: &[S]) -> &mut Self {
        let Some(file) = self.value(key).and_then(Value::as_file) else {
            return self;
        };
        if !file.status().is_ok() {
            return self;
        }

        let extension = file.client_extension();
        let expected = upload::expected_mime(&extension);
        let is_allowed = allowed.iter().any(|a| a.as_ref() == extension);

        if !is_allowed || expected.is_none() || expected != file.client_media_type() {
            let list = allowed.iter().map(|a| a.as_ref()).collect::<Vec<&str>>().join(", ");
            self.add_error(key, Rule::FileType, vec![list]);
        }
        self
    }

    /// Fails with `uploaded` unless a file arrived without error.
    /// A text value means the existing file is kept and passes.
    pub fn uploaded(&mut self, key: &str) -> &mut Self {
        let ok = match self.value(key) {
            Some(Value::Text(_)) => true,
            Some(Value::File(file)) => file.status().is_ok(),
            _ => false,
        };
        if !ok {
            self.add_error(key, Rule::Uploaded, Vec::new());
        }
        self
    }

    /// Fails with `email` unless the value is a valid email address
    pub fn email(&mut self, key: &str) -> &mut Self {
        let valid = self
            .value(key)
            .and_then(Value::as_text)
            .is_some_and(predicates::is_valid_email);
        if !valid {
            self.add_error(key, Rule::Email, Vec::new());
        }
        self
    }

    /// Fails with `confirm` unless `key` and `key_confirm` hold the same value
    pub fn confirm(&mut self, key: &str) -> &mut Self {
        let confirm_key = format!("{}_confirm", key);
        let same = match (self.value(key), self.value(&confirm_key)) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_as(b),
            _ => false,
        };
        if !same {
            self.add_error(key, Rule::Confirm, Vec::new());
        }
        self
    }

    /// Record an error, replacing any previous one for the same field
    pub fn add_error(&mut self, field: &str, rule: Rule, params: Vec<String>) {
        debug!(field, rule = rule.as_str(), ?params, "validation rule failed");
        self.errors
            .insert(field.to_string(), ValidationError::new(field, rule, params));
    }

    /// True when no rule has failed so far
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors keyed by field name
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn into_errors(self) -> BTreeMap<String, ValidationError> {
        self.errors
    }

    /// Wrap a success message for the client
    pub fn send_success(&self, message: impl Into<String>) -> SuccessEnvelope {
        SuccessEnvelope {
            success: message.into(),
        }
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.params.get(key)
    }

    fn non_empty(&self, key: &str) -> Option<&'a Value> {
        self.value(key).filter(|v| !v.is_empty())
    }

    fn matches_date(&self, key: &str, format: &str) -> bool {
        self.value(key)
            .and_then(Value::as_text)
            .is_some_and(|text| date::matches_format(text, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{FileUpload, UploadStatus};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rule_of(validator: &Validator, field: &str) -> Option<Rule> {
        validator.error(field).map(|e| e.rule)
    }

    fn params_of(validator: &Validator, field: &str) -> Vec<String> {
        validator.error(field).map(|e| e.params.clone()).unwrap_or_default()
    }

    #[test]
    fn test_required_only_fails_missing_keys() {
        let params = Params::new()
            .with("name", "")
            .with("email", "ada@example.com")
            .with("nickname", Value::Null);
        let mut v = Validator::new(&params);
        v.required(["name", "email", "message", "nickname"]);

        assert!(!v.is_valid());
        assert_eq!(rule_of(&v, "message"), Some(Rule::Required));
        assert_eq!(rule_of(&v, "nickname"), Some(Rule::Required));
        assert!(!v.has_error("name"));
        assert!(!v.has_error("email"));
    }

    #[test]
    fn test_required_accepts_owned_keys() {
        let params = Params::new();
        let keys = vec!["a".to_string(), "b".to_string()];
        let mut v = Validator::new(&params);
        v.required(&keys);
        assert_eq!(v.errors().len(), 2);
    }

    #[test]
    fn test_not_empty() {
        let params = Params::new()
            .with("blank", "")
            .with("zero", "0")
            .with("list", Vec::<String>::new())
            .with("ok", "value")
            .with("file", Value::file(FileUpload::new("a.pdf", "application/pdf")));
        let mut v = Validator::new(&params);
        v.not_empty(["blank", "zero", "list", "missing", "ok", "file"]);

        for field in ["blank", "zero", "list", "missing"] {
            assert_eq!(rule_of(&v, field), Some(Rule::Empty), "{field}");
        }
        assert!(!v.has_error("ok"));
        assert!(!v.has_error("file"));
    }

    #[test]
    fn test_must_be_empty_honeypot() {
        let params = Params::new().with("website", "http://spam.example").with("fax", "");
        let mut v = Validator::new(&params);
        v.must_be_empty("website").must_be_empty("fax").must_be_empty("missing");

        assert_eq!(rule_of(&v, "website"), Some(Rule::MustBeEmpty));
        assert_eq!(v.errors().len(), 1);
    }

    #[rstest]
    #[case("ab", Some(3), Some(5), Some(Rule::BetweenLength), vec!["3", "5"])]
    #[case("abcdef", Some(3), Some(5), Some(Rule::BetweenLength), vec!["3", "5"])]
    #[case("abcd", Some(3), Some(5), None, vec![])]
    #[case("ab", Some(3), None, Some(Rule::MinLength), vec!["3"])]
    #[case("ab", None, Some(5), None, vec![])]
    #[case("abcdef", None, Some(5), Some(Rule::MaxLength), vec!["5"])]
    #[case("héhé", None, Some(4), None, vec![])]
    #[case("abc", None, None, None, vec![])]
    fn test_text_length(
        #[case] value: &str,
        #[case] min: Option<usize>,
        #[case] max: Option<usize>,
        #[case] expected: Option<Rule>,
        #[case] expected_params: Vec<&str>,
    ) {
        let params = Params::new().with("x", value);
        let mut v = Validator::new(&params);
        v.text_length("x", min, max);

        assert_eq!(rule_of(&v, "x"), expected);
        assert_eq!(params_of(&v, "x"), expected_params);
    }

    #[test]
    fn test_text_length_missing_counts_as_zero() {
        let params = Params::new();
        let mut v = Validator::new(&params);
        v.text_length("x", Some(1), None);
        assert_eq!(rule_of(&v, "x"), Some(Rule::MinLength));
    }

    #[test]
    fn test_is_slug() {
        let params = Params::new()
            .with("good", "my-first-post")
            .with("upper", "My-Post")
            .with("double", "my--post")
            .with("edge", "-post-");
        let mut v = Validator::new(&params);
        v.is_slug("good").is_slug("upper").is_slug("double").is_slug("edge").is_slug("missing");

        assert!(!v.has_error("good"));
        assert!(!v.has_error("missing"));
        for field in ["upper", "double", "edge"] {
            assert_eq!(rule_of(&v, field), Some(Rule::Slug), "{field}");
        }
    }

    #[test]
    fn test_is_numeric_skips_empty_values() {
        let params = Params::new()
            .with("price", "12.50")
            .with("qty", "ten")
            .with("blank", "");
        let mut v = Validator::new(&params);
        v.is_numeric("price").is_numeric("qty").is_numeric("blank").is_numeric("missing");

        assert_eq!(rule_of(&v, "qty"), Some(Rule::Numeric));
        assert_eq!(v.errors().len(), 1);
    }

    #[rstest]
    #[case("5", true)]
    #[case("10", false)]
    #[case("15", false)]
    #[case("20", false)]
    #[case("20.5", true)]
    #[case("21", true)]
    #[case("abc", true)]
    #[case("", false)]
    fn test_numeric_range(#[case] value: &str, #[case] fails: bool) {
        let params = Params::new().with("n", value);
        let mut v = Validator::new(&params);
        v.numeric_range("n", 10, 20);

        if fails {
            assert_eq!(rule_of(&v, "n"), Some(Rule::NumericRange));
            assert_eq!(params_of(&v, "n"), vec!["10", "20"]);
        } else {
            assert!(v.is_valid());
        }
    }

    #[test]
    fn test_dates() {
        let params = Params::new()
            .with("starts_at", "2024-05-01 09:30:00")
            .with("ends_at", "2024-05-01")
            .with("birthday", "1990-02-30")
            .with("day", "01/05/2024");
        let mut v = Validator::new(&params);
        v.is_date_time("starts_at", None)
            .is_date_time("ends_at", None)
            .is_date("birthday", None)
            .is_date("day", Some("d/m/Y"))
            .is_date("missing", None);

        assert!(!v.has_error("starts_at"));
        assert!(!v.has_error("day"));
        assert_eq!(rule_of(&v, "ends_at"), Some(Rule::DateTime));
        assert_eq!(params_of(&v, "ends_at"), vec!["Y-m-d H:i:s"]);
        assert_eq!(rule_of(&v, "birthday"), Some(Rule::Date));
        assert_eq!(params_of(&v, "birthday"), vec!["Y-m-d"]);
        assert_eq!(rule_of(&v, "missing"), Some(Rule::Date));
    }

    #[test]
    fn test_dates_with_partial_formats() {
        let params = Params::new()
            .with("card_expiry", "05/2024")
            .with("year", "2024")
            .with("padded", "2024-05- 1")
            .with("signed", "+2024-05-01");
        let mut v = Validator::new(&params);
        v.is_date("card_expiry", Some("m/Y"))
            .is_date("year", Some("Y"))
            .is_date("padded", None)
            .is_date("signed", None);

        assert!(!v.has_error("card_expiry"));
        assert!(!v.has_error("year"));
        assert_eq!(rule_of(&v, "padded"), Some(Rule::Date));
        assert_eq!(rule_of(&v, "signed"), Some(Rule::Date));
    }

    #[test]
    fn test_empty_or_is_date() {
        let params = Params::new()
            .with("blank", "")
            .with("good", "2024-05-01 09:30:00")
            .with("bad", "tomorrow");
        let mut v = Validator::new(&params);
        v.empty_or_is_date("blank", None)
            .empty_or_is_date("good", None)
            .empty_or_is_date("bad", Some("Y-m-d"))
            .empty_or_is_date("missing", None);

        assert!(!v.has_error("blank"));
        assert!(!v.has_error("good"));
        assert_eq!(rule_of(&v, "bad"), Some(Rule::Date));
        assert_eq!(params_of(&v, "bad"), vec!["Y-m-d"]);
        assert_eq!(rule_of(&v, "missing"), Some(Rule::Date));
    }

    #[test]
    fn test_extension() {
        let params = Params::new()
            .with("photo", Value::file(FileUpload::new("Holiday.JPG", "image/jpeg")))
            .with("spoofed", Value::file(FileUpload::new("evil.png", "text/html")))
            .with("doc", Value::file(FileUpload::new("cv.pdf", "application/pdf")))
            .with("unknown", Value::file(FileUpload::new("notes.txt", "text/plain")))
            .with("failed", Value::file(FileUpload::failed(UploadStatus::Partial)))
            .with("kept", "existing.jpg");
        let allowed = ["jpg", "png"];
        let mut v = Validator::new(&params);
        for key in ["photo", "spoofed", "doc", "unknown", "failed", "kept", "missing"] {
            v.extension(key, &allowed);
        }

        assert!(!v.has_error("photo"));
        assert_eq!(rule_of(&v, "spoofed"), Some(Rule::FileType));
        assert_eq!(params_of(&v, "spoofed"), vec!["jpg, png"]);
        assert_eq!(rule_of(&v, "doc"), Some(Rule::FileType));
        assert_eq!(rule_of(&v, "unknown"), Some(Rule::FileType));
        assert!(!v.has_error("failed"));
        assert!(!v.has_error("kept"));
        assert!(!v.has_error("missing"));
    }

    #[test]
    fn test_uploaded() {
        let params = Params::new()
            .with("new", Value::file(FileUpload::new("a.png", "image/png")))
            .with("kept", "current.png")
            .with("too_big", Value::file(FileUpload::failed(UploadStatus::IniSize)))
            .with("none", Value::file(FileUpload::failed(UploadStatus::NoFile)));
        let mut v = Validator::new(&params);
        v.uploaded("new").uploaded("kept").uploaded("too_big").uploaded("none").uploaded("missing");

        assert!(!v.has_error("new"));
        assert!(!v.has_error("kept"));
        for field in ["too_big", "none", "missing"] {
            assert_eq!(rule_of(&v, field), Some(Rule::Uploaded), "{field}");
        }
    }

    #[test]
    fn test_email() {
        let params = Params::new().with("good", "ada@example.com").with("bad", "ada@");
        let mut v = Validator::new(&params);
        v.email("good").email("bad").email("missing");

        assert!(!v.has_error("good"));
        assert_eq!(rule_of(&v, "bad"), Some(Rule::Email));
        assert_eq!(rule_of(&v, "missing"), Some(Rule::Email));
    }

    #[test]
    fn test_confirm() {
        let params = Params::new()
            .with("password", "secret")
            .with("password_confirm", "secret")
            .with("pin", "1234")
            .with("pin_confirm", "4321")
            .with("code", "abc");
        let mut v = Validator::new(&params);
        v.confirm("password").confirm("pin").confirm("code").confirm("absent");

        assert!(!v.has_error("password"));
        assert!(!v.has_error("absent"));
        assert_eq!(rule_of(&v, "pin"), Some(Rule::Confirm));
        assert_eq!(rule_of(&v, "code"), Some(Rule::Confirm));
        assert!(!v.has_error("pin_confirm"));
    }

    #[test]
    fn test_last_failing_rule_wins() {
        let params = Params::new().with("title", "");
        let mut v = Validator::new(&params);
        v.not_empty(["title"]).text_length("title", Some(3), None);

        assert_eq!(v.errors().len(), 1);
        assert_eq!(rule_of(&v, "title"), Some(Rule::MinLength));

        v.is_slug("title");
        assert_eq!(rule_of(&v, "title"), Some(Rule::Slug));

        // A passing rule leaves the earlier failure in place
        v.text_length("title", None, Some(10));
        assert_eq!(rule_of(&v, "title"), Some(Rule::Slug));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let params = Params::new().with("email", "nope");
        let mut v = Validator::new(&params);
        v.email("email");

        let first = v.errors().clone();
        assert_eq!(v.is_valid(), v.is_valid());
        assert_eq!(&first, v.errors());
    }

    #[test]
    fn test_send_success() {
        let params = Params::new();
        let v = Validator::new(&params);
        let envelope = v.send_success("Message sent");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({"success": "Message sent"})
        );
    }
}
