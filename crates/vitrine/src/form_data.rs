// File: src/form_data.rs
// Purpose: Decoding of submitted form bodies into validator parameters

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use vitrine_validation::{Params, UploadedFile, Value};

/// Form data from POST requests
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, Value>,
    raw_json: Option<JsonValue>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from form fields with automatic trimming
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k, Value::Text(v.trim().to_string())))
            .collect();

        Self {
            fields,
            raw_json: None,
        }
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// `name[]` keys are gathered into a list; any other repeated key keeps
    /// its last value.
    pub fn from_urlencoded(body: &str) -> Self {
        let mut fields: HashMap<String, Value> = HashMap::new();

        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key);
            let value = decode_component(raw_value).trim().to_string();

            if let Some(list_key) = key.strip_suffix("[]") {
                match fields
                    .entry(list_key.to_string())
                    .or_insert_with(|| Value::List(Vec::new()))
                {
                    Value::List(items) => items.push(value),
                    other => *other = Value::List(vec![value]),
                }
            } else if !key.is_empty() {
                fields.insert(key, Value::Text(value));
            }
        }

        Self {
            fields,
            raw_json: None,
        }
    }

    /// Create from a JSON object body
    pub fn from_json(json: JsonValue) -> Self {
        let mut fields = HashMap::new();

        if let JsonValue::Object(map) = &json {
            for (key, value) in map {
                fields.insert(key.clone(), json_to_value(value));
            }
        }

        Self {
            fields,
            raw_json: Some(json),
        }
    }

    /// Attach an uploaded file under `key`
    pub fn with_file(mut self, key: impl Into<String>, file: impl UploadedFile + 'static) -> Self {
        self.fields.insert(key.into(), Value::file(file));
        self
    }

    /// Get a text field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_text)
    }

    /// Check if a field exists
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get all field names
    pub fn keys(&self) -> Vec<&String> {
        self.fields.keys().collect()
    }

    /// Get raw JSON if available
    pub fn json(&self) -> Option<&JsonValue> {
        self.raw_json.as_ref()
    }

    /// Text fields only, for re-filling a form
    pub fn text_fields(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(k, v)| v.as_text().map(|t| (k.clone(), t.to_string())))
            .collect()
    }

    /// Check if form is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw_json.is_none()
    }

    /// Parameters for a validation pass
    pub fn to_params(&self) -> Params {
        self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn into_params(self) -> Params {
        self.fields.into_iter().collect()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).unwrap_or_default().into_owned()
}

fn json_to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::String(s) => Value::Text(s.trim().to_string()),
        JsonValue::Array(items) => Value::List(items.iter().map(json_scalar_text).collect()),
        other => Value::Text(other.to_string()),
    }
}

fn json_scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
