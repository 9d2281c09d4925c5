// File: src/params.rs
// Purpose: Submitted field values handed to the validator

use crate::upload::UploadedFile;
use std::collections::HashMap;
use std::sync::Arc;

/// Raw value of one submitted field
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Text(String),
    /// Multi-valued field (`tags[]=a&tags[]=b`)
    List(Vec<String>),
    File(Arc<dyn UploadedFile>),
}

impl Value {
    pub fn file(file: impl UploadedFile + 'static) -> Self {
        Value::File(Arc::new(file))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&dyn UploadedFile> {
        match self {
            Value::File(f) => Some(f.as_ref()),
            _ => None,
        }
    }

    /// Form-level emptiness: no value, `""`, `"0"` or an empty list.
    /// A file handle is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty() || s == "0",
            Value::List(items) => items.is_empty(),
            Value::File(_) => false,
        }
    }

    /// Length in characters; non-text values count as zero
    pub fn char_len(&self) -> usize {
        self.as_text().map(|s| s.chars().count()).unwrap_or(0)
    }

    /// Strict equality used by the `confirm` rule. Two file handles are
    /// never considered the same value.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Field name to value mapping for one submission
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value for a key; explicit nulls are reported as missing
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text value for a key, if the field holds text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(fields: HashMap<String, String>) -> Self {
        fields.into_iter().collect()
    }
}
