//! Loosely-typed JSON documents.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::DocumentId;

/// Errors that can occur when building a [`Document`] from arbitrary JSON.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The JSON value is not an object.
    #[error("document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A single JSON object record.
///
/// Apart from two reserved fields the shape is up to the client:
///
/// - [`Document::ID_FIELD`] (`_id`) holds the store-assigned identifier.
/// - [`Document::CREATE_DATE_FIELD`] (`createDate`) holds the server-assigned
///   creation timestamp for collections that track one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Field holding the document identifier.
    pub const ID_FIELD: &'static str = "_id";

    /// Field holding the server-assigned creation timestamp.
    pub const CREATE_DATE_FIELD: &'static str = "createDate";

    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Whether the field is present with a truthy value.
    ///
    /// `null`, `false`, `0`, and the empty string count as absent, matching
    /// how clients of this API have always been validated.
    #[must_use]
    pub fn has_value(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(is_truthy)
    }

    /// Whether any of the given fields is present with a truthy value.
    #[must_use]
    pub fn has_any(&self, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.has_value(f))
    }

    /// The document's identifier, if it carries a well-formed one.
    #[must_use]
    pub fn id(&self) -> Option<DocumentId> {
        self.0
            .get(Self::ID_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| DocumentId::parse(s).ok())
    }

    /// Drop any identifier field, returning what was there.
    pub fn strip_id(&mut self) -> Option<Value> {
        self.0.remove(Self::ID_FIELD)
    }

    /// Return the document with its identifier field set to `id`.
    #[must_use]
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.0
            .insert(Self::ID_FIELD.to_owned(), Value::String(id.to_string()));
        self
    }

    /// Overwrite `createDate` with the given server time.
    pub fn stamp_create_date(&mut self, now: DateTime<Utc>) {
        self.0.insert(
            Self::CREATE_DATE_FIELD.to_owned(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }

    /// Textual form of a field, as used for equality filters.
    ///
    /// Strings yield their contents; every other value yields its JSON
    /// rendering, so `2024` and `"2024"` both read as `2024`.
    #[must_use]
    pub fn field_text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(DocumentError::NotAnObject("null")),
            Value::Bool(_) => Err(DocumentError::NotAnObject("boolean")),
            Value::Number(_) => Err(DocumentError::NotAnObject("number")),
            Value::String(_) => Err(DocumentError::NotAnObject("string")),
            Value::Array(_) => Err(DocumentError::NotAnObject("array")),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
