//! Store query filters and operation outcomes.

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::id::DocumentId;

/// A conjunction of equality conditions over documents.
///
/// An empty filter matches every document. Field conditions compare the
/// textual form of the stored value (see [`Document::field_text`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    id: Option<DocumentId>,
    fields: Vec<(String, String)>,
}

impl Filter {
    /// A filter matching every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter matching the document with the given identifier.
    #[must_use]
    pub fn by_id(id: DocumentId) -> Self {
        Self {
            id: Some(id),
            fields: Vec::new(),
        }
    }

    /// Add a field equality condition.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// The identifier condition, if any.
    #[must_use]
    pub const fn id(&self) -> Option<DocumentId> {
        self.id
    }

    /// The field equality conditions.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Evaluate the filter against a document.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(id) = self.id
            && doc.id() != Some(id)
        {
            return false;
        }

        self.fields
            .iter()
            .all(|(field, expected)| doc.field_text(field).as_deref() == Some(expected.as_str()))
    }
}

/// Outcome of a replace operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    /// Result for a replace that touched `count` documents.
    #[must_use]
    pub const fn matched(count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
        }
    }
}

/// Outcome of a delete operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    /// Result for a delete that removed `count` documents.
    #[must_use]
    pub const fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
