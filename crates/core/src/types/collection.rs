//! Named document collections.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::Document;

/// Why a document cannot be inserted into a collection.
///
/// The display text is the message shown to API clients.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// A contact has neither `firstName` nor `lastName`.
    #[error("Must provide a first or last name.")]
    MissingContactName,
    /// A scout or customer has no `name`.
    #[error("Must provide a name.")]
    MissingName,
}

impl InsertError {
    /// Client-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingContactName => "Must provide a first or last name.",
            Self::MissingName => "Must provide a name.",
        }
    }
}

/// A named group of documents of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Contacts,
    Scouts,
    Customers,
    #[serde(rename = "salesheets")]
    SalesSheets,
}

impl Collection {
    /// All collections, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Contacts,
        Self::Scouts,
        Self::Customers,
        Self::SalesSheets,
    ];

    /// Storage name of the collection.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Scouts => "scouts",
            Self::Customers => "customers",
            Self::SalesSheets => "salesheets",
        }
    }

    /// Look up a collection by its storage name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Whether documents in this collection carry a server `createDate`.
    #[must_use]
    pub const fn tracks_create_date(self) -> bool {
        matches!(self, Self::Contacts | Self::Scouts)
    }

    /// Check a new document's required fields and stamp its `createDate`.
    ///
    /// Every insert path goes through here, so a client-supplied
    /// `createDate` never survives into the store.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError`] when a required field is missing or falsy.
    pub fn prepare_insert(
        self,
        mut document: Document,
        now: DateTime<Utc>,
    ) -> Result<Document, InsertError> {
        match self {
            Self::Contacts if !document.has_any(&["firstName", "lastName"]) => {
                return Err(InsertError::MissingContactName);
            }
            Self::Scouts | Self::Customers if !document.has_value("name") => {
                return Err(InsertError::MissingName);
            }
            _ => {}
        }

        if self.tracks_create_date() {
            document.stamp_create_date(now);
        }
        Ok(document)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
