//! Opaque document identifiers.
//!
//! Every stored document carries a store-assigned [`DocumentId`]. Clients see
//! it as a plain string and must echo it back unchanged to address the
//! document. Identifiers coming in from the outside are validated with
//! [`DocumentId::parse`] before they reach the store.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("identifier cannot be empty")]
    Empty,
    /// The input is not a well-formed identifier token.
    #[error("malformed identifier: {0:?}")]
    Malformed(String),
}

/// A store-assigned document identifier.
///
/// Internally a UUID, but callers should treat it as an opaque token: the only
/// supported operations are generation, parsing, and formatting.
///
/// ## Examples
///
/// ```
/// use scout_sales_core::DocumentId;
///
/// let id = DocumentId::generate();
/// let parsed = DocumentId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
///
/// assert!(DocumentId::parse("").is_err());
/// assert!(DocumentId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier token.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] for an empty string and
    /// [`IdError::Malformed`] for anything that is not a valid token.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }

        Uuid::try_parse(trimmed)
            .map(Self)
            .map_err(|_| IdError::Malformed(s.to_owned()))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Type<::sqlx::Postgres> for DocumentId {
    fn type_info() -> ::sqlx::postgres::PgTypeInfo {
        <Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for DocumentId {
    fn decode(
        value: ::sqlx::postgres::PgValueRef<'r>,
    ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
        let id = <Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Encode<'_, ::sqlx::Postgres> for DocumentId {
    fn encode_by_ref(
        &self,
        buf: &mut ::sqlx::postgres::PgArgumentBuffer,
    ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
