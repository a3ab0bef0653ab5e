//! Core types for Scout Sales.
//!
//! This module provides the document model shared by the server and tools.

pub mod collection;
pub mod document;
pub mod filter;
pub mod id;

pub use collection::{Collection, InsertError};
pub use document::{Document, DocumentError};
pub use filter::{DeleteResult, Filter, UpdateResult};
pub use id::{DocumentId, IdError};
