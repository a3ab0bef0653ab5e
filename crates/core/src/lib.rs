//! Scout Sales Core - Shared document types.
//!
//! This crate provides the types used across all Scout Sales components:
//! - `server` - HTTP service exposing the document collections
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Opaque identifiers, documents, collections, and filters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
