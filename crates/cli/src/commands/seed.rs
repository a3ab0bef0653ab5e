//! Seed a collection from a JSON file.
//!
//! The file holds a JSON array of objects. Every entry goes through the same
//! required-field checks and `createDate` stamping as the HTTP API, all before
//! the database is touched. Ids in the file are ignored and new ones are
//! assigned on insert.

use std::path::Path;

use chrono::{DateTime, Utc};
use scout_sales_core::{Collection, Document};
use scout_sales_server::db::DocumentStore as _;
use serde_json::Value;
use tracing::info;

use super::{CliError, open_store};

/// Insert every document in `file_path` into `collection`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or an insert fails.
pub async fn run(collection: Collection, file_path: &Path) -> Result<(), CliError> {
    info!(path = %file_path.display(), "Loading documents from file");

    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    let documents = parse_documents(&content, collection, Utc::now())?;

    info!(count = documents.len(), "Parsed seed file");

    let store = open_store().await?;
    for doc in documents {
        let created = store.insert_one(collection, doc).await?;
        tracing::debug!(id = ?created.id(), "Inserted document");
    }

    info!(collection = %collection, "Seeding complete");
    Ok(())
}

/// Parse a JSON array of objects into documents ready for `collection`.
fn parse_documents(
    content: &str,
    collection: Collection,
    now: DateTime<Utc>,
) -> Result<Vec<Document>, CliError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| CliError::InvalidSeed(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(CliError::InvalidSeed(
            "expected a JSON array of objects".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let invalid = |e: &dyn std::fmt::Display| {
                CliError::InvalidSeed(format!("entry {index}: {e}"))
            };
            let doc = Document::try_from(entry).map_err(|e| invalid(&e))?;
            collection
                .prepare_insert(doc, now)
                .map_err(|e| invalid(&e))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_parse_documents() {
        let docs = parse_documents(
            r#"[{"name": "Acme"}, {"name": "Globex"}]"#,
            Collection::Customers,
            now(),
        )
        .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].field_text("name").as_deref(), Some("Globex"));
        assert!(docs[0].get("createDate").is_none());
    }

    #[test]
    fn test_parse_documents_stamps_create_date() {
        let docs = parse_documents(
            r#"[{"firstName": "Ana", "createDate": "1999-01-01"}]"#,
            Collection::Contacts,
            now(),
        )
        .unwrap();

        assert_eq!(
            docs[0].get("createDate"),
            Some(&json!("2024-03-01T12:30:00.000Z"))
        );
    }

    #[test]
    fn test_parse_documents_enforces_required_fields() {
        let err = parse_documents(
            r#"[{"firstName": "Ana"}, {"email": "x", "createDate": "1999-01-01"}]"#,
            Collection::Contacts,
            now(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid seed file: entry 1: Must provide a first or last name."
        );

        let err = parse_documents(r#"[{"troop": 42}]"#, Collection::Scouts, now()).unwrap_err();
        assert!(err.to_string().contains("Must provide a name."));
    }

    #[test]
    fn test_parse_documents_rejects_non_array() {
        let err = parse_documents(r#"{"name": "Acme"}"#, Collection::Customers, now()).unwrap_err();
        assert!(matches!(err, CliError::InvalidSeed(_)));
    }

    #[test]
    fn test_parse_documents_reports_bad_entry() {
        let err =
            parse_documents(r#"[{"name": "Acme"}, 7]"#, Collection::Customers, now()).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_parse_documents_rejects_bad_json() {
        assert!(parse_documents("[{", Collection::SalesSheets, now()).is_err());
    }
}
