//! Contact route handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use scout_sales_core::{Collection, Document, DocumentId, Filter, IdError};

use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::state::AppState;

type IdPath = std::result::Result<Path<String>, PathRejection>;

/// Parse a path identifier, reporting undecodable or malformed tokens as a
/// store failure under the route's message.
fn parse_id(path: IdPath, message: &'static str) -> Result<DocumentId> {
    let malformed = |e: IdError| AppError::store(message, StoreError::from(e));

    let Path(raw) =
        path.map_err(|rejection| malformed(IdError::Malformed(rejection.body_text())))?;
    DocumentId::parse(&raw).map_err(malformed)
}

/// List all contacts.
///
/// GET /contacts
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let docs = state
        .store()
        .find(Collection::Contacts, &Filter::all())
        .await
        .map_err(|e| AppError::store("Failed to get contacts.", e))?;

    Ok(Json(docs))
}

/// Create a contact.
///
/// POST /contacts
///
/// Requires `firstName` or `lastName`. `createDate` is always set to the
/// server's time.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>)> {
    let Json(contact) = body?;
    let contact = Collection::Contacts.prepare_insert(contact, Utc::now())?;

    let created = state
        .store()
        .insert_one(Collection::Contacts, contact)
        .await
        .map_err(|e| AppError::store("Failed to create new contact.", e))?;

    tracing::info!(id = ?created.id(), "Contact created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a contact by ID.
///
/// GET /contacts/{id}
///
/// Responds with `null` when no contact has the ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: IdPath,
) -> Result<Json<Option<Document>>> {
    const MESSAGE: &str = "Failed to get contact.";
    let id = parse_id(path, MESSAGE)?;

    let doc = state
        .store()
        .find_one(Collection::Contacts, &Filter::by_id(id))
        .await
        .map_err(|e| AppError::store(MESSAGE, e))?;

    Ok(Json(doc))
}

/// Replace a contact.
///
/// PUT /contacts/{id}
///
/// Any `_id` in the body is discarded; the stored identifier and
/// `createDate` never change.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    path: IdPath,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<StatusCode> {
    const MESSAGE: &str = "Failed to update contact.";
    let id = parse_id(path, MESSAGE)?;
    let Json(mut contact) = body?;
    contact.strip_id();

    let result = state
        .store()
        .replace_one(Collection::Contacts, id, contact)
        .await
        .map_err(|e| AppError::store(MESSAGE, e))?;

    tracing::debug!(matched = result.matched_count, "Contact replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a contact.
///
/// DELETE /contacts/{id}
///
/// Deleting an ID that does not exist still succeeds.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, path: IdPath) -> Result<StatusCode> {
    const MESSAGE: &str = "Failed to delete contact.";
    let id = parse_id(path, MESSAGE)?;

    let result = state
        .store()
        .delete_one(Collection::Contacts, id)
        .await
        .map_err(|e| AppError::store(MESSAGE, e))?;

    tracing::debug!(deleted = result.deleted_count, "Contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
