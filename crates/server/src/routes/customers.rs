//! Customer route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use scout_sales_core::{Collection, Document, Filter};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all customers.
///
/// GET /customers
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let docs = state
        .store()
        .find(Collection::Customers, &Filter::all())
        .await
        .map_err(|e| AppError::store("Failed to get customers.", e))?;

    Ok(Json(docs))
}

/// Create a customer.
///
/// POST /customers
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>)> {
    let Json(customer) = body?;
    let customer = Collection::Customers.prepare_insert(customer, Utc::now())?;

    let created = state
        .store()
        .insert_one(Collection::Customers, customer)
        .await
        .map_err(|e| AppError::store("Failed to create new customer.", e))?;

    tracing::info!(id = ?created.id(), "Customer created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_create_and_list() {
        let app = TestApp::new();

        let (status, acme) = app.post("/customers", json!({"name": "Acme"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(acme.unwrap()["_id"].is_string());
        app.post("/customers", json!({"name": "Globex", "city": "Cypress Creek"}))
            .await;

        let (status, body) = app.get("/customers").await;
        assert_eq!(status, StatusCode::OK);

        let mut names: Vec<String> = body
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["Acme", "Globex"]);
    }

    #[tokio::test]
    async fn test_create_has_no_create_date() {
        let app = TestApp::new();

        let (_, body) = app.post("/customers", json!({"name": "Acme"})).await;

        assert!(body.unwrap().get("createDate").is_none());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let app = TestApp::new();

        let (status, body) = app.post("/customers", json!({"name": ""})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({"error": "Must provide a name."})));
        assert_eq!(app.store.count(Collection::Customers).await, 0);
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let (status, body) = app.post("/customers", json!({"name": "Acme"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Some(json!({"error": "Failed to create new customer."})));
    }
}
