//! Scout route handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use scout_sales_core::{Collection, DeleteResult, Document, Filter};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for listing scouts.
#[derive(Debug, Default, Deserialize)]
pub struct ScoutQuery {
    /// Only return scouts with exactly this name. A blank value is ignored.
    #[serde(default)]
    pub name: Option<String>,
}

impl ScoutQuery {
    fn filter(&self) -> Filter {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => Filter::all().eq("name", name),
            _ => Filter::all(),
        }
    }
}

/// Create a scout.
///
/// POST /addscout
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>)> {
    let Json(scout) = body?;
    let scout = Collection::Scouts.prepare_insert(scout, Utc::now())?;

    let created = state
        .store()
        .insert_one(Collection::Scouts, scout)
        .await
        .map_err(|e| AppError::store("Failed to create new scout.", e))?;

    tracing::info!(id = ?created.id(), "Scout created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// List scouts.
///
/// GET /scouts?name=
///
/// Without `name` every scout is returned.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ScoutQuery>, QueryRejection>,
) -> Result<Json<Vec<Document>>> {
    let Query(query) = query?;

    let docs = state
        .store()
        .find(Collection::Scouts, &query.filter())
        .await
        .map_err(|e| AppError::store("Failed to get scouts.", e))?;

    Ok(Json(docs))
}

/// Delete every scout.
///
/// GET /clearall
#[instrument(skip_all)]
pub async fn clear_all(State(state): State<AppState>) -> Result<Json<DeleteResult>> {
    let result = state
        .store()
        .delete_many(Collection::Scouts, &Filter::all())
        .await
        .map_err(|e| AppError::store("Failed to clear scouts.", e))?;

    tracing::info!(deleted = result.deleted_count, "Scouts cleared");
    Ok(Json(result))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_create_requires_name() {
        let app = TestApp::new();

        let (status, body) = app.post("/addscout", json!({"troop": 42})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({"error": "Must provide a name."})));
        assert_eq!(app.store.count(Collection::Scouts).await, 0);
    }

    #[tokio::test]
    async fn test_create_stamps_create_date() {
        let app = TestApp::new();
        let before = Utc::now() - chrono::Duration::milliseconds(1);

        let (status, body) = app
            .post("/addscout", json!({"name": "Ana", "createDate": "not a date"}))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["name"], "Ana");
        assert!(body["_id"].is_string());
        let stamped: DateTime<Utc> = body["createDate"].as_str().unwrap().parse().unwrap();
        assert!(stamped >= before && stamped <= Utc::now());
    }

    #[tokio::test]
    async fn test_index_filters_by_name() {
        let app = TestApp::new();
        for name in ["Ana", "Bea", "Ana"] {
            app.post("/addscout", json!({"name": name})).await;
        }

        let (status, body) = app.get("/scouts?name=Ana").await;
        assert_eq!(status, StatusCode::OK);
        let scouts = body.unwrap();
        let scouts = scouts.as_array().unwrap();
        assert_eq!(scouts.len(), 2);
        assert!(scouts.iter().all(|s| s["name"] == "Ana"));

        let (_, body) = app.get("/scouts").await;
        assert_eq!(body.unwrap().as_array().unwrap().len(), 3);

        let (_, body) = app.get("/scouts?name=Cy").await;
        assert_eq!(body, Some(json!([])));
    }

    #[tokio::test]
    async fn test_index_name_is_matched_exactly() {
        let app = TestApp::new();
        app.post("/addscout", json!({"name": "Ana"})).await;

        let (_, body) = app.get("/scouts?name=%20Ana").await;
        assert_eq!(body, Some(json!([])));

        // Blank means no filter
        let (_, body) = app.get("/scouts?name=%20").await;
        assert_eq!(body.unwrap().as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_index_rejects_bad_query_as_json() {
        let app = TestApp::new();

        let (status, body) = app.get("/scouts?name=a&name=b").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({"error": "Invalid query parameters."})));
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let (status, body) = app.post("/addscout", json!({"name": "Ana"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Some(json!({"error": "Failed to create new scout."})));
    }

    #[tokio::test]
    async fn test_clear_all_empties_scouts() {
        let app = TestApp::new();
        app.post("/addscout", json!({"name": "Ana"})).await;
        app.post("/addscout", json!({"name": "Bea"})).await;
        app.post("/customers", json!({"name": "Acme"})).await;

        let (status, body) = app.get("/clearall").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Some(json!({"acknowledged": true, "deletedCount": 2})));

        let (status, body) = app.get("/scouts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Some(json!([])));

        // Other collections are untouched
        assert_eq!(app.store.count(Collection::Customers).await, 1);
    }

    #[tokio::test]
    async fn test_clear_all_store_failure() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let (status, body) = app.get("/clearall").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Some(json!({"error": "Failed to clear scouts."})));
    }
}
