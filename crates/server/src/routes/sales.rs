//! Sales sheet route handlers.
//!
//! A sales sheet belongs to one scout for one year. The `scoutId` field is a
//! soft reference: nothing checks that the scout exists.

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

use scout_sales_core::{Collection, Document, DocumentId, Filter};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Field on a sales sheet that references its scout.
pub const SCOUT_ID_FIELD: &str = "scoutId";

/// Field on a sales sheet holding the sales year.
pub const YEAR_FIELD: &str = "year";

/// Query parameters for looking up a sales sheet.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSheetQuery {
    pub scout_id: Option<String>,
    pub year: Option<String>,
}

impl SalesSheetQuery {
    /// Validate the parameters and build the lookup filter.
    fn filter(&self) -> Result<Filter> {
        let (Some(scout_id), Some(year)) = (
            non_empty(self.scout_id.as_deref()),
            non_empty(self.year.as_deref()),
        )
        else {
            return Err(AppError::BadRequest("Must provide a scoutId and year."));
        };

        // Match on the canonical form, as stored by scout creation
        let scout_id =
            DocumentId::parse(scout_id).map_err(|_| AppError::BadRequest("Invalid scoutId."))?;

        Ok(Filter::all()
            .eq(SCOUT_ID_FIELD, scout_id.to_string())
            .eq(YEAR_FIELD, year))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Get a scout's sales sheet for a year.
///
/// GET /scouts/sales?scoutId=&year=
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    query: std::result::Result<Query<SalesSheetQuery>, QueryRejection>,
) -> Result<Json<Document>> {
    let Query(query) = query?;
    let filter = query.filter()?;

    state
        .store()
        .find_one(Collection::SalesSheets, &filter)
        .await
        .map_err(|e| AppError::store("Failed to get sales spreadsheet data.", e))?
        .map(Json)
        .ok_or(AppError::NotFound("Sales spreadsheet not found."))
}

/// Create a sales sheet.
///
/// POST /scouts/sales/add
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>)> {
    let Json(sheet) = body?;
    let sheet = Collection::SalesSheets.prepare_insert(sheet, Utc::now())?;

    let created = state
        .store()
        .insert_one(Collection::SalesSheets, sheet)
        .await
        .map_err(|e| AppError::store("Failed to create new spreadsheet.", e))?;

    tracing::info!(id = ?created.id(), "Sales sheet created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_create_accepts_any_object() {
        let app = TestApp::new();

        let (status, body) = app.post("/scouts/sales/add", json!({"boxes": 12})).await;

        assert_eq!(status, StatusCode::CREATED);
        let body = body.unwrap();
        assert_eq!(body["boxes"], 12);
        assert!(body["_id"].is_string());
    }

    #[tokio::test]
    async fn test_show_finds_sheet_by_scout_and_year() {
        let app = TestApp::new();
        let scout = DocumentId::generate().to_string();
        app.post(
            "/scouts/sales/add",
            json!({"scoutId": scout, "year": 2023, "boxes": 40}),
        )
        .await;
        app.post(
            "/scouts/sales/add",
            json!({"scoutId": scout, "year": 2024, "boxes": 55}),
        )
        .await;

        let (status, body) = app
            .get(&format!("/scouts/sales?scoutId={scout}&year=2024"))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["boxes"], 55);
    }

    #[tokio::test]
    async fn test_show_matches_string_year() {
        let app = TestApp::new();
        let scout = DocumentId::generate().to_string();
        app.post(
            "/scouts/sales/add",
            json!({"scoutId": scout, "year": "2024"}),
        )
        .await;

        let (status, _) = app
            .get(&format!("/scouts/sales?scoutId={scout}&year=2024"))
            .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_show_canonicalizes_scout_id() {
        let app = TestApp::new();
        let scout = DocumentId::generate().to_string();
        app.post(
            "/scouts/sales/add",
            json!({"scoutId": scout, "year": 2024, "boxes": 7}),
        )
        .await;

        for form in [scout.to_uppercase(), scout.replace('-', "")] {
            let (status, body) = app
                .get(&format!("/scouts/sales?scoutId={form}&year=2024"))
                .await;

            assert_eq!(status, StatusCode::OK, "lookup by {form}");
            assert_eq!(body.unwrap()["boxes"], 7);
        }
    }

    #[tokio::test]
    async fn test_show_rejects_bad_query_as_json() {
        let app = TestApp::new();
        let scout = DocumentId::generate();

        let (status, body) = app
            .get(&format!("/scouts/sales?scoutId={scout}&scoutId={scout}&year=2024"))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({"error": "Invalid query parameters."})));
    }

    #[tokio::test]
    async fn test_show_not_found() {
        let app = TestApp::new();
        let scout = DocumentId::generate();

        let (status, body) = app
            .get(&format!("/scouts/sales?scoutId={scout}&year=2024"))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Some(json!({"error": "Sales spreadsheet not found."})));
    }

    #[tokio::test]
    async fn test_show_requires_params() {
        let app = TestApp::new();
        let scout = DocumentId::generate();

        let (status, _) = app.get("/scouts/sales").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.get(&format!("/scouts/sales?scoutId={scout}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.get("/scouts/sales?scoutId=abc&year=2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, Some(json!({"error": "Invalid scoutId."})));
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let (status, body) = app.post("/scouts/sales/add", json!({"boxes": 1})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Some(json!({"error": "Failed to create new spreadsheet."})));
    }

    #[tokio::test]
    async fn test_show_store_failure() {
        let app = TestApp::new();
        app.store.set_unavailable(true);
        let scout = DocumentId::generate();

        let (status, body) = app
            .get(&format!("/scouts/sales?scoutId={scout}&year=2024"))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            Some(json!({"error": "Failed to get sales spreadsheet data."}))
        );
    }
}
