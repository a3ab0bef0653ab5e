//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (store ping)
//!
//! # Contacts
//! GET    /contacts             - List contacts
//! POST   /contacts             - Create contact (firstName or lastName required)
//! GET    /contacts/{id}        - Get contact (null when absent)
//! PUT    /contacts/{id}        - Replace contact
//! DELETE /contacts/{id}        - Delete contact
//!
//! # Scouts
//! POST   /addscout             - Create scout (name required)
//! GET    /scouts?name=         - List scouts, optionally by name
//! GET    /clearall             - Delete every scout
//!
//! # Sales sheets
//! GET    /scouts/sales?scoutId=&year= - Get a scout's sheet for a year
//! POST   /scouts/sales/add     - Create sales sheet
//!
//! # Customers
//! GET    /customers            - List customers
//! POST   /customers            - Create customer (name required)
//! ```
//!
//! Each handler validates its input, makes exactly one store call, and maps
//! the outcome to a response. Validation failures return before the store is
//! touched.

pub mod contacts;
pub mod customers;
pub mod sales;
pub mod scouts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::index).post(contacts::create))
        .route(
            "/{id}",
            get(contacts::show)
                .put(contacts::update)
                .delete(contacts::destroy),
        )
}

/// Create the scout and sales sheet routes router.
pub fn scout_routes() -> Router<AppState> {
    Router::new()
        .route("/addscout", post(scouts::create))
        .route("/scouts", get(scouts::index))
        .route("/clearall", get(scouts::clear_all))
        .route("/scouts/sales", get(sales::show))
        .route("/scouts/sales/add", post(sales::create))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new().route("/", get(customers::index).post(customers::create))
}

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/contacts", contact_routes())
        .nest("/customers", customer_routes())
        .merge(scout_routes())
}
