//! Integration tests for Scout Sales.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and start the server
//! cargo run -p scout-sales-cli -- migrate
//! cargo run -p scout-sales-server
//!
//! # Run the ignored HTTP tests against it
//! cargo test -p scout-sales-integration-tests -- --ignored
//! ```
//!
//! Set `SCOUT_SALES_BASE_URL` to target a server other than
//! `http://localhost:8080`.

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

/// Default address of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client bound to a running server.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from `SCOUT_SALES_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("SCOUT_SALES_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// POST `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    /// PUT `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.put(self.url(path)).json(body).send().await
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        self.client.delete(self.url(path)).send().await
    }
}

/// Read a response as `(status, json)`.
///
/// # Errors
///
/// Returns an error if the body is not valid JSON.
pub async fn json_response(resp: Response) -> reqwest::Result<(StatusCode, Value)> {
    let status = resp.status();
    let body = resp.json().await?;
    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_path() {
        let ctx = TestContext {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert_eq!(ctx.url("/contacts"), "http://localhost:8080/contacts");
    }
}
