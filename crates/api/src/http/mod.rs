use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::backend::ApiError;

mod assessment;
mod auth;
mod candidate;
mod recruiter;
pub(crate) mod wire;

/// HTTP adapter for the real backend: one client with a cookie jar,
/// shared by all four API surfaces so the login session carries over.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Point the adapter at a server, e.g. `http://localhost:5000`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the TLS client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Shared error contract: non-2xx bodies carry `{ "error": ... }` when
/// the backend had something to say, otherwise fall back to the bare
/// status code.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<wire::ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("HTTP error {}", status.as_u16()));
        tracing::warn!("backend call failed: {status} {message}");
        return Err(ApiError::Api { status, message });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubling_slashes() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(
            backend.url("/api/assessment/start/7"),
            "http://localhost:5000/api/assessment/start/7"
        );
    }
}
