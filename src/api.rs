//! Server Endpoint Wrappers
//!
//! Frontend bindings to the JSON endpoints the edit modals read from.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::error::PrefillError;

/// Transport used by the prefill controller
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// GET `url` and return the body of a 2xx response
    async fn get_text(&self, url: &str) -> Result<String, PrefillError>;
}

/// `fetch()` via gloo-net, same-origin so the session cookie goes along
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, PrefillError> {
        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| PrefillError::Network { url: url.to_string(), reason: e.to_string() })?;

        if !response.ok() {
            return Err(PrefillError::Status { url: url.to_string(), status: response.status() });
        }

        response
            .text()
            .await
            .map_err(|e| PrefillError::Network { url: url.to_string(), reason: e.to_string() })
    }
}

/// Parse a response body, keeping the url for the log line
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, PrefillError> {
    serde_json::from_str(body)
        .map_err(|e| PrefillError::Decode { url: url.to_string(), reason: e.to_string() })
}

pub async fn fetch_json<T, F>(fetcher: &F, url: &str) -> Result<T, PrefillError>
where
    T: DeserializeOwned,
    F: Fetch,
{
    let body = fetcher.get_text(url).await?;
    decode(url, &body)
}
