use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;
use userdesk_core::TransportError;

use crate::infra::config::ConfigError;

/// JSON-over-HTTP client for the remote user service.
///
/// Every failure (connect, non-2xx, undecodable body) is folded into a
/// [`TransportError`]; callers never see reqwest types.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Add `https://` if missing and drop a trailing slash so joined paths do
/// not end up with `//`.
pub(crate) fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };
    if with_scheme != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, with_scheme
        );
    }
    with_scheme
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    /// Join a service route onto the base URL
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref().trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, TransportError> {
        let response = request.send().await.map_err(TransportError::network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Execute a request and decode its JSON body
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = self.send(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(TransportError::Decode(
                "Empty response from server (204 No Content)".to_string(),
            ));
        }
        let bytes = response.bytes().await.map_err(TransportError::network)?;
        serde_json::from_slice(&bytes).map_err(TransportError::decode)
    }

    /// GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TransportError> {
        let url = self.build_url(path);
        debug!("GET request to: {}", url);
        self.execute_request(self.client.get(&url)).await
    }

    /// POST request
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, TransportError> {
        let url = self.build_url(path);
        debug!("POST request to: {}", url);
        self.execute_request(self.client.post(&url).json(body)).await
    }

    /// PUT request
    pub async fn put<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, TransportError> {
        let url = self.build_url(path);
        debug!("PUT request to: {}", url);
        self.execute_request(self.client.put(&url).json(body)).await
    }

    /// DELETE request; any body the service returns is ignored
    pub async fn delete(&self, path: &str) -> Result<(), TransportError> {
        let url = self.build_url(path);
        debug!("DELETE request to: {}", url);
        self.send(self.client.delete(&url)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_scheme_and_loses_trailing_slash() {
        assert_eq!(normalize_base_url("api.local:8080/"), "https://api.local:8080");
        assert_eq!(
            normalize_base_url("http://localhost:3000"),
            "http://localhost:3000"
        );
    }

    #[test]
    fn build_url_joins_without_double_slash() {
        let client =
            ApiClient::new("http://localhost:3000/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.build_url("/users/3"), "http://localhost:3000/users/3");
        assert_eq!(client.build_url("users"), "http://localhost:3000/users");
    }

    #[test]
    fn unparseable_base_url_is_a_config_error() {
        let err = ApiClient::new("http://exa mple.com", Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
