//! Shared HTTP plumbing for the REST clients

use super::error::{ApiError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a pooled HTTP client with the dashboard's timeouts
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(5)
        .tcp_keepalive(Duration::from_secs(15))
        .build()?;

    Ok(client)
}

/// GET `url` and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    debug!("GET {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("Rate limit exceeded on {}", url);
        return Err(ApiError::RateLimitExceeded);
    }

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::ApiError(format!(
            "GET {} failed ({}): {}",
            url, status, error_text
        )));
    }

    let body = response.text().await?;
    decode(&body)
}

/// Decode a JSON body, mapping failures to `DeserializeFailed`
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializeFailed(e.to_string()))
}

/// Validate an identifier that is interpolated into a URL path
pub fn path_segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidParameter(format!("{} must not be empty", name)));
    }
    if value.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidParameter(format!(
            "{} contains a reserved character: {}",
            name, value
        )));
    }
    Ok(value)
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://a.b/service/", "/v1/qx/assets"), "https://a.b/service/v1/qx/assets");
        assert_eq!(join_url("https://a.b", "epochs"), "https://a.b/epochs");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("issuer", " ABC ").unwrap(), "ABC");
        assert!(matches!(path_segment("issuer", ""), Err(ApiError::InvalidParameter(_))));
        assert!(path_segment("asset", "QDOGE/../x").is_err());
    }

    #[test]
    fn test_decode_error() {
        let result: Result<Vec<u32>> = decode("{not json");
        assert!(matches!(result, Err(ApiError::DeserializeFailed(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(DEFAULT_TIMEOUT).is_ok());
    }
}
