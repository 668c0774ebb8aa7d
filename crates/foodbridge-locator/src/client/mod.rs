//! HTTP client for the two OpenStreetMap services the locator depends on:
//! Nominatim (postal-code geocoding) and Overpass (POI queries).

mod geocode;
mod overpass;

use std::time::Duration;

use reqwest::{Client, Url};

use foodbridge_core::AppConfig;

use crate::error::LocatorError;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client for Nominatim and Overpass.
///
/// Use [`LocatorClient::new`] for the public instances or
/// [`LocatorClient::with_base_urls`] to point at a mock server in tests.
/// No retries are attempted: a failed call is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct LocatorClient {
    client: Client,
    nominatim_url: Url,
    overpass_url: Url,
}

impl LocatorClient {
    /// Creates a client pointed at the public Nominatim and Overpass instances.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LocatorError> {
        Self::with_base_urls(
            DEFAULT_NOMINATIM_URL,
            DEFAULT_OVERPASS_URL,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client from the endpoint, timeout, and user-agent settings
    /// in `config`.
    ///
    /// # Errors
    ///
    /// See [`LocatorClient::with_base_urls`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LocatorError> {
        Self::with_base_urls(
            &config.nominatim_url,
            &config.overpass_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with custom endpoints (for testing with wiremock).
    ///
    /// Both URLs are full endpoint URLs, e.g. `http://host/search` and
    /// `http://host/api/interpreter`.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LocatorError::InvalidBaseUrl`] if either
    /// URL does not parse.
    pub fn with_base_urls(
        nominatim_url: &str,
        overpass_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LocatorError> {
        // Nominatim's usage policy rejects requests without an identifying UA.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            nominatim_url: parse_url(nominatim_url)?,
            overpass_url: parse_url(overpass_url)?,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, LocatorError> {
    let url = Url::parse(raw.trim()).map_err(|e| LocatorError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(LocatorError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_urls_accepts_http_endpoints() {
        let client = LocatorClient::with_base_urls(
            "http://127.0.0.1:8080/search",
            "http://127.0.0.1:8081/api/interpreter",
            5,
            "foodbridge-test/0.1",
        )
        .expect("client construction should not fail");
        assert_eq!(client.nominatim_url.path(), "/search");
        assert_eq!(client.overpass_url.path(), "/api/interpreter");
    }

    #[test]
    fn with_base_urls_rejects_garbage() {
        let err = LocatorClient::with_base_urls("not a url", DEFAULT_OVERPASS_URL, 5, "ua")
            .unwrap_err();
        assert!(matches!(err, LocatorError::InvalidBaseUrl { .. }), "{err}");
    }

    #[test]
    fn with_base_urls_rejects_non_http_scheme() {
        let err = LocatorClient::with_base_urls(
            DEFAULT_NOMINATIM_URL,
            "ftp://overpass.example.com/interpreter",
            5,
            "ua",
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"), "{err}");
    }
}
