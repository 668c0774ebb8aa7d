use thiserror::Error;

/// Transport-level failures talking to Nominatim or Overpass.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but did not have the documented shape.
    #[error("malformed response from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Request-level failures surfaced to API callers.
///
/// Candidates without usable geometry are not an error: they are dropped
/// during normalization and never reach this type.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// Neither a postal code nor coordinates were supplied, or a value is out
    /// of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The geocoder returned no usable match for the postal code.
    #[error("could not resolve location for postal code '{postal_code}'")]
    GeocodeNotFound { postal_code: String },

    /// The POI provider failed, was unreachable, or the search timed out.
    #[error("location service unavailable: {reason}")]
    UpstreamUnavailable { reason: String },
}

impl SearchError {
    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidRequest(_) => "invalid_request",
            SearchError::GeocodeNotFound { .. } => "location_not_found",
            SearchError::UpstreamUnavailable { .. } => "upstream_unavailable",
        }
    }
}
