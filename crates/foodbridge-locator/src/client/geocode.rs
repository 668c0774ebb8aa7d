//! Postal-code geocoding against the Nominatim search endpoint.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use foodbridge_core::Coordinate;

use super::LocatorClient;
use crate::error::LocatorError;

/// The only country postal codes are resolved in.
pub(crate) const GEOCODE_COUNTRY: &str = "USA";

impl LocatorClient {
    /// Resolves a postal code to the first Nominatim match.
    ///
    /// Returns `Ok(None)` when Nominatim has no match. No caching: every call
    /// goes to the provider.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Http`] on network failure.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`LocatorError::Deserialize`] if the body is not JSON.
    /// - [`LocatorError::MalformedResponse`] if the first match has no usable
    ///   coordinates.
    pub async fn geocode_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<Coordinate>, LocatorError> {
        let response = self
            .client
            .get(self.nominatim_url.clone())
            .query(&[
                ("postalcode", postal_code),
                ("country", GEOCODE_COUNTRY),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.nominatim_url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
                context: format!("nominatim(postalcode={postal_code})"),
                source: e,
            })?;

        parse_places(&value)
    }
}

/// Takes the first place of a Nominatim search response.
///
/// Nominatim encodes `lat`/`lon` as strings; plain numbers are accepted too.
fn parse_places(body: &serde_json::Value) -> Result<Option<Coordinate>, LocatorError> {
    let places = body
        .as_array()
        .ok_or_else(|| malformed("response is not an array"))?;

    let Some(first) = places.first() else {
        return Ok(None);
    };

    let lat = coordinate_field(first, "lat").ok_or_else(|| malformed("missing lat"))?;
    let lon = coordinate_field(first, "lon").ok_or_else(|| malformed("missing lon"))?;

    Coordinate::new(lat, lon)
        .map(Some)
        .ok_or_else(|| malformed(&format!("coordinates out of range: {lat}, {lon}")))
}

fn coordinate_field(place: &serde_json::Value, key: &str) -> Option<f64> {
    let value = place.get(key)?;
    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .or_else(|| value.as_f64())
}

fn malformed(reason: &str) -> LocatorError {
    LocatorError::MalformedResponse {
        context: "nominatim".to_string(),
        reason: reason.to_string(),
    }
}
