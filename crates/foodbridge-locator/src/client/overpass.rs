//! Overpass QL execution.

use super::LocatorClient;
use crate::error::LocatorError;
use crate::query::QuerySpec;
use crate::types::{OverpassEnvelope, RawCandidate};

impl LocatorClient {
    /// POSTs `query` to the Overpass interpreter and decodes the elements.
    ///
    /// Elements that fail to decode are skipped; the rest of the batch is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::Http`] on network failure or client-side timeout.
    /// - [`LocatorError::UnexpectedStatus`] on a non-2xx response (Overpass
    ///   answers 429 and 504 under load).
    /// - [`LocatorError::Deserialize`] if the body is not the JSON envelope.
    /// - [`LocatorError::MalformedResponse`] if Overpass reports a runtime
    ///   error in `remark`, which means the element list is incomplete.
    pub async fn run_overpass_query(
        &self,
        query: &QuerySpec,
    ) -> Result<Vec<RawCandidate>, LocatorError> {
        let response = self
            .client
            .post(self.overpass_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query.body.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.overpass_url.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: OverpassEnvelope =
            serde_json::from_str(&body).map_err(|e| LocatorError::Deserialize {
                context: format!("overpass({})", query.domain),
                source: e,
            })?;

        decode_elements(envelope)
    }
}

fn decode_elements(envelope: OverpassEnvelope) -> Result<Vec<RawCandidate>, LocatorError> {
    if let Some(remark) = envelope
        .remark
        .as_deref()
        .filter(|r| r.contains("runtime error"))
    {
        return Err(LocatorError::MalformedResponse {
            context: "overpass".to_string(),
            reason: remark.to_string(),
        });
    }

    let total = envelope.elements.len();
    let candidates: Vec<RawCandidate> = envelope
        .elements
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawCandidate>(value) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::debug!(error = %e, "skipping undecodable overpass element");
                None
            }
        })
        .collect();

    if candidates.len() < total {
        tracing::debug!(
            total,
            decoded = candidates.len(),
            "some overpass elements were skipped"
        );
    }

    Ok(candidates)
}
