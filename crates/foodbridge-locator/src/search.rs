//! Search orchestration: resolve center, query, normalize, classify, rank.

use std::collections::HashSet;
use std::time::Duration;

use foodbridge_core::{AppConfig, CategoryTable, Coordinate, Location, SearchDomain};

use crate::classify::classify;
use crate::client::LocatorClient;
use crate::error::{LocatorError, SearchError};
use crate::normalize::normalize_candidate;
use crate::query::{build_query, QuerySpec};
use crate::rank::rank;
use crate::types::{ElementKind, RawCandidate};

/// Radius used when the request does not name one.
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// A validated search request.
///
/// Carries a center, a postal code, or both; an explicit center wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub postal_code: Option<String>,
    pub center: Option<Coordinate>,
    pub radius_miles: f64,
}

impl SearchRequest {
    /// Builds a request from optional wire fields.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] when neither a non-blank
    /// postal code nor a coordinate pair is supplied, when only one of
    /// `lat`/`lon` is supplied, when the coordinates are out of range, or
    /// when the radius is not a positive finite number.
    pub fn from_parts(
        postal_code: Option<&str>,
        lat: Option<f64>,
        lon: Option<f64>,
        radius_miles: Option<f64>,
    ) -> Result<Self, SearchError> {
        let postal_code = postal_code
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let center = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon).ok_or_else(|| {
                SearchError::InvalidRequest(format!("coordinates out of range: {lat}, {lon}"))
            })?),
            (None, None) => None,
            _ => {
                return Err(SearchError::InvalidRequest(
                    "lat and lon must be supplied together".to_string(),
                ))
            }
        };

        if postal_code.is_none() && center.is_none() {
            return Err(SearchError::InvalidRequest(
                "either zipCode or lat/lon is required".to_string(),
            ));
        }

        let radius_miles = radius_miles.unwrap_or(DEFAULT_RADIUS_MILES);
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "radius must be a positive number of miles, got {radius_miles}"
            )));
        }

        Ok(Self {
            postal_code,
            center,
            radius_miles,
        })
    }
}

/// Limits applied to every search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Optional operator cap on the radius. `None` accepts any positive radius.
    pub max_radius_miles: Option<f64>,
    pub overpass_timeout_secs: u32,
    /// Bound on the whole search, geocode and POI query together.
    pub search_timeout: Duration,
}

impl SearchSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_radius_miles: config.max_radius_miles,
            overpass_timeout_secs: config.overpass_timeout_secs,
            search_timeout: Duration::from_secs(config.search_timeout_secs),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_radius_miles: None,
            overpass_timeout_secs: 25,
            search_timeout: Duration::from_secs(40),
        }
    }
}

/// Stateless search service. Shared across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Locator {
    client: LocatorClient,
    categories: CategoryTable,
    settings: SearchSettings,
}

impl Locator {
    #[must_use]
    pub fn new(client: LocatorClient, categories: CategoryTable, settings: SearchSettings) -> Self {
        Self {
            client,
            categories,
            settings,
        }
    }

    /// Builds the client and settings from `config`.
    ///
    /// # Errors
    ///
    /// See [`LocatorClient::from_config`].
    pub fn from_config(config: &AppConfig, categories: CategoryTable) -> Result<Self, LocatorError> {
        let client = LocatorClient::from_config(config)?;
        Ok(Self::new(client, categories, SearchSettings::from_config(config)))
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    #[must_use]
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Renders the Overpass query a search around `center` would send.
    #[must_use]
    pub fn build_query(
        &self,
        center: Coordinate,
        radius_miles: f64,
        domain: SearchDomain,
    ) -> QuerySpec {
        build_query(
            center,
            radius_miles,
            domain,
            &self.categories,
            self.settings.overpass_timeout_secs,
        )
    }

    /// Runs one search end to end.
    ///
    /// Returns the ranked locations, possibly empty. Dropping the returned
    /// future aborts any in-flight upstream call.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidRequest`] if an operator cap is configured and
    ///   the radius exceeds it.
    /// - [`SearchError::GeocodeNotFound`] if the postal code does not resolve.
    /// - [`SearchError::UpstreamUnavailable`] if the POI query fails or the
    ///   search exceeds its time budget.
    pub async fn search(
        &self,
        request: &SearchRequest,
        domain: SearchDomain,
    ) -> Result<Vec<Location>, SearchError> {
        if let Some(max) = self.settings.max_radius_miles {
            if request.radius_miles > max {
                return Err(SearchError::InvalidRequest(format!(
                    "radius must not exceed {max} miles"
                )));
            }
        }

        let budget = self.settings.search_timeout;
        match tokio::time::timeout(budget, self.run(request, domain)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(%domain, timeout_secs = budget.as_secs(), "search timed out");
                Err(SearchError::UpstreamUnavailable {
                    reason: format!("search timed out after {}s", budget.as_secs()),
                })
            }
        }
    }

    async fn run(
        &self,
        request: &SearchRequest,
        domain: SearchDomain,
    ) -> Result<Vec<Location>, SearchError> {
        let center = self.resolve_center(request).await?;
        let query = self.build_query(center, request.radius_miles, domain);

        let candidates = self.client.run_overpass_query(&query).await.map_err(|e| {
            tracing::warn!(%domain, error = %e, "overpass query failed");
            SearchError::UpstreamUnavailable {
                reason: e.to_string(),
            }
        })?;

        let candidate_count = candidates.len();
        let locations = process_candidates(candidates, center, domain, &self.categories);

        tracing::info!(
            %domain,
            radius_miles = request.radius_miles,
            candidates = candidate_count,
            results = locations.len(),
            "search complete"
        );

        Ok(locations)
    }

    async fn resolve_center(&self, request: &SearchRequest) -> Result<Coordinate, SearchError> {
        if let Some(center) = request.center {
            return Ok(center);
        }

        let Some(postal_code) = request.postal_code.as_deref() else {
            return Err(SearchError::InvalidRequest(
                "either zipCode or lat/lon is required".to_string(),
            ));
        };

        let not_found = || SearchError::GeocodeNotFound {
            postal_code: postal_code.to_string(),
        };

        match self.client.geocode_postal_code(postal_code).await {
            Ok(Some(center)) => Ok(center),
            Ok(None) => {
                tracing::warn!(postal_code, "no geocode match");
                Err(not_found())
            }
            Err(e) => {
                tracing::warn!(postal_code, error = %e, "geocode request failed");
                Err(not_found())
            }
        }
    }
}

/// Turns raw elements into the ranked result list for `domain`.
///
/// Duplicate `(type, id)` pairs keep the first occurrence. Elements without
/// usable geometry are dropped.
#[must_use]
pub fn process_candidates(
    candidates: Vec<RawCandidate>,
    origin: Coordinate,
    domain: SearchDomain,
    table: &CategoryTable,
) -> Vec<Location> {
    let rules = table.rules(domain);
    let mut seen: HashSet<(ElementKind, i64)> = HashSet::with_capacity(candidates.len());
    let mut dropped = 0_usize;
    let mut locations = Vec::with_capacity(candidates.len());

    for raw in candidates {
        if !seen.insert((raw.kind, raw.id)) {
            continue;
        }

        let category = table.match_category(domain, &raw.tags);
        let Some(mut location) = normalize_candidate(&raw, category, rules, origin) else {
            dropped += 1;
            continue;
        };

        let classification = classify(&raw.tags, category, domain, rules);
        location.accepts_ebt = classification.accepts_ebt;
        location.well_stocked = classification.well_stocked;
        locations.push(location);
    }

    if dropped > 0 {
        tracing::debug!(%domain, dropped, "dropped candidates without geometry");
    }

    rank(locations, rules.result_limit)
}
