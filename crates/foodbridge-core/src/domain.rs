//! Value types shared by the locator pipeline, the HTTP server, and the CLI.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair. Construct through [`Coordinate::new`] so the
/// range invariant holds everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Returns `None` unless both values are finite and within
    /// `[-90, 90]` / `[-180, 180]`.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        (lat_ok && lon_ok).then_some(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// The search category context. Determines which point-of-interest
/// categories are queried, the result limit, and the classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDomain {
    GroceryStores,
    FoodBanks,
}

impl SearchDomain {
    pub const ALL: [SearchDomain; 2] = [SearchDomain::GroceryStores, SearchDomain::FoodBanks];
}

impl std::fmt::Display for SearchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDomain::GroceryStores => write!(f, "grocery_stores"),
            SearchDomain::FoodBanks => write!(f, "food_banks"),
        }
    }
}

/// A normalized, classified search result.
///
/// Serializes to the public wire shape: coordinates are flattened into
/// `lat`/`lon`, and the optional fields are omitted rather than defaulted so
/// that "unknown" never reads as "no".
///
/// `accepts_ebt` and `well_stocked` are heuristic estimates derived from
/// OpenStreetMap tags. They are not verified against any EBT retailer
/// registry or inventory feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    #[serde(rename = "distance")]
    pub distance_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(flatten)]
    pub coordinates: Coordinate,
    #[serde(rename = "acceptsEBT", skip_serializing_if = "Option::is_none")]
    pub accepts_ebt: Option<bool>,
    #[serde(rename = "wellStocked", skip_serializing_if = "Option::is_none")]
    pub well_stocked: Option<bool>,
}
