//! Food-assistance and grocery-store search over OpenStreetMap.
//!
//! Pipeline: resolve a center (Nominatim, when only a postal code is given),
//! build an Overpass QL query from the category table, execute it, then
//! normalize, classify and rank the returned elements.

pub mod classify;
pub mod client;
pub mod error;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod search;
pub mod types;

pub use classify::{classify, Classification};
pub use client::LocatorClient;
pub use error::{LocatorError, SearchError};
pub use normalize::{normalize_candidate, ADDRESS_NOT_AVAILABLE};
pub use query::{build_query, QuerySpec};
pub use rank::rank;
pub use search::{process_candidates, Locator, SearchRequest, SearchSettings, DEFAULT_RADIUS_MILES};
pub use types::{ElementCenter, ElementKind, RawCandidate};
