//! Overpass API response types.
//!
//! ## Observed shape (`[out:json]` with `out center;`)
//!
//! ### Elements
//! Nodes carry `lat`/`lon` directly. Ways and relations carry neither; with
//! `out center;` they get a `center: {lat, lon}` object instead. An element
//! may have neither when the upstream geometry is broken, in which case it
//! is dropped during normalization.
//!
//! ### Tags
//! A flat object of string keys to string values. Absent entirely on
//! untagged elements, so `#[serde(default)]` maps that to an empty map.
//!
//! ### Malformed elements
//! `elements` is decoded item by item. An element that fails to decode is
//! skipped instead of failing the whole response.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

/// One element of an Overpass result, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidate {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Top-level Overpass response envelope with elements left undecoded.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassEnvelope {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
    /// Overpass reports runtime errors (e.g. query timeout) here while still
    /// returning HTTP 200.
    #[serde(default)]
    pub remark: Option<String>,
}
