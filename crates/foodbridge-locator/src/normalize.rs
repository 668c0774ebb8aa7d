//! Maps raw Overpass elements to [`Location`] values.
//!
//! Normalization never fails the batch: an element without usable geometry
//! yields `None` and is dropped by the caller.

use std::collections::HashMap;

use foodbridge_core::{distance_miles, CategoryRule, Coordinate, DomainRules, Location};

use crate::types::RawCandidate;

/// Address used when an element carries no `addr:*` tags.
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

const ADDRESS_KEYS: [&str; 5] = [
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:state",
    "addr:postcode",
];

/// Normalizes one element relative to `origin`.
///
/// `category` is the matched category row, if any; it supplies the
/// synthesized name when the element has no name tags. Classification flags
/// are left unset.
#[must_use]
pub fn normalize_candidate(
    raw: &RawCandidate,
    category: Option<&CategoryRule>,
    rules: &DomainRules,
    origin: Coordinate,
) -> Option<Location> {
    let coordinates = resolve_coordinate(raw)?;

    Some(Location {
        name: resolve_name(&raw.tags, category, rules),
        address: compose_address(&raw.tags),
        distance_miles: distance_miles(origin, coordinates),
        phone: tag(&raw.tags, "phone")
            .or_else(|| tag(&raw.tags, "contact:phone"))
            .map(str::to_string),
        hours: tag(&raw.tags, "opening_hours").map(str::to_string),
        coordinates,
        accepts_ebt: None,
        well_stocked: None,
    })
}

/// Direct `lat`/`lon` first, then the `out center;` point.
fn resolve_coordinate(raw: &RawCandidate) -> Option<Coordinate> {
    if let (Some(lat), Some(lon)) = (raw.lat, raw.lon) {
        if let Some(coordinate) = Coordinate::new(lat, lon) {
            return Some(coordinate);
        }
    }
    raw.center
        .and_then(|center| Coordinate::new(center.lat, center.lon))
}

fn resolve_name(
    tags: &HashMap<String, String>,
    category: Option<&CategoryRule>,
    rules: &DomainRules,
) -> String {
    rules
        .name_tags
        .iter()
        .find_map(|key| tag(tags, key))
        .map(str::to_string)
        .or_else(|| {
            category
                .and_then(|c| c.fallback_name.as_ref())
                .map(|fallback| fallback.render(tags))
        })
        .unwrap_or_else(|| rules.fallback_name.clone())
}

fn compose_address(tags: &HashMap<String, String>) -> String {
    let parts: Vec<&str> = ADDRESS_KEYS
        .into_iter()
        .filter_map(|key| tag(tags, key))
        .collect();

    if parts.is_empty() {
        ADDRESS_NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

/// A tag value, treating blank values as absent.
pub(crate) fn tag<'a>(tags: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use foodbridge_core::{CategoryTable, SearchDomain};

    use super::*;
    use crate::types::{ElementCenter, ElementKind};

    fn origin() -> Coordinate {
        Coordinate::new(40.7506, -73.9972).expect("valid")
    }

    fn candidate(lat: Option<f64>, lon: Option<f64>, tags: &[(&str, &str)]) -> RawCandidate {
        RawCandidate {
            kind: ElementKind::Node,
            id: 1,
            lat,
            lon,
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    fn normalize(raw: &RawCandidate, domain: SearchDomain) -> Option<Location> {
        let table = CategoryTable::builtin().expect("builtin");
        let category = table.match_category(domain, &raw.tags);
        normalize_candidate(raw, category, table.rules(domain), origin())
    }

    #[test]
    fn charity_without_name_or_address_gets_fallbacks() {
        let raw = candidate(Some(40.76), Some(-73.99), &[("shop", "charity")]);
        let location = normalize(&raw, SearchDomain::FoodBanks).expect("kept");
        assert_eq!(location.name, "Charity Organization");
        assert_eq!(location.address, ADDRESS_NOT_AVAILABLE);
    }

    #[test]
    fn church_name_uses_denomination() {
        let raw = candidate(
            Some(40.76),
            Some(-73.99),
            &[
                ("amenity", "place_of_worship"),
                ("religion", "christian"),
                ("denomination", "methodist"),
            ],
        );
        let location = normalize(&raw, SearchDomain::FoodBanks).expect("kept");
        assert_eq!(location.name, "methodist Church");
    }

    #[test]
    fn grocery_name_prefers_name_then_brand() {
        let raw = candidate(
            Some(40.76),
            Some(-73.99),
            &[("shop", "supermarket"), ("name", " "), ("operator", "Co-op"), ("brand", "Acme")],
        );
        assert_eq!(normalize(&raw, SearchDomain::GroceryStores).expect("kept").name, "Acme");

        let raw = candidate(Some(40.76), Some(-73.99), &[("shop", "supermarket"), ("operator", "Co-op")]);
        assert_eq!(
            normalize(&raw, SearchDomain::GroceryStores).expect("kept").name,
            "Grocery Store"
        );
    }

    #[test]
    fn food_bank_name_prefers_name_then_operator_and_ignores_brand() {
        let raw = candidate(
            Some(40.76),
            Some(-73.99),
            &[("amenity", "food_bank"), ("operator", "City Harvest"), ("brand", "Acme")],
        );
        assert_eq!(normalize(&raw, SearchDomain::FoodBanks).expect("kept").name, "City Harvest");

        let raw = candidate(Some(40.76), Some(-73.99), &[("shop", "charity"), ("brand", "Goodwill")]);
        assert_eq!(
            normalize(&raw, SearchDomain::FoodBanks).expect("kept").name,
            "Charity Organization"
        );
    }

    #[test]
    fn unmatched_element_gets_domain_fallback_name() {
        let raw = candidate(Some(40.76), Some(-73.99), &[]);
        assert_eq!(
            normalize(&raw, SearchDomain::GroceryStores).expect("kept").name,
            "Grocery Store"
        );
        assert_eq!(
            normalize(&raw, SearchDomain::FoodBanks).expect("kept").name,
            "Food Assistance Location"
        );
    }

    #[test]
    fn address_joins_present_parts_in_order() {
        let raw = candidate(
            Some(40.76),
            Some(-73.99),
            &[
                ("addr:postcode", "10001"),
                ("addr:street", "W 34th St"),
                ("addr:housenumber", "123"),
                ("addr:city", ""),
                ("addr:state", "NY"),
            ],
        );
        let location = normalize(&raw, SearchDomain::GroceryStores).expect("kept");
        assert_eq!(location.address, "123, W 34th St, NY, 10001");
    }

    #[test]
    fn phone_falls_back_to_contact_phone_and_hours_pass_through() {
        let raw = candidate(
            Some(40.76),
            Some(-73.99),
            &[("contact:phone", "+1 212-555-0100"), ("opening_hours", "Mo-Sa 09:00-17:00")],
        );
        let location = normalize(&raw, SearchDomain::FoodBanks).expect("kept");
        assert_eq!(location.phone.as_deref(), Some("+1 212-555-0100"));
        assert_eq!(location.hours.as_deref(), Some("Mo-Sa 09:00-17:00"));
    }

    #[test]
    fn way_center_is_used_when_direct_coordinates_are_missing() {
        let mut raw = candidate(None, None, &[]);
        raw.kind = ElementKind::Way;
        raw.center = Some(ElementCenter { lat: 40.7506, lon: -73.9972 });
        let location = normalize(&raw, SearchDomain::FoodBanks).expect("kept");
        assert!(location.distance_miles.abs() < 1e-9);
    }

    #[test]
    fn out_of_range_direct_coordinates_fall_back_to_center() {
        let mut raw = candidate(Some(123.0), Some(-73.99), &[]);
        raw.center = Some(ElementCenter { lat: 40.8, lon: -73.99 });
        let location = normalize(&raw, SearchDomain::FoodBanks).expect("kept");
        assert!((location.coordinates.lat() - 40.8).abs() < 1e-9);
    }

    #[test]
    fn element_without_geometry_is_dropped() {
        let raw = candidate(None, Some(-73.99), &[("shop", "grocery")]);
        assert!(normalize(&raw, SearchDomain::GroceryStores).is_none());
    }

    #[test]
    fn distance_is_measured_from_origin() {
        let raw = candidate(Some(40.7506 + 0.028_944), Some(-73.9972), &[]);
        let location = normalize(&raw, SearchDomain::GroceryStores).expect("kept");
        assert!((location.distance_miles - 2.0).abs() < 0.01, "{}", location.distance_miles);
    }
}
