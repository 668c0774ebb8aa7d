//! Heuristic EBT and well-stocked flags.
//!
//! Both flags are estimates derived from OpenStreetMap tags. Nothing here is
//! checked against an EBT retailer registry or an inventory feed. A flag with
//! no supporting rule stays `None` (unknown) and is never reported as `false`.

use std::collections::HashMap;

use foodbridge_core::{CategoryRule, DomainRules, SearchDomain};

use crate::normalize::tag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub accepts_ebt: Option<bool>,
    pub well_stocked: Option<bool>,
}

/// Classifies one element given its matched category.
#[must_use]
pub fn classify(
    tags: &HashMap<String, String>,
    category: Option<&CategoryRule>,
    domain: SearchDomain,
    rules: &DomainRules,
) -> Classification {
    let accepts_ebt = match domain {
        SearchDomain::GroceryStores => category.and_then(|c| c.ebt).map(|e| e.as_bool()),
        SearchDomain::FoodBanks => None,
    };

    let by_category = category.is_some_and(|c| c.well_stocked);
    let by_brand = contains_marker(tag(tags, "brand"), &rules.well_stocked_brands);
    let by_name = contains_marker(tag(tags, "name"), &rules.well_stocked_name_markers);

    Classification {
        accepts_ebt,
        well_stocked: (by_category || by_brand || by_name).then_some(true),
    }
}

/// Case-insensitive substring match; `markers` are already lowercase.
fn contains_marker(value: Option<&str>, markers: &[String]) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.to_lowercase();
    markers.iter().any(|m| value.contains(m.as_str()))
}
