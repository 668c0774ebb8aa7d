//! Point-of-interest category table.
//!
//! The table maps OpenStreetMap tag filters to a [`SearchDomain`] along with
//! the per-category classification hints (EBT likelihood, well-stocked flag,
//! synthesized name). It drives both Overpass query generation and local
//! recognition of returned elements, so the two cannot drift apart.
//!
//! The default table ships in `config/categories.yaml` and is embedded at
//! build time; [`load_categories`] accepts an override path.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::domain::SearchDomain;
use crate::ConfigError;

const BUILTIN_CATEGORIES: &str = include_str!("../../../config/categories.yaml");

/// How likely a category is to accept EBT payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EbtLikelihood {
    Likely,
    Unlikely,
}

impl EbtLikelihood {
    #[must_use]
    pub fn as_bool(self) -> bool {
        matches!(self, EbtLikelihood::Likely)
    }
}

/// Name synthesized for a candidate that carries no usable name tag.
///
/// Renders as `label`, or `"{prefix} {label}"` when `prefix_tag` is set; the
/// prefix comes from that tag, falling back to `prefix_default`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FallbackName {
    pub label: String,
    #[serde(default)]
    pub prefix_tag: Option<String>,
    #[serde(default)]
    pub prefix_default: Option<String>,
}

impl FallbackName {
    #[must_use]
    pub fn render(&self, tags: &HashMap<String, String>) -> String {
        let Some(prefix_tag) = self.prefix_tag.as_deref() else {
            return self.label.clone();
        };

        let prefix = tags
            .get(prefix_tag)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .or(self.prefix_default.as_deref());

        match prefix {
            Some(prefix) => format!("{prefix} {}", self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum TagMatcher {
    Equals(String),
    Pattern(Regex),
}

/// A single `["key"="value"]` or `["key"~"pattern"]` condition.
#[derive(Debug, Clone)]
pub struct TagFilter {
    key: String,
    matcher: TagMatcher,
}

impl TagFilter {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overpass QL operator for this filter: `=` or `~`.
    #[must_use]
    pub fn operator(&self) -> &'static str {
        match self.matcher {
            TagMatcher::Equals(_) => "=",
            TagMatcher::Pattern(_) => "~",
        }
    }

    /// The literal value or regex source.
    #[must_use]
    pub fn value(&self) -> &str {
        match &self.matcher {
            TagMatcher::Equals(value) => value,
            TagMatcher::Pattern(re) => re.as_str(),
        }
    }

    #[must_use]
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        let Some(value) = tags.get(&self.key) else {
            return false;
        };
        match &self.matcher {
            TagMatcher::Equals(expected) => value == expected,
            TagMatcher::Pattern(re) => re.is_match(value),
        }
    }
}

/// One row of the category table.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub id: String,
    pub domain: SearchDomain,
    pub filters: Vec<TagFilter>,
    pub ebt: Option<EbtLikelihood>,
    pub well_stocked: bool,
    pub fallback_name: Option<FallbackName>,
}

impl CategoryRule {
    /// True when every filter of this category matches the tag set.
    #[must_use]
    pub fn matches(&self, tags: &HashMap<String, String>) -> bool {
        self.filters.iter().all(|f| f.matches(tags))
    }
}

/// Domain-wide defaults and classification markers.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainRules {
    pub result_limit: usize,
    /// Tags tried in order for a location's name before any fallback.
    pub name_tags: Vec<String>,
    pub fallback_name: String,
    #[serde(default)]
    pub well_stocked_brands: Vec<String>,
    #[serde(default)]
    pub well_stocked_name_markers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryTable {
    grocery_stores: DomainRules,
    food_banks: DomainRules,
    categories: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Parses the table embedded from `config/categories.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded table fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATEGORIES)
    }

    /// Parses and validates a category table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CategoriesFileParse`] for malformed YAML and
    /// [`ConfigError::Validation`] for structurally invalid tables.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawCategoriesFile = serde_yaml::from_str(content)?;
        raw.compile()
    }

    #[must_use]
    pub fn rules(&self, domain: SearchDomain) -> &DomainRules {
        match domain {
            SearchDomain::GroceryStores => &self.grocery_stores,
            SearchDomain::FoodBanks => &self.food_banks,
        }
    }

    /// Categories belonging to `domain`, in table order.
    pub fn categories_for(&self, domain: SearchDomain) -> impl Iterator<Item = &CategoryRule> {
        self.categories.iter().filter(move |c| c.domain == domain)
    }

    /// First category of `domain` whose filters all match `tags`.
    #[must_use]
    pub fn match_category(
        &self,
        domain: SearchDomain,
        tags: &HashMap<String, String>,
    ) -> Option<&CategoryRule> {
        self.categories_for(domain).find(|c| c.matches(tags))
    }
}

/// Load the category table from `path`, or the embedded default when `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: Option<&Path>) -> Result<CategoryTable, ConfigError> {
    let Some(path) = path else {
        return CategoryTable::builtin();
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    CategoryTable::from_yaml_str(&content)
}

#[derive(Debug, Deserialize)]
struct RawCategoriesFile {
    domains: RawDomains,
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawDomains {
    grocery_stores: DomainRules,
    food_banks: DomainRules,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    domain: SearchDomain,
    filters: Vec<RawTagFilter>,
    #[serde(default)]
    ebt: Option<EbtLikelihood>,
    #[serde(default)]
    well_stocked: bool,
    #[serde(default)]
    fallback_name: Option<FallbackName>,
}

#[derive(Debug, Deserialize)]
struct RawTagFilter {
    key: String,
    #[serde(default)]
    equals: Option<String>,
    #[serde(default)]
    matches: Option<String>,
}

impl RawCategoriesFile {
    fn compile(self) -> Result<CategoryTable, ConfigError> {
        let grocery_stores = compile_domain(SearchDomain::GroceryStores, self.domains.grocery_stores)?;
        let food_banks = compile_domain(SearchDomain::FoodBanks, self.domains.food_banks)?;

        let mut seen_ids = HashSet::new();
        let mut categories = Vec::with_capacity(self.categories.len());
        for raw in self.categories {
            if raw.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "category id must be non-empty".to_string(),
                ));
            }
            if !seen_ids.insert(raw.id.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category id: '{}'",
                    raw.id
                )));
            }
            categories.push(compile_category(raw)?);
        }

        for domain in SearchDomain::ALL {
            if !categories.iter().any(|c| c.domain == domain) {
                return Err(ConfigError::Validation(format!(
                    "domain '{domain}' has no categories"
                )));
            }
        }

        Ok(CategoryTable {
            grocery_stores,
            food_banks,
            categories,
        })
    }
}

fn compile_domain(domain: SearchDomain, mut rules: DomainRules) -> Result<DomainRules, ConfigError> {
    if rules.result_limit == 0 {
        return Err(ConfigError::Validation(format!(
            "domain '{domain}' result_limit must be greater than zero"
        )));
    }
    rules.name_tags.retain(|t| !t.trim().is_empty());
    if rules.name_tags.is_empty() {
        return Err(ConfigError::Validation(format!(
            "domain '{domain}' must list at least one name tag"
        )));
    }
    if rules.fallback_name.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "domain '{domain}' fallback_name must be non-empty"
        )));
    }

    let lower = |markers: Vec<String>| -> Vec<String> {
        markers
            .into_iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    };
    rules.well_stocked_brands = lower(rules.well_stocked_brands);
    rules.well_stocked_name_markers = lower(rules.well_stocked_name_markers);

    Ok(rules)
}

fn compile_category(raw: RawCategory) -> Result<CategoryRule, ConfigError> {
    if raw.filters.is_empty() {
        return Err(ConfigError::Validation(format!(
            "category '{}' must declare at least one filter",
            raw.id
        )));
    }

    if raw.ebt.is_some() && raw.domain != SearchDomain::GroceryStores {
        return Err(ConfigError::Validation(format!(
            "category '{}' sets ebt but EBT estimates apply to grocery_stores only",
            raw.id
        )));
    }

    if let Some(fallback) = &raw.fallback_name {
        if fallback.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' fallback_name.label must be non-empty",
                raw.id
            )));
        }
    }

    let filters = raw
        .filters
        .into_iter()
        .map(|f| compile_filter(&raw.id, f))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CategoryRule {
        id: raw.id,
        domain: raw.domain,
        filters,
        ebt: raw.ebt,
        well_stocked: raw.well_stocked,
        fallback_name: raw.fallback_name,
    })
}

fn compile_filter(category_id: &str, raw: RawTagFilter) -> Result<TagFilter, ConfigError> {
    if raw.key.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "category '{category_id}' has a filter with an empty key"
        )));
    }

    let matcher = match (raw.equals, raw.matches) {
        (Some(value), None) => TagMatcher::Equals(value),
        (None, Some(pattern)) => {
            let re = Regex::new(&pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "category '{category_id}' filter on '{}' has an invalid pattern: {e}",
                    raw.key
                ))
            })?;
            TagMatcher::Pattern(re)
        }
        _ => {
            return Err(ConfigError::Validation(format!(
                "category '{category_id}' filter on '{}' must set exactly one of equals/matches",
                raw.key
            )))
        }
    };

    Ok(TagFilter {
        key: raw.key,
        matcher,
    })
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
