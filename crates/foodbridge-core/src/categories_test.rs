use std::collections::HashMap;
use std::path::Path;

use super::*;

fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn builtin() -> CategoryTable {
    CategoryTable::builtin().expect("embedded category table should be valid")
}

#[test]
fn builtin_table_covers_both_domains() {
    let table = builtin();
    let stores: Vec<&str> = table
        .categories_for(SearchDomain::GroceryStores)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(stores, ["supermarket", "grocery", "convenience"]);

    let food_banks: Vec<&str> = table
        .categories_for(SearchDomain::FoodBanks)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(
        food_banks,
        [
            "food_bank",
            "social_facility_food_bank",
            "community_centre_food",
            "christian_place_of_worship",
            "charity_shop",
        ]
    );
}

#[test]
fn builtin_domain_limits() {
    let table = builtin();
    assert_eq!(table.rules(SearchDomain::GroceryStores).result_limit, 50);
    assert_eq!(table.rules(SearchDomain::FoodBanks).result_limit, 20);
    assert_eq!(
        table.rules(SearchDomain::GroceryStores).fallback_name,
        "Grocery Store"
    );
    assert_eq!(
        table.rules(SearchDomain::FoodBanks).fallback_name,
        "Food Assistance Location"
    );
}

#[test]
fn builtin_file_on_disk_matches_embedded_copy() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/categories.yaml");
    let table = load_categories(Some(&path)).expect("config/categories.yaml should load");
    assert_eq!(
        table.categories_for(SearchDomain::FoodBanks).count(),
        builtin().categories_for(SearchDomain::FoodBanks).count()
    );
}

#[test]
fn load_categories_without_path_uses_builtin() {
    let table = load_categories(None).expect("builtin");
    assert!(table
        .categories_for(SearchDomain::GroceryStores)
        .any(|c| c.id == "supermarket"));
}

#[test]
fn load_categories_reports_missing_file() {
    let err = load_categories(Some(Path::new("/nonexistent/categories.yaml"))).unwrap_err();
    assert!(matches!(err, ConfigError::CategoriesFileIo { .. }));
}

#[test]
fn match_category_requires_all_filters() {
    let table = builtin();
    let plain_social_facility = tags(&[("amenity", "social_facility")]);
    assert!(table
        .match_category(SearchDomain::FoodBanks, &plain_social_facility)
        .is_none());

    let food_bank_facility = tags(&[
        ("amenity", "social_facility"),
        ("social_facility", "food_bank"),
    ]);
    let matched = table
        .match_category(SearchDomain::FoodBanks, &food_bank_facility)
        .expect("should match");
    assert_eq!(matched.id, "social_facility_food_bank");
    assert!(matched.well_stocked);
}

#[test]
fn match_category_is_scoped_to_domain() {
    let table = builtin();
    let supermarket = tags(&[("shop", "supermarket")]);
    assert!(table
        .match_category(SearchDomain::FoodBanks, &supermarket)
        .is_none());
    assert_eq!(
        table
            .match_category(SearchDomain::GroceryStores, &supermarket)
            .map(|c| c.ebt),
        Some(Some(EbtLikelihood::Likely))
    );
}

#[test]
fn pattern_filters_use_unanchored_regex() {
    let table = builtin();
    let centre = tags(&[
        ("amenity", "community_centre"),
        ("community_centre:for", "youth;food_distribution"),
    ]);
    assert_eq!(
        table
            .match_category(SearchDomain::FoodBanks, &centre)
            .map(|c| c.id.as_str()),
        Some("community_centre_food")
    );

    let church_without_denomination = tags(&[
        ("amenity", "place_of_worship"),
        ("religion", "christian"),
        ("denomination", ""),
    ]);
    assert!(table
        .match_category(SearchDomain::FoodBanks, &church_without_denomination)
        .is_none());
}

#[test]
fn fallback_name_renders_prefix_from_tag_or_default() {
    let fallback = FallbackName {
        label: "Church".to_string(),
        prefix_tag: Some("denomination".to_string()),
        prefix_default: Some("Community".to_string()),
    };
    assert_eq!(
        fallback.render(&tags(&[("denomination", "lutheran")])),
        "lutheran Church"
    );
    assert_eq!(fallback.render(&tags(&[])), "Community Church");
    assert_eq!(
        fallback.render(&tags(&[("denomination", "  ")])),
        "Community Church"
    );

    let plain = FallbackName {
        label: "Charity Organization".to_string(),
        prefix_tag: None,
        prefix_default: None,
    };
    assert_eq!(plain.render(&tags(&[])), "Charity Organization");
}

#[test]
fn brand_markers_are_lowercased() {
    let yaml = r"
domains:
  grocery_stores:
    result_limit: 5
    name_tags: [name]
    fallback_name: Store
    well_stocked_brands: ['  Walmart ', '']
  food_banks:
    result_limit: 5
    name_tags: [name]
    fallback_name: Pantry
categories:
  - id: a
    domain: grocery_stores
    filters: [{ key: shop, equals: supermarket }]
  - id: b
    domain: food_banks
    filters: [{ key: amenity, equals: food_bank }]
";
    let table = CategoryTable::from_yaml_str(yaml).expect("valid table");
    assert_eq!(
        table.rules(SearchDomain::GroceryStores).well_stocked_brands,
        ["walmart"]
    );
    assert!(table
        .rules(SearchDomain::FoodBanks)
        .well_stocked_name_markers
        .is_empty());
}

const DOMAINS_YAML: &str = r"
domains:
  grocery_stores:
    result_limit: 5
    name_tags: [name]
    fallback_name: Store
  food_banks:
    result_limit: 5
    name_tags: [name]
    fallback_name: Pantry
";

fn table_with_categories(categories: &str) -> Result<CategoryTable, ConfigError> {
    CategoryTable::from_yaml_str(&format!("{DOMAINS_YAML}categories:\n{categories}"))
}

#[test]
fn validate_rejects_duplicate_ids() {
    let err = table_with_categories(
        "  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x }] }
  - { id: a, domain: food_banks, filters: [{ key: amenity, equals: y }] }
",
    )
    .unwrap_err();
    assert!(err.to_string().contains("duplicate category id"), "{err}");
}

#[test]
fn validate_rejects_domain_without_categories() {
    let err = table_with_categories(
        "  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x }] }\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("food_banks"), "{err}");
}

#[test]
fn validate_rejects_ebt_outside_grocery_domain() {
    let err = table_with_categories(
        "  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x }] }
  - { id: b, domain: food_banks, ebt: likely, filters: [{ key: amenity, equals: y }] }
",
    )
    .unwrap_err();
    assert!(err.to_string().contains("grocery_stores only"), "{err}");
}

#[test]
fn validate_rejects_filter_with_both_operators() {
    let err = table_with_categories(
        "  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x, matches: y }] }
  - { id: b, domain: food_banks, filters: [{ key: amenity, equals: y }] }
",
    )
    .unwrap_err();
    assert!(err.to_string().contains("exactly one"), "{err}");
}

#[test]
fn validate_rejects_invalid_pattern() {
    let err = table_with_categories(
        "  - { id: a, domain: grocery_stores, filters: [{ key: shop, matches: '(' }] }
  - { id: b, domain: food_banks, filters: [{ key: amenity, equals: y }] }
",
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid pattern"), "{err}");
}

#[test]
fn validate_rejects_zero_result_limit() {
    let yaml = r"
domains:
  grocery_stores:
    result_limit: 0
    name_tags: [name]
    fallback_name: Store
  food_banks:
    result_limit: 5
    name_tags: [name]
    fallback_name: Pantry
categories:
  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x }] }
  - { id: b, domain: food_banks, filters: [{ key: amenity, equals: y }] }
";
    let err = CategoryTable::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("result_limit"), "{err}");
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = CategoryTable::from_yaml_str("domains: [").unwrap_err();
    assert!(matches!(err, ConfigError::CategoriesFileParse(_)));
}

#[test]
fn builtin_name_tags_differ_per_domain() {
    let table = CategoryTable::builtin().expect("builtin table");
    assert_eq!(table.rules(SearchDomain::GroceryStores).name_tags, ["name", "brand"]);
    assert_eq!(table.rules(SearchDomain::FoodBanks).name_tags, ["name", "operator"]);
}

#[test]
fn validate_rejects_empty_name_tags() {
    let yaml = r"
domains:
  grocery_stores:
    result_limit: 5
    name_tags: ['']
    fallback_name: Store
  food_banks:
    result_limit: 5
    name_tags: [name]
    fallback_name: Pantry
categories:
  - { id: a, domain: grocery_stores, filters: [{ key: shop, equals: x }] }
  - { id: b, domain: food_banks, filters: [{ key: amenity, equals: y }] }
";
    let err = CategoryTable::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("name tag"), "{err}");
}
