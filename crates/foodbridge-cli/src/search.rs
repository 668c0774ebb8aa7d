//! Search and query command handlers for the CLI.

use anyhow::Context;
use foodbridge_core::{AppConfig, CategoryTable, Location, SearchDomain};
use foodbridge_locator::{Locator, SearchRequest};

use crate::SearchArgs;

/// Run one search and print the results.
///
/// # Errors
///
/// Returns an error if the category table cannot be loaded, the request is
/// invalid, or the search fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    domain: SearchDomain,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let categories = foodbridge_core::load_categories(config.categories_path.as_deref())?;
    let locator = Locator::from_config(config, categories)?;

    let request = SearchRequest::from_parts(args.zip.as_deref(), args.lat, args.lon, args.radius)?;
    let results = locator.search(&request, domain).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(domain, &results);
    }

    Ok(())
}

/// Print the Overpass QL for a search around `lat`/`lon`.
///
/// # Errors
///
/// See [`render_query`].
pub(crate) fn run_query(
    config: &AppConfig,
    domain: SearchDomain,
    lat: f64,
    lon: f64,
    radius_miles: f64,
) -> anyhow::Result<()> {
    let categories = foodbridge_core::load_categories(config.categories_path.as_deref())?;
    let body = render_query(
        &categories,
        config.overpass_timeout_secs,
        domain,
        lat,
        lon,
        radius_miles,
    )?;
    println!("{body}");
    Ok(())
}

/// Render the Overpass QL a search would send, validating the inputs the
/// same way a search request does.
///
/// # Errors
///
/// Returns an error if the coordinates are out of range or the radius is not
/// a positive, finite number of miles.
pub(crate) fn render_query(
    categories: &CategoryTable,
    overpass_timeout_secs: u32,
    domain: SearchDomain,
    lat: f64,
    lon: f64,
    radius_miles: f64,
) -> anyhow::Result<String> {
    let request = SearchRequest::from_parts(None, Some(lat), Some(lon), Some(radius_miles))?;
    let center = request
        .center
        .with_context(|| format!("no search center for {lat}, {lon}"))?;

    let query = foodbridge_locator::build_query(
        center,
        request.radius_miles,
        domain,
        categories,
        overpass_timeout_secs,
    );
    Ok(query.body)
}

fn print_table(domain: SearchDomain, results: &[Location]) {
    if results.is_empty() {
        println!("no {domain} found");
        return;
    }

    println!(
        "{:<8}{:<36}{:<6}{:<8}ADDRESS",
        "MILES", "NAME", "EBT", "STOCKED"
    );
    for location in results {
        println!(
            "{:<8.2}{:<36}{:<6}{:<8}{}",
            location.distance_miles,
            truncate(&location.name, 34),
            flag(location.accepts_ebt),
            flag(location.well_stocked),
            location.address
        );
    }
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_string()
    }
}
