//! Overpass QL generation from the category table.

use foodbridge_core::{miles_to_meters, CategoryTable, Coordinate, SearchDomain, TagFilter};

/// Geometries requested for every category. `out center;` gives ways a
/// representative point.
const GEOMETRIES: [&str; 2] = ["node", "way"];

/// A fully rendered Overpass query plus the parameters it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub domain: SearchDomain,
    pub center: Coordinate,
    pub radius_meters: f64,
    /// Server-side timeout in the `[timeout:N]` header.
    pub timeout_secs: u32,
    /// The Overpass QL text, sent as the POST body.
    pub body: String,
}

/// Builds the Overpass query for every category of `domain` around `center`.
///
/// Each category becomes one `node` and one `way` statement inside a union,
/// with all of its tag filters applied and an `around` radius filter.
#[must_use]
pub fn build_query(
    center: Coordinate,
    radius_miles: f64,
    domain: SearchDomain,
    table: &CategoryTable,
    timeout_secs: u32,
) -> QuerySpec {
    let radius_meters = miles_to_meters(radius_miles);
    let around = format!(
        "(around:{radius_meters:.1},{},{})",
        center.lat(),
        center.lon()
    );

    let mut body = format!("[out:json][timeout:{timeout_secs}];\n(\n");
    for category in table.categories_for(domain) {
        let filters: String = category.filters.iter().map(render_filter).collect();
        for geometry in GEOMETRIES {
            body.push_str(&format!("  {geometry}{filters}{around};\n"));
        }
    }
    body.push_str(");\nout center;");

    tracing::debug!(
        %domain,
        radius_meters,
        statements = body.lines().count().saturating_sub(4),
        "built overpass query"
    );

    QuerySpec {
        domain,
        center,
        radius_meters,
        timeout_secs,
        body,
    }
}

fn render_filter(filter: &TagFilter) -> String {
    format!(
        "[\"{}\"{}\"{}\"]",
        escape(filter.key()),
        filter.operator(),
        escape(filter.value())
    )
}

/// Escapes a value for use inside a double-quoted Overpass QL string.
fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
