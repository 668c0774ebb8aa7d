use foodbridge_core::Location;

/// Sorts by ascending distance and keeps the `limit` nearest.
///
/// The sort is stable, so equidistant locations keep their input order.
#[must_use]
pub fn rank(mut locations: Vec<Location>, limit: usize) -> Vec<Location> {
    locations.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    locations.truncate(limit);
    locations
}

#[cfg(test)]
mod tests {
    use foodbridge_core::Coordinate;

    use super::*;

    fn at(name: &str, distance_miles: f64) -> Location {
        Location {
            name: name.to_string(),
            address: "Address not available".to_string(),
            distance_miles,
            phone: None,
            hours: None,
            coordinates: Coordinate::new(0.0, 0.0).expect("valid"),
            accepts_ebt: None,
            well_stocked: None,
        }
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_by_distance() {
        let ranked = rank(vec![at("c", 3.0), at("a", 1.0), at("b", 2.0)], 10);
        assert_eq!(names(&ranked), ["a", "b", "c"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank(vec![at("x", 1.0), at("y", 0.5), at("z", 1.0)], 10);
        assert_eq!(names(&ranked), ["y", "x", "z"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let once = rank(vec![at("c", 3.0), at("a", 1.0), at("d", 1.0), at("b", 2.0)], 10);
        let twice = rank(once.clone(), 10);
        assert_eq!(once, twice);
    }

    #[test]
    fn truncation_keeps_the_nearest() {
        let input: Vec<Location> = (0..30)
            .rev()
            .map(|i| at(&i.to_string(), f64::from(i)))
            .collect();
        let ranked = rank(input, 20);
        assert_eq!(ranked.len(), 20);
        assert!(ranked.iter().all(|l| l.distance_miles < 20.0));
        assert_eq!(ranked[0].name, "0");
    }

    #[test]
    fn limit_above_len_returns_all() {
        assert_eq!(rank(vec![at("a", 1.0)], 50).len(), 1);
        assert!(rank(Vec::new(), 50).is_empty());
    }
}
