//! Great-circle distance and unit conversion.

use crate::domain::Coordinate;

/// Mean Earth radius used for all distance figures shown to users.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Miles-to-meters factor used when building radius filters for Overpass.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Haversine distance between two coordinates, in miles.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat().to_radians().cos() * b.lat().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}
