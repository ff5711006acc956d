//! Spherical-earth geodesic helpers.
//!
//! Overlay placement and the "move by distance and bearing" operation need
//! to offset geographic points by metric distances. A spherical model is
//! accurate to well under a centimeter at building scale.

use geo_types::Coord;

/// Earth radius in meters (WGS84 equatorial, as used by web mapping APIs).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Returns the point `distance_m` meters from `origin` along the great
/// circle with initial bearing `bearing_deg` (clockwise from north).
pub fn offset(origin: Coord<f64>, distance_m: f64, bearing_deg: f64) -> Coord<f64> {
    let d = distance_m / EARTH_RADIUS_M;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.y.to_radians();
    let lng1 = origin.x.to_radians();

    let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());

    Coord {
        x: lng2.to_degrees(),
        y: lat2.to_degrees(),
    }
}

/// Great-circle distance between two points in meters (haversine).
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlat = (b.y - a.y).to_radians();
    let dlng = (b.x - a.x).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
pub fn bearing(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlng = (b.x - a.x).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wraps an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMPUS: Coord<f64> = Coord {
        x: -79.945_130,
        y: 40.443_420,
    };

    #[test]
    fn test_offset_north_increases_latitude() {
        let moved = offset(CAMPUS, 100.0, 0.0);
        assert!(moved.y > CAMPUS.y);
        assert!((moved.x - CAMPUS.x).abs() < 1e-9);
    }

    #[test]
    fn test_offset_east_increases_longitude() {
        let moved = offset(CAMPUS, 100.0, 90.0);
        assert!(moved.x > CAMPUS.x);
        // Slight latitude drift is expected on a great circle, but tiny.
        assert!((moved.y - CAMPUS.y).abs() < 1e-6);
    }

    #[test]
    fn test_offset_round_trip() {
        let moved = offset(CAMPUS, 250.0, 37.0);
        assert!((distance(CAMPUS, moved) - 250.0).abs() < 0.01);
        assert!((bearing(CAMPUS, moved) - 37.0).abs() < 0.01);
    }

    #[test]
    fn test_opposite_bearings_cancel() {
        let there = offset(CAMPUS, 500.0, 123.0);
        let back = offset(there, 500.0, 123.0 + 180.0);
        assert!(distance(CAMPUS, back) < 0.01);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }
}
