mod circle;
mod ring;

use geo::Coord;
use serde::Deserialize;

pub use circle::*;
pub use ring::*;

/// Mean Earth radius in meters.
pub const EARTH_MEAN_RADIUS: f64 = 6_371_000.0;

/// Bearing step between two generated ring points, in degrees.
pub const DEGREES_BETWEEN_POINTS: f64 = 8.0;

/// Upper bound on the distinct points of a ring, which bounds how fine the resolution may be.
pub const MAX_RING_POINTS: usize = 1 << 20;

pub const EPSILON: f64 = 0.000000001;


/// Whether sampling every `resolution` degrees gives between 1 and `MAX_RING_POINTS` points.
pub fn is_valid_resolution(resolution: f64) -> bool {
    resolution > 0.0 && resolution <= 360.0 && 360.0 / resolution <= MAX_RING_POINTS as f64
}


/// A position on the sphere, in degrees.
///
/// Values are not normalized: a longitude of 180.5 stays 180.5.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn shift_longitude(&self, delta: f64) -> Self {
        Self {
            longitude: self.longitude + delta,
            ..*self
        }
    }

    /// Bit-level equality, so that two NaN coordinates produced the same way compare equal.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl From<GeoPoint> for Coord {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.longitude, y: p.latitude }
    }
}

impl From<Coord> for GeoPoint {
    fn from(c: Coord) -> Self {
        GeoPoint::new(c.y, c.x)
    }
}


/// Great-circle distance between two points in meters, using the haversine formula.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_MEAN_RADIUS * c
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_one_degree_of_latitude() {
        let d = haversine_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        let expected = EARTH_MEAN_RADIUS * 1.0f64.to_radians();
        assert!((d - expected).abs() < 1e-6, "got {d}, expected {expected}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = GeoPoint::new(59.31, 18.06);
        let b = GeoPoint::new(48.85, 2.35);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < EPSILON);
        assert_eq!(haversine_distance(a, a), 0.0);
    }

    #[test]
    fn resolution_bounds() {
        assert!(is_valid_resolution(DEGREES_BETWEEN_POINTS));
        assert!(is_valid_resolution(360.0));
        assert!(is_valid_resolution(360.0 / MAX_RING_POINTS as f64));

        assert!(!is_valid_resolution(0.0));
        assert!(!is_valid_resolution(-8.0));
        assert!(!is_valid_resolution(360.5));
        assert!(!is_valid_resolution(f64::NAN));
        assert!(!is_valid_resolution(1e-300));
        assert!(!is_valid_resolution(f64::MIN_POSITIVE));
    }

    #[test]
    fn coord_conversion() {
        let p = GeoPoint::new(59.31, 18.06);
        let c: Coord = p.into();
        assert_eq!(c.x, 18.06);
        assert_eq!(c.y, 59.31);
        assert_eq!(GeoPoint::from(c), p);
    }

    #[test]
    fn nan_points_are_bit_equal() {
        let a = GeoPoint::new(f64::NAN, 1.0);
        let b = a;
        assert_ne!(a, b);
        assert!(a.bit_eq(&b));
    }
}
