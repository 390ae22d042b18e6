use log::debug;

use super::{is_valid_resolution, GeoPoint, GeoRing, DEGREES_BETWEEN_POINTS, EARTH_MEAN_RADIUS, MAX_RING_POINTS};


/// A circle on the sphere: every point at `radius` meters (great-circle) from `center`.
#[derive(Clone, Copy, Debug)]
pub struct GeoCircle {
    center: GeoPoint,
    radius: f64,
}

impl GeoCircle {
    /// The radius is not validated: zero collapses the ring onto the center,
    /// negative or NaN values flow through the trigonometry as they are.
    pub fn new(center: GeoPoint, radius: f64) -> Self {
        Self {
            center,
            radius,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn polygonize(&self) -> GeoRing {
        self.polygonize_with_resolution(DEGREES_BETWEEN_POINTS)
    }

    /// Sample the circle every `resolution` degrees of bearing, starting due north.
    ///
    /// The ring has `floor(360 / resolution) + 1` points, the last one a copy of the first.
    /// Nothing is wrapped: longitudes may leave [-180, 180) near the antimeridian.
    pub fn polygonize_with_resolution(&self, resolution: f64) -> GeoRing {
        assert!(is_valid_resolution(resolution), "Bearing resolution {resolution} is out of (0, 360] or yields more than {MAX_RING_POINTS} points");

        let count = (360.0 / resolution).floor() as usize;

        let dist = self.radius / EARTH_MEAN_RADIUS;
        let lat = self.center.latitude.to_radians();
        let lon = self.center.longitude.to_radians();

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dist, cos_dist) = dist.sin_cos();

        debug!("Polygonizing a circle of {} m around {:?}: {count} points every {resolution} deg", self.radius, self.center);

        let points = (0..count)
            .map(|i| {
                let bearing = (i as f64 * resolution).to_radians();

                let point_lat = (sin_lat * cos_dist + cos_lat * sin_dist * bearing.cos()).asin();
                let point_lon = lon + (bearing.sin() * sin_dist * cos_lat).atan2(cos_dist - sin_lat * point_lat.sin());

                GeoPoint::new(point_lat.to_degrees(), point_lon.to_degrees())
            })
            .collect();

        GeoRing::close(points)
    }
}


/// Approximate a circle of `radius` meters around `center` with a closed 46-point ring.
pub fn polygon_circle(center: GeoPoint, radius: f64) -> GeoRing {
    GeoCircle::new(center, radius).polygonize()
}
