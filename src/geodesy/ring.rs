use std::ops::Index;

use geo::{Coord, LineString, Polygon};

use super::GeoPoint;


/// An ordered sequence of points whose last point repeats the first.
#[derive(Clone, Debug, Default)]
pub struct GeoRing(Vec<GeoPoint>);

impl GeoRing {
    /// Closes the ring by appending a copy of its first point.
    pub fn close(mut points: Vec<GeoPoint>) -> Self {
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.0.last()
    }

    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => a.bit_eq(b),
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.0.iter()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    /// Points without the closing duplicate.
    pub fn distinct(&self) -> &[GeoPoint] {
        match self.0.len() {
            0 => &self.0,
            n => &self.0[..n - 1],
        }
    }

    pub fn bit_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.bit_eq(b))
    }
}

impl Index<usize> for GeoRing {
    type Output = GeoPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for GeoRing {
    type Item = GeoPoint;
    type IntoIter = std::vec::IntoIter<GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<GeoRing> for LineString {
    fn from(ring: GeoRing) -> Self {
        ring.into_iter().map(Coord::<f64>::from).collect()
    }
}

impl From<GeoRing> for Polygon {
    fn from(ring: GeoRing) -> Self {
        Polygon::new(ring.into(), vec![])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_repeats_first_point() {
        let ring = GeoRing::close(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
        ]);

        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());
        assert_eq!(ring.distinct().len(), 3);
    }

    #[test]
    fn empty_ring_is_not_closed() {
        let ring = GeoRing::close(vec![]);
        assert!(ring.is_empty());
        assert!(!ring.is_closed());
        assert!(ring.distinct().is_empty());
    }

    #[test]
    fn into_polygon_exterior() {
        let ring = crate::geodesy::polygon_circle(GeoPoint::new(59.31, 18.06), 2500.0);
        let polygon: Polygon = ring.into();

        assert_eq!(polygon.exterior().0.len(), 46);
        assert!(polygon.exterior().is_closed());
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn into_line_string_keeps_closure() {
        let ring = GeoRing::close(vec![
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(11.0, 20.0),
            GeoPoint::new(11.0, 21.0),
        ]);

        let ls: LineString = ring.into();
        assert!(ls.is_closed());
        assert_eq!(ls.0[1].x, 20.0);
        assert_eq!(ls.0[1].y, 11.0);
    }
}
