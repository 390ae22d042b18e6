use std::fmt::Write;

use crate::geodesy::GeoRing;

/// One `latitude,longitude` line per ring point, closing point included.
pub fn format_ring(ring: &GeoRing) -> String {
    let mut out = String::new();
    for p in ring.iter() {
        // Writing into a String does not fail
        let _ = writeln!(out, "{},{}", p.latitude, p.longitude);
    }
    out
}
