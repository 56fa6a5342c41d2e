//! Map Geometry
//!
//! Positions are whole map units; distances are Euclidean and compared as
//! floats because hazard radii are fractional.

/// Euclidean distance between two integer points.
#[inline]
pub fn distance(ax: i32, ay: i32, bx: f64, by: f64) -> f64 {
    let dx = f64::from(ax) - bx;
    let dy = f64::from(ay) - by;
    (dx * dx + dy * dy).sqrt()
}

/// Clamp one axis into `[margin, map_size - margin]`.
///
/// If the map is too small to leave any room the lower bound wins.
#[inline]
pub fn clamp_to_map(value: i32, map_size: i32, margin: i32) -> i32 {
    value.min(map_size - margin).max(margin)
}
