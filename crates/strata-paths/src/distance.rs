use strata_core::Point3;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point3, b: Point3) -> i32 {
    let d = (a - b).abs();
    d.x + d.y + d.z
}

/// Squared Euclidean distance between two points.
///
/// Not square-rooted, so the value stays integral. Saturates at
/// `i32::MAX` on very long axes.
#[inline]
pub fn euclidean_sq(a: Point3, b: Point3) -> i32 {
    let d = a - b;
    let sq = |v: i32| v.saturating_mul(v);
    sq(d.x).saturating_add(sq(d.y)).saturating_add(sq(d.z))
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point3, b: Point3) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y).max(d.z)
}
