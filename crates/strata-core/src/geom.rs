//! Geometry primitives: [`Point3`], [`Bounds3`] and [`Direction`].
//!
//! Y is the vertical axis. "Down" is `-y`, "forward" is `+z` and "right"
//! is `+x`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Component-wise absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Number of axes on which the point is non-zero (0..=3).
    ///
    /// For a neighbor offset this tells orthogonal moves (1) from planar
    /// (2) and volumetric (3) diagonals.
    #[inline]
    pub const fn axes(self) -> u32 {
        (self.x != 0) as u32 + (self.y != 0) as u32 + (self.z != 0) as u32
    }

    /// Whether each component lies in `-1..=1`.
    #[inline]
    pub const fn is_unit_offset(self) -> bool {
        self.x >= -1 && self.x <= 1 && self.y >= -1 && self.y <= 1 && self.z >= -1 && self.z <= 1
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Point3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the six axis directions, or the cell itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The cell itself.
    Here,
    Down,
    Up,
    Left,
    Right,
    Back,
    Forward,
}

impl Direction {
    /// The six axis directions, in table order.
    pub const AXES: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Back,
        Direction::Forward,
    ];

    /// Unit offset of this direction.
    #[inline]
    pub const fn offset(self) -> Point3 {
        match self {
            Direction::Here => Point3::ZERO,
            Direction::Down => Point3::new(0, -1, 0),
            Direction::Up => Point3::new(0, 1, 0),
            Direction::Left => Point3::new(-1, 0, 0),
            Direction::Right => Point3::new(1, 0, 0),
            Direction::Back => Point3::new(0, 0, -1),
            Direction::Forward => Point3::new(0, 0, 1),
        }
    }

    /// The direction pointing the other way. `Here` is its own opposite.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Here => Direction::Here,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Back => Direction::Forward,
            Direction::Forward => Direction::Back,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Here => "SELF",
            Direction::Down => "DOWN",
            Direction::Up => "UP",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Back => "BACK",
            Direction::Forward => "FORWARD",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Bounds3
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds3 {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds3 {
    /// Create a box from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of the given size anchored at `origin`.
    #[inline]
    pub fn with_size(origin: Point3, size: Point3) -> Self {
        Self::new(origin, origin + size)
    }

    /// Size as a point (width, height, depth).
    #[inline]
    pub fn size(self) -> Point3 {
        self.max - self.min
    }

    /// Total number of cells in the box.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let s = self.size();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Whether the box has zero volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether `p` is inside the half-open box.
    #[inline]
    pub fn contains(self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Whether `p` lies on one of the box's outer faces.
    #[inline]
    pub fn on_boundary(self, p: Point3) -> bool {
        self.contains(p)
            && (p.x == self.min.x
                || p.x == self.max.x - 1
                || p.y == self.min.y
                || p.y == self.max.y - 1
                || p.z == self.min.z
                || p.z == self.max.z - 1)
    }

    /// Intersection of two boxes (the zero box if they do not overlap).
    #[inline]
    pub fn intersect(self, other: Bounds3) -> Self {
        let r = Self {
            min: Point3::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: Point3::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Iterator over every point, x fastest, then z, then y.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds3 {
    type Item = Point3;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Layer-major iterator over the points in a [`Bounds3`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds3,
    cur: Point3,
}

impl Iterator for BoundsIter {
    type Item = Point3;

    #[inline]
    fn next(&mut self) -> Option<Point3> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.bounds.max.z {
                self.cur.z = self.bounds.min.z;
                self.cur.y += 1;
            }
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return (0, Some(0));
        }
        let s = self.bounds.size();
        let layer = s.x as usize * s.z as usize;
        let in_row = (self.bounds.max.x - self.cur.x) as usize;
        let rows_left = (self.bounds.max.z - self.cur.z - 1) as usize;
        let layers_left = (self.bounds.max.y - self.cur.y - 1) as usize;
        let total = in_row + rows_left * s.x as usize + layers_left * layer;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point3::new(1, 2, 3);
        let b = Point3::new(4, 6, 8);
        assert_eq!(a + b, Point3::new(5, 8, 11));
        assert_eq!(b - a, Point3::new(3, 4, 5));
        assert_eq!(a * 2, Point3::new(2, 4, 6));
        assert_eq!(-a, Point3::new(-1, -2, -3));
    }

    #[test]
    fn point_axes() {
        assert_eq!(Point3::ZERO.axes(), 0);
        assert_eq!(Point3::new(0, -1, 0).axes(), 1);
        assert_eq!(Point3::new(1, 0, -1).axes(), 2);
        assert_eq!(Point3::new(1, 1, 1).axes(), 3);
    }

    #[test]
    fn direction_offsets_are_unit_and_opposed() {
        for d in Direction::AXES {
            assert_eq!(d.offset().axes(), 1);
            assert_eq!(d.offset() + d.opposite().offset(), Point3::ZERO);
        }
        assert_eq!(Direction::Here.offset(), Point3::ZERO);
        assert_eq!(Direction::Down.offset().y, -1);
    }

    #[test]
    fn bounds_basics() {
        let b = Bounds3::with_size(Point3::new(-1, 0, 2), Point3::new(3, 2, 4));
        assert_eq!(b.size(), Point3::new(3, 2, 4));
        assert_eq!(b.len(), 24);
        assert!(b.contains(Point3::new(-1, 0, 2)));
        assert!(b.contains(Point3::new(1, 1, 5)));
        assert!(!b.contains(Point3::new(2, 0, 2)));
        assert!(!b.contains(Point3::new(0, 0, 6)));
    }

    #[test]
    fn bounds_auto_canonicalize() {
        let b = Bounds3::new(Point3::new(3, 2, 1), Point3::ZERO);
        assert_eq!(b.min, Point3::ZERO);
        assert_eq!(b.max, Point3::new(3, 2, 1));
    }

    #[test]
    fn bounds_iter_order_and_count() {
        let b = Bounds3::with_size(Point3::ZERO, Point3::new(2, 2, 2));
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts.len(), 8);
        assert_eq!(b.iter().len(), 8);
        assert_eq!(pts[0], Point3::new(0, 0, 0));
        assert_eq!(pts[1], Point3::new(1, 0, 0));
        assert_eq!(pts[2], Point3::new(0, 0, 1));
        assert_eq!(pts[4], Point3::new(0, 1, 0));
        assert_eq!(pts[7], Point3::new(1, 1, 1));
    }

    #[test]
    fn empty_bounds_iter() {
        let b = Bounds3::with_size(Point3::ZERO, Point3::new(3, 0, 3));
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }

    #[test]
    fn boundary_detection() {
        let b = Bounds3::with_size(Point3::ZERO, Point3::new(3, 3, 3));
        assert!(b.on_boundary(Point3::new(0, 1, 1)));
        assert!(b.on_boundary(Point3::new(1, 2, 1)));
        assert!(!b.on_boundary(Point3::new(1, 1, 1)));
        assert!(!b.on_boundary(Point3::new(3, 1, 1)));
    }

    #[test]
    fn bounds_intersect() {
        let a = Bounds3::with_size(Point3::ZERO, Point3::new(4, 4, 4));
        let b = Bounds3::with_size(Point3::new(2, 2, 2), Point3::new(4, 4, 4));
        assert_eq!(
            a.intersect(b),
            Bounds3::new(Point3::new(2, 2, 2), Point3::new(4, 4, 4))
        );
        let c = Bounds3::with_size(Point3::new(9, 9, 9), Point3::new(1, 1, 1));
        assert!(a.intersect(c).is_empty());
    }
}
