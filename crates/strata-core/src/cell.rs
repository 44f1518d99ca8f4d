//! The [`Cell`] type: one addressable location with traversal attributes.

use crate::attrs::{Attr, AttributeSet};
use crate::geom::Point3;

/// Terrain kind of a cell that has not been assigned one.
pub const EMPTY: &str = "EMPTY";

/// A grid cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point3,
    /// Free-form terrain tag such as `"ROCK"` or `"EMPTY"`.
    pub kind: String,
    pub attrs: AttributeSet,
    cost: f64,
}

impl Cell {
    /// Create an `EMPTY` cell at `pos` with all attributes at zero.
    pub fn new(pos: Point3) -> Self {
        Self {
            pos,
            kind: EMPTY.to_string(),
            attrs: AttributeSet::ZERO,
            cost: 0.0,
        }
    }

    /// Set the terrain kind (builder).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the attribute record (builder).
    pub fn with_attrs(mut self, attrs: AttributeSet) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set one attribute (builder).
    pub fn with_attr(mut self, attr: Attr, v: f64) -> Self {
        self.attrs.set(attr, v);
        self
    }

    /// World position. Fixed by the owning grid.
    #[inline]
    pub fn pos(&self) -> Point3 {
        self.pos
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: Point3) {
        self.pos = pos;
    }

    #[inline]
    pub fn attr(&self, attr: Attr) -> f64 {
        self.attrs.get(attr)
    }

    #[inline]
    pub fn set_attr(&mut self, attr: Attr, v: f64) {
        self.attrs.set(attr, v);
    }

    #[inline]
    pub fn difficulty(&self) -> f64 {
        self.attrs.get(Attr::Difficulty)
    }

    #[inline]
    pub fn friction(&self) -> f64 {
        self.attrs.get(Attr::Friction)
    }

    /// Cost assigned by the last search recorded into the grid, see
    /// [`Grid3::record_costs`](crate::Grid3::record_costs).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}
