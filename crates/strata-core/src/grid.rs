//! The [`Grid3`] type: an arena of [`Cell`]s with cached adjacency.
//!
//! Cells are stored in a flat `Vec` in layer-major order (x fastest, then
//! z, then y) and addressed by world coordinates offset by the grid origin.
//! For every cell the grid keeps a dense 3×3×3 table of neighbor indices.
//! The tables depend only on the grid's dimensions, so they are rebuilt
//! whenever the dimensions change and are never stale.

use std::fmt;

use crate::cell::Cell;
use crate::geom::{Bounds3, Point3};

/// Neighbor indices around a cell, addressed `[dx + 1][dy + 1][dz + 1]`.
///
/// `[1][1][1]` is the cell itself. Positions outside the grid are `None`.
pub type NeighborTable = [[[Option<usize>; 3]; 3]; 3];

/// Errors from structural grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Every dimension must be at least 1.
    InvalidSize(Point3),
    /// The point is outside the grid.
    OutOfBounds(Point3),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(s) => write!(f, "grid: invalid size {s}"),
            Self::OutOfBounds(p) => write!(f, "grid: point {p} out of bounds"),
        }
    }
}

impl std::error::Error for GridError {}

fn check_size(size: Point3) -> Result<(), GridError> {
    if size.x <= 0 || size.y <= 0 || size.z <= 0 {
        return Err(GridError::InvalidSize(size));
    }
    Ok(())
}

/// Flat index of `p` inside `bounds`, which must contain it.
#[inline]
fn flat_index(bounds: Bounds3, p: Point3) -> usize {
    let s = bounds.size();
    let l = p - bounds.min;
    ((l.y * s.z + l.z) * s.x + l.x) as usize
}

/// A 3D grid of [`Cell`]s.
#[derive(Clone, Debug)]
pub struct Grid3 {
    bounds: Bounds3,
    cells: Vec<Cell>,
    neighbors: Vec<NeighborTable>,
    is_static: bool,
}

impl Grid3 {
    /// Create a grid of `EMPTY` cells covering `size` cells from `origin`.
    pub fn new(size: Point3, origin: Point3) -> Result<Self, GridError> {
        Self::from_fn(size, origin, Cell::new)
    }

    /// Create a grid where every cell is a copy of `prototype`.
    pub fn filled(size: Point3, origin: Point3, prototype: &Cell) -> Result<Self, GridError> {
        Self::from_fn(size, origin, |p| {
            let mut c = prototype.clone();
            c.set_pos(p);
            c
        })
    }

    /// Create a grid by calling `f` for every position.
    ///
    /// The position stored in each returned cell is overwritten with the
    /// position it was built for.
    pub fn from_fn(
        size: Point3,
        origin: Point3,
        mut f: impl FnMut(Point3) -> Cell,
    ) -> Result<Self, GridError> {
        check_size(size)?;
        let bounds = Bounds3::with_size(origin, size);
        let cells = bounds
            .iter()
            .map(|p| {
                let mut c = f(p);
                c.set_pos(p);
                c
            })
            .collect();
        let mut grid = Self {
            bounds,
            cells,
            neighbors: Vec::new(),
            is_static: false,
        };
        grid.rebuild_neighbors();
        Ok(grid)
    }

    /// The box of world coordinates covered by the grid.
    #[inline]
    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// World coordinate of the first cell.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.bounds.min
    }

    #[inline]
    pub fn size(&self) -> Point3 {
        self.bounds.size()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of a world coordinate, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point3) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(flat_index(self.bounds, p))
    }

    /// World coordinate of a flat index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point3 {
        self.cells[idx].pos()
    }

    /// Cell at a world coordinate, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point3) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Mutable cell at a world coordinate.
    ///
    /// Attribute edits through this reference do not affect adjacency.
    #[inline]
    pub fn get_mut(&mut self, p: Point3) -> Option<&mut Cell> {
        let i = self.idx(p)?;
        Some(&mut self.cells[i])
    }

    /// Cell at a flat index.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Neighbor table of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn neighbors_of(&self, p: Point3) -> Option<&NeighborTable> {
        self.idx(p).map(|i| &self.neighbors[i])
    }

    /// Neighbor table of the cell at a flat index.
    #[inline]
    pub fn neighbors_at(&self, idx: usize) -> &NeighborTable {
        &self.neighbors[idx]
    }

    /// Index of the neighbor of `idx` at a unit `offset`.
    ///
    /// Returns `None` for positions outside the grid and for offsets with a
    /// component outside `-1..=1`.
    #[inline]
    pub fn neighbor(&self, idx: usize, offset: Point3) -> Option<usize> {
        if !offset.is_unit_offset() {
            return None;
        }
        self.neighbors[idx][(offset.x + 1) as usize][(offset.y + 1) as usize]
            [(offset.z + 1) as usize]
    }

    /// Iterate over all cells in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterate mutably over all cells in storage order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Cell> {
        self.cells.iter_mut()
    }

    /// Replace the whole cell at `p`. The new cell's position is forced to
    /// `p`.
    pub fn replace(&mut self, p: Point3, mut cell: Cell) -> Result<Cell, GridError> {
        let i = self.idx(p).ok_or(GridError::OutOfBounds(p))?;
        cell.set_pos(p);
        Ok(std::mem::replace(&mut self.cells[i], cell))
    }

    /// Change the grid dimensions, keeping the origin.
    ///
    /// Cells whose position stays inside the grid are kept; new positions
    /// are filled with `EMPTY` cells. Neighbor tables are rebuilt.
    pub fn resize(&mut self, size: Point3) -> Result<(), GridError> {
        check_size(size)?;
        let old_bounds = self.bounds;
        let mut old: Vec<Option<Cell>> = std::mem::take(&mut self.cells)
            .into_iter()
            .map(Some)
            .collect();
        let bounds = Bounds3::with_size(old_bounds.min, size);
        self.cells = bounds
            .iter()
            .map(|p| {
                let kept = if old_bounds.contains(p) {
                    old[flat_index(old_bounds, p)].take()
                } else {
                    None
                };
                kept.unwrap_or_else(|| Cell::new(p))
            })
            .collect();
        self.bounds = bounds;
        self.rebuild_neighbors();
        log::debug!("grid resized from {} to {}", old_bounds, bounds);
        Ok(())
    }

    /// Recompute every neighbor table from the current dimensions.
    pub fn rebuild_neighbors(&mut self) {
        let bounds = self.bounds;
        self.neighbors.clear();
        self.neighbors.reserve(self.cells.len());
        for p in bounds.iter() {
            let mut table: NeighborTable = [[[None; 3]; 3]; 3];
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let n = p.shift(dx, dy, dz);
                        if bounds.contains(n) {
                            table[(dx + 1) as usize][(dy + 1) as usize][(dz + 1) as usize] =
                                Some(flat_index(bounds, n));
                        }
                    }
                }
            }
            self.neighbors.push(table);
        }
        log::trace!("rebuilt {} neighbor tables", self.neighbors.len());
    }

    /// Declare whether the map is immutable while searches run.
    ///
    /// Searches over a static grid memoize admissible neighbors.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Write search costs into the cells' `cost` fields. Points outside
    /// the grid are ignored.
    pub fn record_costs(&mut self, costs: impl IntoIterator<Item = (Point3, f64)>) {
        for (p, cost) in costs {
            if let Some(c) = self.get_mut(p) {
                c.set_cost(cost);
            }
        }
    }

    /// Count cells satisfying a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| f(c)).count()
    }
}

impl<'a> IntoIterator for &'a Grid3 {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
