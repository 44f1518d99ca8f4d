//! **strata-core**: world model for 3D grid search.
//!
//! This crate provides the types shared across the *strata* workspace:
//! integer geometry, attribute records, cells, and the [`Grid3`] arena with
//! its cached 3×3×3 neighbor tables.

pub mod attrs;
pub mod cell;
pub mod geom;
pub mod grid;

pub use attrs::{Attr, AttributeSet, ParseAttrError};
pub use cell::Cell;
pub use geom::{Bounds3, BoundsIter, Direction, Point3};
pub use grid::{Grid3, GridError, NeighborTable};
