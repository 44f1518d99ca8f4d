//! World building for strata grids: terrain palettes, layered text
//! blueprints and search-driven passage carving.

pub mod blueprint;
pub mod maze;
pub mod palette;

pub use blueprint::{Blueprint, BlueprintError};
pub use maze::MazeCarver;
pub use palette::{Palette, PaletteError, Terrain};
