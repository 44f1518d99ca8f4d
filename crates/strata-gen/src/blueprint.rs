//! Multi-layer maps built from text.
//!
//! A [`Blueprint`] is a stack of ASCII layers separated by blank lines. The
//! first layer is the bottom (`y = 0`); within a layer each line is a row
//! along `z` and each character a column along `x`. Combined with a
//! [`Palette`] it produces a ready-to-search [`Grid3`].

use std::fmt;

use strata_core::{Grid3, GridError, Point3};

use crate::palette::Palette;

/// A layered map section built from text.
#[derive(Debug, Clone)]
pub struct Blueprint {
    layers: Vec<Vec<Vec<char>>>,
    runes: String,
    size: Point3,
}

impl Blueprint {
    /// Create a new blueprint by parsing the given string.
    ///
    /// See [`parse`](Self::parse) for format requirements.
    pub fn new(s: &str) -> Result<Self, BlueprintError> {
        let mut b = Self {
            layers: Vec::new(),
            runes: String::new(),
            size: Point3::ZERO,
        };
        b.parse(s)?;
        Ok(b)
    }

    /// Return the (width, layers, rows) size of the blueprint in cells.
    pub fn size(&self) -> Point3 {
        self.size
    }

    /// Set the permitted characters. If non-empty, [`parse`](Self::parse)
    /// rejects any other character. Empty means any character is allowed.
    pub fn set_runes(&mut self, s: &str) {
        self.runes = s.to_string();
    }

    pub fn runes(&self) -> &str {
        &self.runes
    }

    /// Parse (or re-parse) the blueprint content.
    ///
    /// Leading and trailing whitespace of the whole string is trimmed;
    /// lines keep theirs. Every row of every layer must have the same
    /// width and every layer the same number of rows.
    pub fn parse(&mut self, s: &str) -> Result<(), BlueprintError> {
        let s = s.trim();
        let mut layers: Vec<Vec<Vec<char>>> = Vec::new();
        let mut current: Vec<Vec<char>> = Vec::new();

        for line in s.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    layers.push(std::mem::take(&mut current));
                }
                continue;
            }
            let (y, z) = (layers.len() as i32, current.len() as i32);
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                if !self.runes.is_empty() && !self.runes.contains(ch) {
                    return Err(BlueprintError::InvalidRune {
                        ch,
                        pos: Point3::new(x as i32, y, z),
                        content: s.to_string(),
                    });
                }
                row.push(ch);
            }
            current.push(row);
        }
        if !current.is_empty() {
            layers.push(current);
        }

        let width = layers.first().and_then(|l| l.first()).map_or(0, Vec::len);
        let rows = layers.first().map_or(0, Vec::len);
        for layer in &layers {
            if layer.len() != rows || layer.iter().any(|r| r.len() != width) {
                return Err(BlueprintError::InconsistentSize(s.to_string()));
            }
        }

        self.size = Point3::new(width as i32, layers.len() as i32, rows as i32);
        self.layers = layers;
        Ok(())
    }

    /// Character at a blueprint-relative position.
    pub fn at(&self, p: Point3) -> Option<char> {
        if p.x < 0 || p.y < 0 || p.z < 0 {
            return None;
        }
        self.layers
            .get(p.y as usize)
            .and_then(|l| l.get(p.z as usize))
            .and_then(|r| r.get(p.x as usize))
            .copied()
    }

    /// Iterate over all positions and their characters, bottom layer
    /// first.
    pub fn iter(&self, mut f: impl FnMut(Point3, char)) {
        for (y, layer) in self.layers.iter().enumerate() {
            for (z, row) in layer.iter().enumerate() {
                for (x, &ch) in row.iter().enumerate() {
                    f(Point3::new(x as i32, y as i32, z as i32), ch);
                }
            }
        }
    }

    /// Build a grid whose first cell sits at `origin`, mapping each
    /// character through `palette`.
    pub fn build(&self, palette: &Palette, origin: Point3) -> Result<Grid3, BlueprintError> {
        let mut missing = None;
        self.iter(|p, ch| {
            if missing.is_none() && palette.get(ch).is_none() {
                missing = Some((ch, p));
            }
        });
        if let Some((ch, pos)) = missing {
            return Err(BlueprintError::UnknownGlyph { ch, pos });
        }

        let grid = Grid3::from_fn(self.size, origin, |p| {
            let rel = p - origin;
            self.at(rel)
                .and_then(|ch| palette.get(ch))
                .map_or_else(|| strata_core::Cell::new(p), |t| t.cell(p))
        })?;
        log::debug!(
            "built {} grid at {} from {} glyphs",
            self.size,
            origin,
            palette.len()
        );
        Ok(grid)
    }

    /// Reflect every layer along `x` (reverse each row).
    pub fn reflect(&mut self) {
        for layer in self.layers.iter_mut() {
            for row in layer.iter_mut() {
                row.reverse();
            }
        }
    }

    /// Render the blueprint back to text.
    pub fn content(&self) -> String {
        self.layers
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|r| r.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Errors that can occur when parsing or building a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    /// Rows or layers have inconsistent sizes.
    InconsistentSize(String),
    /// A character not in the allowed set was found.
    InvalidRune {
        ch: char,
        pos: Point3,
        content: String,
    },
    /// A character has no palette entry.
    UnknownGlyph { ch: char, pos: Point3 },
    /// The blueprint does not describe a valid grid (for example it is
    /// empty).
    Grid(GridError),
}

impl fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "blueprint: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos, content } => {
                write!(
                    f,
                    "blueprint contains invalid rune \u{201c}{ch}\u{201d} at {pos}:\n{content}"
                )
            }
            Self::UnknownGlyph { ch, pos } => {
                write!(f, "blueprint: no terrain for \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Grid(e) => write!(f, "blueprint: {e}"),
        }
    }
}

impl std::error::Error for BlueprintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for BlueprintError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
