//! Shared world model for the strata demos.
//!
//! Builds a small three-layer cavern from a text blueprint, renders grids
//! layer by layer with a path overlay and sets up logging.

use std::collections::HashSet;

use env_logger::{Builder, Env};
use log::LevelFilter;
use strata_core::{Grid3, Point3};
use strata_gen::{Blueprint, BlueprintError, Palette, PaletteError};

/// Terrain table for the demo cavern.
pub const PALETTE: &str = "
// glyph, kind, attributes
#,ROCK,difficulty=100,friction=1
.,EMPTY
S,EMPTY
G,EMPTY
~,LAVA,difficulty=3,temperature=900
";

/// Cavern layers, bottom first. The two halves of the middle layer are only
/// joined across the lava, so walkers have to climb over the walls.
pub const CAVERN: &str = "
##########
##########
##########
##########
##########
##########

##########
#S...#...#
#.##.#.#.#
#.#..~.#.#
#...##.#G#
##########

..........
..........
..........
..........
..........
..........
";

/// A searchable world: grid, terrain table and endpoints.
pub struct World {
    pub grid: Grid3,
    pub palette: Palette,
    pub start: Point3,
    pub goal: Point3,
}

/// Error building a demo world.
#[derive(Debug)]
pub enum WorldError {
    Palette(PaletteError),
    Blueprint(BlueprintError),
    /// The blueprint has no `S` or no `G` glyph.
    MissingEndpoint(char),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Palette(e) => write!(f, "{e}"),
            Self::Blueprint(e) => write!(f, "{e}"),
            Self::MissingEndpoint(ch) => write!(f, "world: no \u{201c}{ch}\u{201d} in blueprint"),
        }
    }
}

impl std::error::Error for WorldError {}

impl From<PaletteError> for WorldError {
    fn from(e: PaletteError) -> Self {
        Self::Palette(e)
    }
}

impl From<BlueprintError> for WorldError {
    fn from(e: BlueprintError) -> Self {
        Self::Blueprint(e)
    }
}

impl World {
    /// Build a world from a palette table and a blueprint containing one
    /// `S` (start) and one `G` (goal).
    pub fn build(palette: &str, blueprint: &str, origin: Point3) -> Result<Self, WorldError> {
        let palette = Palette::parse(palette)?;
        let blueprint = Blueprint::new(blueprint)?;
        let (mut start, mut goal) = (None, None);
        blueprint.iter(|p, ch| match ch {
            'S' => start = Some(origin + p),
            'G' => goal = Some(origin + p),
            _ => {}
        });
        let grid = blueprint.build(&palette, origin)?;
        Ok(Self {
            grid,
            palette,
            start: start.ok_or(WorldError::MissingEndpoint('S'))?,
            goal: goal.ok_or(WorldError::MissingEndpoint('G'))?,
        })
    }

    /// The built-in demo cavern.
    pub fn cavern() -> Result<Self, WorldError> {
        Self::build(PALETTE, CAVERN, Point3::ZERO)
    }

    /// Render every layer, top first, marking `path` with `*`.
    pub fn render(&self, path: &[Point3]) -> String {
        let on_path: HashSet<Point3> = path.iter().copied().collect();
        let b = self.grid.bounds();
        let mut out = String::new();
        for y in (b.min.y..b.max.y).rev() {
            out.push_str(&format!("y = {y}\n"));
            for z in b.min.z..b.max.z {
                for x in b.min.x..b.max.x {
                    let p = Point3::new(x, y, z);
                    let ch = if p == self.start {
                        'S'
                    } else if p == self.goal {
                        'G'
                    } else if on_path.contains(&p) {
                        '*'
                    } else {
                        self.grid
                            .get(p)
                            .and_then(|c| self.palette.glyph_of(&c.kind))
                            .unwrap_or('?')
                    };
                    out.push(ch);
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` overrides the default level, which is debug when `verbose`
/// is set and info otherwise.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    // Fails only if a logger is already installed.
    let _ = Builder::from_env(env).try_init();
}
