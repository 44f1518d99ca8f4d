//! Passage carving driven by searches.
//!
//! [`MazeCarver`] digs tunnels through solid terrain by repeatedly searching
//! between two random cells on the grid's boundary and painting every cell
//! of the resulting path with a floor terrain. Adding noise to the terrain
//! first ([`MazeCarver::roughen`]) makes the passages wander.

use rand::{Rng, RngExt};
use strata_core::{Attr, AttributeSet, Bounds3, Grid3, Point3};
use strata_paths::{AgentConfig, AgentProfile, Capability, Heuristic, Session, Status};

use crate::palette::Terrain;

/// Digger profile: flies, can enter anything, prefers soft terrain.
fn digger() -> AgentProfile {
    AgentProfile::new(AgentConfig {
        capability: Capability::Extreme,
        walk_capacity: f64::MAX,
        weights: AttributeSet::new()
            .with(Attr::Difficulty, 1.0)
            .with(Attr::HValue, 1.0),
        heuristic: Heuristic::Manhattan,
        step_limit: 100_000,
    })
}

/// Carves passages into a [`Grid3`] using search sessions.
pub struct MazeCarver<R: Rng> {
    pub rng: R,
    pub agent: AgentProfile,
}

impl<R: Rng> MazeCarver<R> {
    /// Create a carver with the default digging profile.
    pub fn new(rng: R) -> Self {
        Self::with_agent(rng, digger())
    }

    /// Create a carver that digs with a custom agent profile.
    pub fn with_agent(rng: R, agent: AgentProfile) -> Self {
        Self { rng, agent }
    }

    /// Add uniform noise in `[0, amplitude)` to `attr` of every cell.
    pub fn roughen(&mut self, grid: &mut Grid3, attr: Attr, amplitude: f64) {
        for cell in grid.iter_mut() {
            let r: f64 = self.rng.random();
            let v = cell.attr(attr) + r * amplitude;
            cell.set_attr(attr, v);
        }
    }

    /// Pick a random cell on the outer faces of `bounds`.
    pub fn boundary_point(&mut self, bounds: Bounds3) -> Point3 {
        let mut p = Point3::new(
            self.rng.random_range(bounds.min.x..bounds.max.x),
            self.rng.random_range(bounds.min.y..bounds.max.y),
            self.rng.random_range(bounds.min.z..bounds.max.z),
        );
        let high = self.rng.random_range(0..2u32) == 1;
        match self.rng.random_range(0..3u32) {
            0 => p.x = if high { bounds.max.x - 1 } else { bounds.min.x },
            1 => p.y = if high { bounds.max.y - 1 } else { bounds.min.y },
            _ => p.z = if high { bounds.max.z - 1 } else { bounds.min.z },
        }
        p
    }

    /// Dig a passage between `from` and `to`.
    ///
    /// Returns the number of cells that changed to `floor`, or `None` if the
    /// search failed (or an endpoint is outside the grid).
    pub fn dig(&self, grid: &mut Grid3, from: Point3, to: Point3, floor: &Terrain) -> Option<usize> {
        let path = {
            let mut session = Session::new(grid, &self.agent, from, to).ok()?;
            if session.run() != Status::Success {
                log::warn!(
                    "no passage from {} to {} after {} steps",
                    from,
                    to,
                    session.steps()
                );
                return None;
            }
            session.result().to_vec()
        };
        let mut carved = 0;
        for p in path {
            if let Some(cell) = grid.get_mut(p) {
                if cell.kind != floor.kind {
                    carved += 1;
                }
                floor.paint(cell);
            }
        }
        Some(carved)
    }

    /// Dig `passages` passages between random boundary cells.
    ///
    /// Returns the total number of cells carved.
    pub fn carve(&mut self, grid: &mut Grid3, passages: usize, floor: &Terrain) -> usize {
        let bounds = grid.bounds();
        let mut carved = 0;
        for _ in 0..passages {
            let from = self.boundary_point(bounds);
            let to = self.boundary_point(bounds);
            carved += self.dig(grid, from, to, floor).unwrap_or(0);
        }
        log::debug!("carved {} cells in {} passages", carved, passages);
        carved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strata_core::Cell;

    fn rock_grid() -> Grid3 {
        let rock = Cell::new(Point3::ZERO)
            .with_kind("ROCK")
            .with_attr(Attr::Difficulty, 10.0)
            .with_attr(Attr::Friction, 1.0);
        Grid3::filled(Point3::new(12, 3, 12), Point3::ZERO, &rock).unwrap()
    }

    fn floor() -> Terrain {
        Terrain::new("EMPTY", AttributeSet::ZERO)
    }

    #[test]
    fn boundary_points_lie_on_faces() {
        let mut mc = MazeCarver::new(StdRng::seed_from_u64(7));
        let b = Bounds3::with_size(Point3::new(-3, 0, 5), Point3::new(6, 4, 6));
        for _ in 0..200 {
            assert!(b.on_boundary(mc.boundary_point(b)));
        }
    }

    #[test]
    fn roughen_adds_bounded_noise() {
        let mut grid = rock_grid();
        let mut mc = MazeCarver::new(StdRng::seed_from_u64(1));
        mc.roughen(&mut grid, Attr::Difficulty, 5.0);
        assert!(grid
            .iter()
            .all(|c| (10.0..15.0).contains(&c.difficulty())));
        assert!(grid.iter().any(|c| c.difficulty() != 10.0));
    }

    #[test]
    fn dig_connects_endpoints() {
        let mut grid = rock_grid();
        let mc = MazeCarver::new(StdRng::seed_from_u64(3));
        let (a, b) = (Point3::new(0, 1, 0), Point3::new(11, 1, 11));
        let carved = mc.dig(&mut grid, a, b, &floor()).unwrap();
        assert!(carved >= 12);
        assert_eq!(grid.get(a).unwrap().kind, "EMPTY");
        assert_eq!(grid.get(b).unwrap().kind, "EMPTY");
        assert_eq!(grid.count_fn(|c| c.kind == "EMPTY"), carved);
    }

    #[test]
    fn dig_outside_grid_is_none() {
        let mut grid = rock_grid();
        let mc = MazeCarver::new(StdRng::seed_from_u64(3));
        assert_eq!(
            mc.dig(&mut grid, Point3::ZERO, Point3::new(50, 0, 0), &floor()),
            None
        );
    }

    #[test]
    fn carve_counts_floor_cells() {
        let mut grid = rock_grid();
        let mut mc = MazeCarver::new(StdRng::seed_from_u64(42));
        mc.roughen(&mut grid, Attr::Difficulty, 4.0);
        let carved = mc.carve(&mut grid, 4, &floor());
        assert!(carved > 0);
        assert_eq!(grid.count_fn(|c| c.kind == "EMPTY"), carved);
    }

    #[test]
    fn carved_passage_is_walkable() {
        // One flat layer of rock over a rock floor; carve the upper layer.
        let mut grid = Grid3::from_fn(Point3::new(10, 2, 10), Point3::ZERO, |p| {
            Cell::new(p)
                .with_kind("ROCK")
                .with_attr(Attr::Difficulty, 10.0)
                .with_attr(Attr::Friction, 1.0)
        })
        .unwrap();
        let (a, b) = (Point3::new(0, 1, 0), Point3::new(9, 1, 6));
        // An orthogonal digger leaves no corners for the walker to cut.
        let mole = AgentProfile::new(AgentConfig {
            capability: Capability::Weak,
            walk_capacity: f64::MAX,
            weights: AttributeSet::new()
                .with(Attr::Difficulty, 1.0)
                .with(Attr::HValue, 1.0),
            ..Default::default()
        });
        let mut mc = MazeCarver::with_agent(StdRng::seed_from_u64(9), mole);
        // keep the digger in the upper layer by making the floor harder
        for y0 in grid.iter_mut().filter(|c| c.pos().y == 0) {
            y0.set_attr(Attr::Difficulty, 1000.0);
        }
        mc.roughen(&mut grid, Attr::Difficulty, 2.0);
        let floor = Terrain::new("EMPTY", AttributeSet::new().with(Attr::Friction, 1.0));
        mc.dig(&mut grid, a, b, &floor).unwrap();

        let walker = AgentProfile::new(AgentConfig {
            capability: Capability::Normal,
            walk_capacity: 1.0,
            ..Default::default()
        });
        let mut s = Session::new(&grid, &walker, a, b).unwrap();
        assert_eq!(s.run(), Status::Success);
    }
}
