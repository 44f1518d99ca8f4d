use strata_core::{Grid3, Point3};

use crate::agent::AgentProfile;

/// Admissible-move computation for one agent on one grid.
///
/// A candidate neighbor is admissible when the agent can pass it, it has
/// footing in one of the agent's footing directions, and, for diagonal
/// moves, it does not cut through a solid corner. Weak agents only look at
/// the six orthogonal neighbors.
pub struct Neighbors {
    buf: Vec<usize>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(26),
        }
    }

    /// Indices of the admissible neighbors of the cell at `idx`, in
    /// neighbor-table order (x slowest, z fastest).
    pub fn admissible(&mut self, grid: &Grid3, agent: &AgentProfile, idx: usize) -> &[usize] {
        self.buf.clear();
        let diagonal = agent.capability().moves_diagonally();
        let table = grid.neighbors_at(idx);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let offset = Point3::new(dx, dy, dz);
                    let axes = offset.axes();
                    if axes == 0 || (axes > 1 && !diagonal) {
                        continue;
                    }
                    let Some(ni) = table[(dx + 1) as usize][(dy + 1) as usize][(dz + 1) as usize]
                    else {
                        continue;
                    };
                    if !agent.can_pass(grid.cell(ni)) || !has_footing(grid, agent, ni) {
                        continue;
                    }
                    if axes > 1 && !corner_clear(grid, agent, idx, offset) {
                        continue;
                    }
                    self.buf.push(ni);
                }
            }
        }
        &self.buf
    }
}

/// Whether the cell at `idx` offers standing support to `agent`.
///
/// Some neighbor in one of the agent's footing directions must exist and
/// have non-zero friction. `Direction::Here` needs no support.
pub fn has_footing(grid: &Grid3, agent: &AgentProfile, idx: usize) -> bool {
    agent.footing_directions().iter().any(|d| {
        let offset = d.offset();
        if offset == Point3::ZERO {
            return true;
        }
        grid.neighbor(idx, offset)
            .is_some_and(|fi| grid.cell(fi).friction() != 0.0)
    })
}

/// Corner-cutting check for a diagonal move from `idx` by `offset`.
///
/// At least one orthogonal single-axis neighbor must be passable. Planar
/// diagonals check their two axes; volumetric diagonals check only the two
/// horizontal axes (x and z).
fn corner_clear(grid: &Grid3, agent: &AgentProfile, idx: usize, offset: Point3) -> bool {
    let pair = if offset.axes() == 3 {
        [Point3::new(offset.x, 0, 0), Point3::new(0, 0, offset.z)]
    } else if offset.x == 0 {
        [Point3::new(0, offset.y, 0), Point3::new(0, 0, offset.z)]
    } else if offset.y == 0 {
        [Point3::new(offset.x, 0, 0), Point3::new(0, 0, offset.z)]
    } else {
        [Point3::new(offset.x, 0, 0), Point3::new(0, offset.y, 0)]
    };
    pair.iter().any(|&o| {
        grid.neighbor(idx, o)
            .is_some_and(|oi| agent.can_pass(grid.cell(oi)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentConfig, Capability};
    use strata_core::{Attr, Cell};

    fn agent(capability: Capability) -> AgentProfile {
        AgentProfile::new(AgentConfig {
            capability,
            walk_capacity: 10.0,
            ..Default::default()
        })
    }

    /// 3×3×3 grid; the bottom layer is rock with friction, the rest is air.
    fn floor_grid() -> Grid3 {
        Grid3::from_fn(Point3::new(3, 3, 3), Point3::ZERO, |p| {
            if p.y == 0 {
                Cell::new(p)
                    .with_kind("ROCK")
                    .with_attr(Attr::Difficulty, 100.0)
                    .with_attr(Attr::Friction, 1.0)
            } else {
                Cell::new(p)
            }
        })
        .unwrap()
    }

    fn points(grid: &Grid3, idx: &[usize]) -> Vec<Point3> {
        idx.iter().map(|&i| grid.point(i)).collect()
    }

    #[test]
    fn weak_agent_walks_orthogonally_on_floor() {
        let g = floor_grid();
        let mut nb = Neighbors::new();
        let i = g.idx(Point3::new(1, 1, 1)).unwrap();
        let got = points(&g, nb.admissible(&g, &agent(Capability::Weak), i));
        assert_eq!(
            got,
            vec![
                Point3::new(0, 1, 1),
                Point3::new(1, 1, 0),
                Point3::new(1, 1, 2),
                Point3::new(2, 1, 1),
            ]
        );
    }

    #[test]
    fn normal_agent_adds_planar_diagonals() {
        let g = floor_grid();
        let mut nb = Neighbors::new();
        let i = g.idx(Point3::new(1, 1, 1)).unwrap();
        let got = nb.admissible(&g, &agent(Capability::Normal), i);
        // whole middle layer minus the cell itself; upper layer has no floor
        assert_eq!(got.len(), 8);
        assert!(points(&g, got).iter().all(|p| p.y == 1));
    }

    #[test]
    fn extreme_agent_needs_no_footing() {
        let g = floor_grid();
        let mut nb = Neighbors::new();
        let i = g.idx(Point3::new(1, 1, 1)).unwrap();
        let got = nb.admissible(&g, &agent(Capability::Extreme), i);
        // all of the two air layers except the cell itself
        assert_eq!(got.len(), 17);
    }

    #[test]
    fn footing_depends_on_capability() {
        // A single rock wall at x = 0; the agent is in the air column x = 1.
        let g = Grid3::from_fn(Point3::new(2, 3, 1), Point3::ZERO, |p| {
            if p.x == 0 {
                Cell::new(p)
                    .with_attr(Attr::Difficulty, 100.0)
                    .with_attr(Attr::Friction, 1.0)
            } else {
                Cell::new(p)
            }
        })
        .unwrap();
        let mid = g.idx(Point3::new(1, 1, 0)).unwrap();
        assert!(!has_footing(&g, &agent(Capability::Normal), mid));
        assert!(has_footing(&g, &agent(Capability::Strong), mid));
        assert!(has_footing(&g, &agent(Capability::Excellent), mid));
        assert!(has_footing(&g, &agent(Capability::Extreme), mid));
    }

    #[test]
    fn diagonal_blocked_when_both_orthogonals_solid() {
        // Middle layer of a 3×3×3 grid:
        //   z=2: . # .
        //   z=1: # . .
        //   z=0: . . .
        // From (1,1,1) the diagonal to (0,1,2) squeezes between two rocks.
        let mut g = floor_grid();
        for p in [Point3::new(0, 1, 1), Point3::new(1, 1, 2)] {
            let c = g.get_mut(p).unwrap();
            c.set_attr(Attr::Difficulty, 100.0);
        }
        let mut nb = Neighbors::new();
        let i = g.idx(Point3::new(1, 1, 1)).unwrap();
        let got = points(&g, nb.admissible(&g, &agent(Capability::Excellent), i));
        assert!(!got.contains(&Point3::new(0, 1, 2)));
        assert!(got.contains(&Point3::new(2, 1, 2)));
        assert!(got.contains(&Point3::new(0, 1, 0)));
    }

    #[test]
    fn volumetric_diagonal_checks_horizontal_pair() {
        let mut g = Grid3::new(Point3::new(2, 2, 2), Point3::ZERO).unwrap();
        for p in [Point3::new(1, 0, 0), Point3::new(0, 0, 1)] {
            g.get_mut(p).unwrap().set_attr(Attr::Difficulty, 100.0);
        }
        let start = g.idx(Point3::ZERO).unwrap();
        let mut nb = Neighbors::new();
        let got = points(&g, nb.admissible(&g, &agent(Capability::Extreme), start));
        // (0,1,0) is open, but the horizontal pair is solid.
        assert!(!got.contains(&Point3::new(1, 1, 1)));
        assert!(got.contains(&Point3::new(0, 1, 1)));
    }
}
