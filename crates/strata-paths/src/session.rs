use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use strata_core::{Attr, Grid3, Point3};

use crate::agent::AgentProfile;
use crate::estimator::WeightedSum;
use crate::neighbors::Neighbors;
use crate::traits::CostEstimator;

/// Progress of a [`Session`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Processing,
    Success,
    Failure,
}

impl Status {
    /// Whether the session has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Status::Processing
    }
}

/// Bookkeeping state of one cell within a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Not seen yet.
    #[default]
    None,
    /// Waiting in the open list.
    Open,
    /// Fully evaluated.
    Closed,
}

/// Errors from creating a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal is outside the grid.
    OutOfBounds(Point3),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "search: endpoint {p} is outside the grid"),
        }
    }
}

impl std::error::Error for SearchError {}

const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
struct Node {
    g: i32,
    cost: f64,
    parent: usize,
    state: NodeState,
    generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            cost: 0.0,
            parent: NO_PARENT,
            state: NodeState::None,
            generation: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    idx: usize,
    cost: f64,
}

/// Open list kept sorted by descending cost so the cheapest entry is last.
///
/// Among equal costs the oldest entry is popped first.
#[derive(Default)]
struct OpenList {
    entries: Vec<OpenEntry>,
}

impl OpenList {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, idx: usize, cost: f64) {
        let at = self
            .entries
            .partition_point(|e| e.cost.total_cmp(&cost) == Ordering::Greater);
        self.entries.insert(at, OpenEntry { idx, cost });
    }

    fn pop(&mut self) -> Option<usize> {
        self.entries.pop().map(|e| e.idx)
    }

    /// Move `idx` to the position matching its new cost.
    fn update(&mut self, idx: usize, cost: f64) {
        if let Some(at) = self.entries.iter().position(|e| e.idx == idx) {
            self.entries.remove(at);
        }
        self.insert(idx, cost);
    }
}

/// An incremental best-first search from a start cell to a goal cell.
///
/// A session borrows the grid and the agent immutably and keeps every piece
/// of search state (open list, parents, per-cell state) to itself, so any
/// number of sessions can run over the same grid. Drive it one expansion at
/// a time with [`advance`](Self::advance), or to the end with
/// [`run`](Self::run); both reach the same outcome.
pub struct Session<'a, E: CostEstimator = WeightedSum> {
    grid: &'a Grid3,
    agent: &'a AgentProfile,
    estimator: E,
    start: usize,
    goal: Option<usize>,
    nodes: Vec<Node>,
    generation: u32,
    open: OpenList,
    visited: Vec<usize>,
    result: Vec<Point3>,
    status: Status,
    steps: usize,
    memo: HashMap<usize, Vec<usize>>,
    neighbors: Neighbors,
    nbuf: Vec<usize>,
}

impl<'a> Session<'a, WeightedSum> {
    /// Create a session searching from `start` to `goal`.
    pub fn new(
        grid: &'a Grid3,
        agent: &'a AgentProfile,
        start: Point3,
        goal: Point3,
    ) -> Result<Self, SearchError> {
        Self::with_estimator(grid, agent, start, Some(goal), WeightedSum)
    }

    /// Create a goal-less session that floods the region reachable from
    /// `start`.
    ///
    /// It never succeeds: once the region or the step budget is exhausted it
    /// ends in [`Status::Failure`], and [`visited`](Self::visited) lists the
    /// cells it reached.
    pub fn probe(
        grid: &'a Grid3,
        agent: &'a AgentProfile,
        start: Point3,
    ) -> Result<Self, SearchError> {
        Self::with_estimator(grid, agent, start, None, WeightedSum)
    }
}

impl<'a, E: CostEstimator> Session<'a, E> {
    /// Create a session with a custom cost estimator.
    pub fn with_estimator(
        grid: &'a Grid3,
        agent: &'a AgentProfile,
        start: Point3,
        goal: Option<Point3>,
        estimator: E,
    ) -> Result<Self, SearchError> {
        let start_idx = grid.idx(start).ok_or(SearchError::OutOfBounds(start))?;
        let goal_idx = match goal {
            Some(g) => Some(grid.idx(g).ok_or(SearchError::OutOfBounds(g))?),
            None => None,
        };
        let mut session = Self {
            grid,
            agent,
            estimator,
            start: start_idx,
            goal: goal_idx,
            nodes: vec![Node::default(); grid.len()],
            generation: 0,
            open: OpenList::default(),
            visited: Vec::new(),
            result: Vec::new(),
            status: Status::Processing,
            steps: 0,
            memo: HashMap::new(),
            neighbors: Neighbors::new(),
            nbuf: Vec::with_capacity(26),
        };
        session.reset();
        Ok(session)
    }

    /// Discard all search progress and re-seed the open list with the start
    /// cell.
    ///
    /// Memoized neighbors of a static grid survive a reset.
    pub fn reset(&mut self) {
        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.open.clear();
        self.visited.clear();
        self.result.clear();
        self.status = Status::Processing;
        self.steps = 0;

        let start = self.start;
        let (g, cost) = self.evaluate(start);
        let node = &mut self.nodes[start];
        node.g = g;
        node.cost = cost;
        node.parent = NO_PARENT;
        node.state = NodeState::Open;
        node.generation = self.generation;
        self.open.insert(start, cost);
    }

    /// Perform one expansion. Does nothing once the session is terminal.
    pub fn advance(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        if self.steps >= self.agent.step_limit() {
            return self.finish(Status::Failure);
        }
        let Some(ci) = self.open.pop() else {
            return self.finish(Status::Failure);
        };
        self.nodes[ci].state = NodeState::Closed;
        self.visited.push(ci);

        if Some(ci) == self.goal {
            self.reconstruct(ci);
            return self.finish(Status::Success);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        self.fill_admissible(ci, &mut nbuf);
        log::trace!(
            "step {}: expanding {} with {} candidates",
            self.steps,
            self.grid.point(ci),
            nbuf.len()
        );

        for &ni in nbuf.iter() {
            let (g, cost) = self.evaluate(ni);
            let cur_gen = self.generation;
            let n = &mut self.nodes[ni];
            if n.generation != cur_gen {
                *n = Node {
                    generation: cur_gen,
                    ..Node::default()
                };
            }
            match n.state {
                NodeState::Closed => {}
                NodeState::None => {
                    n.g = g;
                    n.cost = cost;
                    n.parent = ci;
                    n.state = NodeState::Open;
                    self.open.insert(ni, cost);
                }
                NodeState::Open => {
                    if g < n.g {
                        n.g = g;
                        n.cost = cost;
                        n.parent = ci;
                        self.open.update(ni, cost);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        self.steps += 1;
        Status::Processing
    }

    /// Advance until the session reaches a terminal state.
    pub fn run(&mut self) -> Status {
        while self.advance() == Status::Processing {}
        self.status
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The path from start to goal, both included. Empty unless the session
    /// succeeded.
    #[inline]
    pub fn result(&self) -> &[Point3] {
        &self.result
    }

    /// Number of completed expansions.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn start(&self) -> Point3 {
        self.grid.point(self.start)
    }

    #[inline]
    pub fn goal(&self) -> Option<Point3> {
        self.goal.map(|g| self.grid.point(g))
    }

    #[inline]
    pub fn agent(&self) -> &AgentProfile {
        self.agent
    }

    /// Number of cells waiting in the open list.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Bookkeeping state of the cell at `p`. Cells outside the grid read as
    /// [`NodeState::None`].
    pub fn state_of(&self, p: Point3) -> NodeState {
        self.live_node(p).map_or(NodeState::None, |n| n.state)
    }

    /// Predecessor of the cell at `p` on its current best route.
    pub fn parent_of(&self, p: Point3) -> Option<Point3> {
        let n = self.live_node(p)?;
        (n.parent != NO_PARENT).then(|| self.grid.point(n.parent))
    }

    /// Cost assigned to the cell at `p`, if it has been seen.
    pub fn cost_of(&self, p: Point3) -> Option<f64> {
        self.live_node(p).map(|n| n.cost)
    }

    /// Closed cells in the order they were closed.
    pub fn visited(&self) -> impl Iterator<Item = Point3> + '_ {
        self.visited.iter().map(|&i| self.grid.point(i))
    }

    /// Costs of every cell seen so far, for [`Grid3::record_costs`].
    pub fn costs(&self) -> Vec<(Point3, f64)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.generation == self.generation && n.state != NodeState::None)
            .map(|(i, n)| (self.grid.point(i), n.cost))
            .collect()
    }

    fn live_node(&self, p: Point3) -> Option<&Node> {
        let i = self.grid.idx(p)?;
        let n = &self.nodes[i];
        (n.generation == self.generation).then_some(n)
    }

    /// Distance-from-start estimate and cost of the cell at `idx`.
    fn evaluate(&self, idx: usize) -> (i32, f64) {
        let cell = self.grid.cell(idx);
        let p = cell.pos();
        let g = self.agent.estimate(p, Some(self.grid.point(self.start)));
        let h = self
            .agent
            .estimate(p, self.goal.map(|gi| self.grid.point(gi)));
        let mut attrs = cell.attrs;
        attrs.set(Attr::GValue, f64::from(g));
        attrs.set(Attr::HValue, f64::from(h));
        (g, self.estimator.calculate(self.agent.weights(), &attrs))
    }

    fn fill_admissible(&mut self, idx: usize, buf: &mut Vec<usize>) {
        buf.clear();
        if self.grid.is_static() {
            if let Some(cached) = self.memo.get(&idx) {
                buf.extend_from_slice(cached);
                return;
            }
        }
        buf.extend_from_slice(self.neighbors.admissible(self.grid, self.agent, idx));
        if self.grid.is_static() {
            self.memo.insert(idx, buf.clone());
        }
    }

    fn reconstruct(&mut self, goal: usize) {
        self.result.clear();
        let mut ci = goal;
        while ci != NO_PARENT {
            self.result.push(self.grid.point(ci));
            ci = self.nodes[ci].parent;
        }
        self.result.reverse();
    }

    fn finish(&mut self, status: Status) -> Status {
        self.status = status;
        match status {
            Status::Success => log::debug!(
                "search {} -> {} succeeded after {} steps, path length {}",
                self.start(),
                self.goal().map_or_else(|| "-".to_string(), |g| g.to_string()),
                self.steps,
                self.result.len()
            ),
            _ => log::debug!(
                "search from {} ended with {:?} after {} steps ({} open)",
                self.start(),
                status,
                self.steps,
                self.open.len()
            ),
        }
        status
    }
}
