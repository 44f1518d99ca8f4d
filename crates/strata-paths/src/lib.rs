//! Weighted best-first search over 3D grids.
//!
//! This crate searches a [`Grid3`](strata_core::Grid3) on behalf of an
//! agent whose abilities and preferences are described by an
//! [`AgentProfile`]:
//!
//! - **Heuristics**: Manhattan and squared-Euclidean distance
//!   ([`Heuristic`]).
//! - **Cost estimation**: a weighted sum of cell attributes
//!   ([`WeightedSum`]), or any [`CostEstimator`].
//! - **Adjacency**: 26-connected moves filtered by footing and
//!   corner-cutting rules ([`Neighbors`]).
//! - **Search**: a resumable session that can be stepped one expansion at a
//!   time or run to completion ([`Session`]).
//!
//! # Example
//!
//! ```
//! use strata_core::{Attr, Cell, Grid3, Point3};
//! use strata_paths::{AgentConfig, AgentProfile, Capability, Session, Status};
//!
//! let grid = Grid3::from_fn(Point3::new(4, 1, 4), Point3::ZERO, |p| {
//!     Cell::new(p).with_attr(Attr::Friction, 1.0)
//! })
//! .unwrap();
//! let agent = AgentProfile::new(AgentConfig {
//!     capability: Capability::Strong,
//!     ..Default::default()
//! });
//! let mut session = Session::new(&grid, &agent, Point3::ZERO, Point3::new(3, 0, 3)).unwrap();
//! assert_eq!(session.run(), Status::Success);
//! assert_eq!(session.result().last(), Some(&Point3::new(3, 0, 3)));
//! ```

mod agent;
mod distance;
mod estimator;
mod heuristic;
mod neighbors;
mod session;
mod traits;

pub use agent::{AgentConfig, AgentProfile, Capability, ParseCapabilityError};
pub use distance::{chebyshev, euclidean_sq, manhattan};
pub use estimator::WeightedSum;
pub use heuristic::{Heuristic, ParseHeuristicError};
pub use neighbors::{Neighbors, has_footing};
pub use session::{NodeState, SearchError, Session, Status};
pub use traits::CostEstimator;
