use std::fmt;
use std::str::FromStr;

use strata_core::{Cell, Point3};

use crate::distance::{euclidean_sq, manhattan};

/// Distance estimator used to rank cells during a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// Sum of absolute per-axis deltas.
    #[default]
    Manhattan,
    /// Squared Euclidean distance.
    Euclidean,
}

impl Heuristic {
    /// Estimate the distance from `a` to `b`. An absent `b` estimates zero.
    #[inline]
    pub fn estimate(self, a: Point3, b: Option<Point3>) -> i32 {
        let Some(b) = b else {
            return 0;
        };
        match self {
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Euclidean => euclidean_sq(a, b),
        }
    }

    /// [`estimate`](Self::estimate) between two cells.
    #[inline]
    pub fn estimate_cells(self, a: &Cell, b: Option<&Cell>) -> i32 {
        self.estimate(a.pos(), b.map(Cell::pos))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => f.write_str("manhattan"),
            Heuristic::Euclidean => f.write_str("euclidean"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(ParseHeuristicError(s.to_string())),
        }
    }
}

/// Error returned when a heuristic name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHeuristicError(pub String);

impl fmt::Display for ParseHeuristicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown heuristic \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseHeuristicError {}
