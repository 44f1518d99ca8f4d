//! Agent profiles: who is searching, and how they weigh the terrain.

use std::fmt;
use std::str::FromStr;

use strata_core::{Attr, AttributeSet, Cell, Direction, Point3};

use crate::heuristic::Heuristic;

/// Footing and climbing strength of an agent, weakest first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Capability {
    /// Walks on floors and never moves diagonally.
    Weak,
    #[default]
    Normal,
    /// Clings to floors and side walls.
    Strong,
    /// Clings to floors, walls and ceilings.
    Excellent,
    /// Flies; needs no footing.
    Extreme,
}

const FOOT_DOWN: [Direction; 1] = [Direction::Down];
const FOOT_SIDES: [Direction; 5] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Back,
    Direction::Forward,
];
const FOOT_ALL: [Direction; 6] = Direction::AXES;
const FOOT_NONE: [Direction; 1] = [Direction::Here];

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Weak,
        Capability::Normal,
        Capability::Strong,
        Capability::Excellent,
        Capability::Extreme,
    ];

    /// Directions in which a neighbor can count as standing support.
    ///
    /// `Direction::Here` means no support is required.
    pub fn footing_directions(self) -> &'static [Direction] {
        match self {
            Capability::Weak | Capability::Normal => &FOOT_DOWN,
            Capability::Strong => &FOOT_SIDES,
            Capability::Excellent => &FOOT_ALL,
            Capability::Extreme => &FOOT_NONE,
        }
    }

    /// Whether the agent considers the 20 diagonal neighbors at all.
    #[inline]
    pub const fn moves_diagonally(self) -> bool {
        !matches!(self, Capability::Weak)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::Weak => "WEAK",
            Capability::Normal => "NORMAL",
            Capability::Strong => "STRONG",
            Capability::Excellent => "EXCELLENT",
            Capability::Extreme => "EXTREME",
        };
        f.write_str(s)
    }
}

impl FromStr for Capability {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCapabilityError(s.to_string()))
    }
}

/// Error returned when a capability name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCapabilityError(pub String);

impl fmt::Display for ParseCapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown capability \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseCapabilityError {}

// ---------------------------------------------------------------------------
// AgentConfig
// ---------------------------------------------------------------------------

/// Plain configuration from which an [`AgentProfile`] is built.
///
/// With the `serde` feature every field is optional when deserializing;
/// missing fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub capability: Capability,
    /// Highest cell difficulty the agent can enter.
    pub walk_capacity: f64,
    /// Per-attribute importance used by the cost estimator.
    pub weights: AttributeSet,
    pub heuristic: Heuristic,
    /// Maximum number of expansions per search.
    pub step_limit: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            capability: Capability::Normal,
            walk_capacity: 1.0,
            weights: AttributeSet::new()
                .with(Attr::GValue, 1.0)
                .with(Attr::HValue, 1.0)
                .with(Attr::Difficulty, 1.0),
            heuristic: Heuristic::Manhattan,
            step_limit: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// AgentProfile
// ---------------------------------------------------------------------------

/// Search configuration of one agent. Immutable once built.
///
/// No validation happens at construction: an empty weight table simply
/// makes every cell cost zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentProfile {
    config: AgentConfig,
}

impl AgentProfile {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[inline]
    pub fn capability(&self) -> Capability {
        self.config.capability
    }

    #[inline]
    pub fn walk_capacity(&self) -> f64 {
        self.config.walk_capacity
    }

    #[inline]
    pub fn weights(&self) -> &AttributeSet {
        &self.config.weights
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.config.heuristic
    }

    #[inline]
    pub fn step_limit(&self) -> usize {
        self.config.step_limit
    }

    /// Whether the agent can enter `cell`.
    #[inline]
    pub fn can_pass(&self, cell: &Cell) -> bool {
        self.config.walk_capacity >= cell.difficulty()
    }

    /// See [`Capability::footing_directions`].
    #[inline]
    pub fn footing_directions(&self) -> &'static [Direction] {
        self.config.capability.footing_directions()
    }

    /// Estimate with the configured heuristic.
    #[inline]
    pub fn estimate(&self, a: Point3, b: Option<Point3>) -> i32 {
        self.config.heuristic.estimate(a, b)
    }
}

impl From<AgentConfig> for AgentProfile {
    fn from(config: AgentConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_pass_compares_difficulty() {
        let agent = AgentProfile::new(AgentConfig {
            walk_capacity: 5.0,
            ..Default::default()
        });
        let easy = Cell::new(Point3::ZERO).with_attr(Attr::Difficulty, 5.0);
        let hard = Cell::new(Point3::ZERO).with_attr(Attr::Difficulty, 5.5);
        assert!(agent.can_pass(&easy));
        assert!(!agent.can_pass(&hard));
        assert!(agent.can_pass(&Cell::new(Point3::ZERO)));
    }

    #[test]
    fn footing_sets() {
        use Direction::*;
        assert_eq!(Capability::Weak.footing_directions(), &[Down]);
        assert_eq!(Capability::Normal.footing_directions(), &[Down]);
        assert_eq!(
            Capability::Strong.footing_directions(),
            &[Down, Left, Right, Back, Forward]
        );
        let excellent = Capability::Excellent.footing_directions();
        assert_eq!(excellent.len(), 6);
        assert!(excellent.contains(&Up));
        assert_eq!(Capability::Extreme.footing_directions(), &[Here]);
    }

    #[test]
    fn only_weak_is_orthogonal() {
        assert!(!Capability::Weak.moves_diagonally());
        for c in &Capability::ALL[1..] {
            assert!(c.moves_diagonally());
        }
    }

    #[test]
    fn capability_parse_and_order() {
        assert_eq!("EXCELLENT".parse::<Capability>(), Ok(Capability::Excellent));
        assert_eq!("strong".parse::<Capability>(), Ok(Capability::Strong));
        assert!("godlike".parse::<Capability>().is_err());
        assert!(Capability::Weak < Capability::Extreme);
        assert_eq!(Capability::Extreme.to_string(), "EXTREME");
    }

    #[test]
    fn estimate_uses_configured_heuristic() {
        let agent = AgentProfile::new(AgentConfig {
            heuristic: Heuristic::Euclidean,
            ..Default::default()
        });
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(1, 2, 2);
        assert_eq!(agent.estimate(a, Some(b)), 9);
        assert_eq!(agent.estimate(a, None), 0);
    }

    #[test]
    fn empty_weights_are_accepted() {
        let agent = AgentProfile::new(AgentConfig {
            weights: AttributeSet::ZERO,
            ..Default::default()
        });
        assert_eq!(agent.weights().sum(), 0.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let json = r#"{ "capability": "EXCELLENT", "walk_capacity": 1000.0 }"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.capability, Capability::Excellent);
        assert_eq!(config.walk_capacity, 1000.0);
        assert_eq!(config.step_limit, AgentConfig::default().step_limit);
        assert_eq!(config.heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn partial_weight_table() {
        let json = r#"{ "weights": { "difficulty": 2.0 } }"#;
        let config: AgentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.weights, AttributeSet::new().with(Attr::Difficulty, 2.0));
        assert_eq!(config.weights[Attr::GValue], 0.0);
        assert_eq!(config.capability, Capability::Normal);
    }

    #[test]
    fn default_weights_serialize_by_name() {
        let json = serde_json::to_value(AgentConfig::default()).unwrap();
        assert_eq!(
            json["weights"],
            serde_json::json!({ "difficulty": 1.0, "g_value": 1.0, "h_value": 1.0 })
        );
    }

    #[test]
    fn config_round_trip() {
        let config = AgentConfig {
            capability: Capability::Strong,
            heuristic: Heuristic::Euclidean,
            step_limit: 42,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AgentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
