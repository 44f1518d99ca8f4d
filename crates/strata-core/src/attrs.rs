//! Per-cell traversal attributes and agent weight tables.
//!
//! An [`AttributeSet`] is a fixed record of named numeric fields indexed by
//! [`Attr`]. Every field starts at zero, so a key that was never written
//! reads as `0.0`. The same type backs both cell attributes and the agent's
//! weight table; a weight table that only sets a few keys simply leaves the
//! others at zero.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign};
use std::str::FromStr;

/// Attribute key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Attr {
    /// How hard the cell is to enter; compared against an agent's walk
    /// capacity.
    Difficulty,
    /// Distance-from-start estimate written during a search.
    GValue,
    /// Distance-to-goal estimate written during a search.
    HValue,
    /// Grip offered to an agent standing against this cell. Also accepted
    /// as `resistance` when parsing.
    Friction,
    Temperature,
}

impl Attr {
    /// Number of attribute keys.
    pub const COUNT: usize = 5;

    /// All keys in storage order.
    pub const ALL: [Attr; Attr::COUNT] = [
        Attr::Difficulty,
        Attr::GValue,
        Attr::HValue,
        Attr::Friction,
        Attr::Temperature,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Attr::Difficulty => "difficulty",
            Attr::GValue => "g",
            Attr::HValue => "h",
            Attr::Friction => "friction",
            Attr::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attr {
    type Err = ParseAttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "difficulty" => Ok(Attr::Difficulty),
            "g" | "g_value" | "gvalue" => Ok(Attr::GValue),
            "h" | "h_value" | "hvalue" => Ok(Attr::HValue),
            "friction" | "resistance" => Ok(Attr::Friction),
            "temperature" | "temp" => Ok(Attr::Temperature),
            _ => Err(ParseAttrError(s.to_string())),
        }
    }
}

/// Error returned when an attribute name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAttrError(pub String);

impl fmt::Display for ParseAttrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown attribute \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseAttrError {}

// ---------------------------------------------------------------------------
// AttributeSet
// ---------------------------------------------------------------------------

/// A zero-initialised record of attribute values.
///
/// With the `serde` feature it is stored as a map from attribute name to
/// value, e.g. `{"difficulty": 2.0}`. Keys left out read as zero and zero
/// values are not written.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<Attr, f64>", into = "BTreeMap<Attr, f64>")
)]
pub struct AttributeSet {
    values: [f64; Attr::COUNT],
}

impl AttributeSet {
    /// A set with every key at zero.
    pub const ZERO: Self = Self {
        values: [0.0; Attr::COUNT],
    };

    /// Create an all-zero set.
    #[inline]
    pub const fn new() -> Self {
        Self::ZERO
    }

    /// A set with every key at `v`.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self {
            values: [v; Attr::COUNT],
        }
    }

    /// Builder-style setter.
    #[inline]
    pub fn with(mut self, attr: Attr, v: f64) -> Self {
        self.values[attr.index()] = v;
        self
    }

    /// Read a value. Keys never written read as zero.
    #[inline]
    pub fn get(&self, attr: Attr) -> f64 {
        self.values[attr.index()]
    }

    /// Write a value.
    #[inline]
    pub fn set(&mut self, attr: Attr, v: f64) {
        self.values[attr.index()] = v;
    }

    /// Element-wise sum with another set.
    #[inline]
    pub fn add_set(&mut self, other: &AttributeSet) -> &mut Self {
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
        self
    }

    /// Element-wise product with another set.
    #[inline]
    pub fn mul_set(&mut self, other: &AttributeSet) -> &mut Self {
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a *= b;
        }
        self
    }

    /// Add `v` to every key.
    #[inline]
    pub fn add_scalar(&mut self, v: f64) -> &mut Self {
        for a in self.values.iter_mut() {
            *a += v;
        }
        self
    }

    /// Multiply every key by `v`.
    #[inline]
    pub fn mul_scalar(&mut self, v: f64) -> &mut Self {
        for a in self.values.iter_mut() {
            *a *= v;
        }
        self
    }

    /// Sum of all values.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Iterate over `(key, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Attr, f64)> + '_ {
        Attr::ALL.iter().map(move |&a| (a, self.values[a.index()]))
    }
}

impl Index<Attr> for AttributeSet {
    type Output = f64;
    #[inline]
    fn index(&self, attr: Attr) -> &f64 {
        &self.values[attr.index()]
    }
}

impl IndexMut<Attr> for AttributeSet {
    #[inline]
    fn index_mut(&mut self, attr: Attr) -> &mut f64 {
        &mut self.values[attr.index()]
    }
}

impl FromIterator<(Attr, f64)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (Attr, f64)>>(iter: I) -> Self {
        let mut set = Self::ZERO;
        for (a, v) in iter {
            set.set(a, v);
        }
        set
    }
}

impl From<BTreeMap<Attr, f64>> for AttributeSet {
    fn from(map: BTreeMap<Attr, f64>) -> Self {
        map.into_iter().collect()
    }
}

impl From<AttributeSet> for BTreeMap<Attr, f64> {
    fn from(set: AttributeSet) -> Self {
        set.iter().filter(|&(_, v)| v != 0.0).collect()
    }
}

impl Add for AttributeSet {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self.add_set(&rhs);
        self
    }
}

impl Add<f64> for AttributeSet {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: f64) -> Self {
        self.add_scalar(rhs);
        self
    }
}

impl AddAssign for AttributeSet {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_set(&rhs);
    }
}

impl Mul for AttributeSet {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: Self) -> Self {
        self.mul_set(&rhs);
        self
    }
}

impl Mul<f64> for AttributeSet {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f64) -> Self {
        self.mul_scalar(rhs);
        self
    }
}

impl MulAssign for AttributeSet {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.mul_set(&rhs);
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (a, v) in self.iter().filter(|&(_, v)| v != 0.0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{a}: {v}")?;
            first = false;
        }
        f.write_str("}")
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn attribute_set_round_trip() {
        let s = AttributeSet::new()
            .with(Attr::Difficulty, 2.0)
            .with(Attr::Temperature, -4.5);
        let json = serde_json::to_string(&s).unwrap();
        let back: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn serialized_by_name() {
        let s = AttributeSet::new()
            .with(Attr::Difficulty, 2.0)
            .with(Attr::HValue, 1.0);
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"difficulty":2.0,"h_value":1.0}"#
        );
    }

    #[test]
    fn missing_keys_read_as_zero() {
        let s: AttributeSet = serde_json::from_str(r#"{"friction": 0.5}"#).unwrap();
        assert_eq!(s, AttributeSet::new().with(Attr::Friction, 0.5));
        let empty: AttributeSet = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AttributeSet::ZERO);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(serde_json::from_str::<AttributeSet>(r#"{"weight": 1.0}"#).is_err());
    }
}
