//! Terrain tables mapping map glyphs to cell kinds and attributes.

use std::collections::BTreeMap;
use std::fmt;

use strata_core::{Attr, AttributeSet, Cell, Point3};

/// A terrain type: kind tag plus attribute record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub kind: String,
    pub attrs: AttributeSet,
}

impl Terrain {
    pub fn new(kind: impl Into<String>, attrs: AttributeSet) -> Self {
        Self {
            kind: kind.into(),
            attrs,
        }
    }

    /// A fresh cell of this terrain at `pos`.
    pub fn cell(&self, pos: Point3) -> Cell {
        Cell::new(pos)
            .with_kind(self.kind.clone())
            .with_attrs(self.attrs)
    }

    /// Overwrite a cell's kind and attributes with this terrain.
    pub fn paint(&self, cell: &mut Cell) {
        cell.kind.clone_from(&self.kind);
        cell.attrs = self.attrs;
    }
}

/// Glyph → terrain lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    entries: BTreeMap<char, Terrain>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the terrain for `glyph` (builder).
    pub fn with(mut self, glyph: char, terrain: Terrain) -> Self {
        self.insert(glyph, terrain);
        self
    }

    /// Add or replace the terrain for `glyph`, returning the previous one.
    pub fn insert(&mut self, glyph: char, terrain: Terrain) -> Option<Terrain> {
        self.entries.insert(glyph, terrain)
    }

    pub fn get(&self, glyph: char) -> Option<&Terrain> {
        self.entries.get(&glyph)
    }

    /// First glyph (in glyph order) whose terrain has the given kind.
    pub fn glyph_of(&self, kind: &str) -> Option<char> {
        self.entries
            .iter()
            .find(|(_, t)| t.kind == kind)
            .map(|(&g, _)| g)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a terrain table.
    ///
    /// One terrain per line as `glyph,KIND,key=value,...`. Blank lines and
    /// lines starting with `//` are skipped. Keys are attribute names as
    /// accepted by [`Attr`]'s `FromStr`; unlisted keys are zero.
    ///
    /// ```text
    /// // glyph, kind, attributes
    /// #,ROCK,difficulty=100,friction=1
    /// .,EMPTY
    /// ~,LAVA,difficulty=5,temperature=900
    /// ```
    pub fn parse(s: &str) -> Result<Self, PaletteError> {
        let mut palette = Self::new();
        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with("//") {
                continue;
            }
            let mut fields = text.split(',');
            let glyph = fields.next().unwrap_or_default();
            let mut chars = glyph.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(PaletteError::BadGlyph {
                    line,
                    field: glyph.to_string(),
                });
            };
            let kind = fields.next().map(str::trim).unwrap_or_default();
            if kind.is_empty() {
                return Err(PaletteError::MissingKind { line });
            }
            let mut attrs = AttributeSet::new();
            for field in fields {
                let field = field.trim();
                let Some((key, value)) = field.split_once('=') else {
                    return Err(PaletteError::Malformed {
                        line,
                        field: field.to_string(),
                    });
                };
                let attr: Attr = key.parse().map_err(|_| PaletteError::UnknownAttr {
                    line,
                    name: key.trim().to_string(),
                })?;
                let v: f64 = value.trim().parse().map_err(|_| PaletteError::BadValue {
                    line,
                    value: value.trim().to_string(),
                })?;
                attrs.set(attr, v);
            }
            if palette.insert(ch, Terrain::new(kind, attrs)).is_some() {
                return Err(PaletteError::Duplicate { line, glyph: ch });
            }
        }
        Ok(palette)
    }
}

/// Errors that can occur when parsing a terrain table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// The glyph field is not exactly one character.
    BadGlyph { line: usize, field: String },
    MissingKind { line: usize },
    /// An attribute field is not `key=value`.
    Malformed { line: usize, field: String },
    UnknownAttr { line: usize, name: String },
    BadValue { line: usize, value: String },
    /// The glyph was already defined on an earlier line.
    Duplicate { line: usize, glyph: char },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadGlyph { line, field } => {
                write!(f, "palette:{line}: glyph \u{201c}{field}\u{201d} must be one character")
            }
            Self::MissingKind { line } => write!(f, "palette:{line}: missing terrain kind"),
            Self::Malformed { line, field } => {
                write!(f, "palette:{line}: expected key=value, got \u{201c}{field}\u{201d}")
            }
            Self::UnknownAttr { line, name } => {
                write!(f, "palette:{line}: unknown attribute \u{201c}{name}\u{201d}")
            }
            Self::BadValue { line, value } => {
                write!(f, "palette:{line}: invalid number \u{201c}{value}\u{201d}")
            }
            Self::Duplicate { line, glyph } => {
                write!(f, "palette:{line}: glyph \u{201c}{glyph}\u{201d} defined twice")
            }
        }
    }
}

impl std::error::Error for PaletteError {}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "
// glyph, kind, attributes
#,ROCK,difficulty=100,friction=1
.,EMPTY
~,LAVA, difficulty = 5 , temperature=900
";

    #[test]
    fn parse_table() {
        let p = Palette::parse(TABLE).unwrap();
        assert_eq!(p.len(), 3);
        let rock = p.get('#').unwrap();
        assert_eq!(rock.kind, "ROCK");
        assert_eq!(rock.attrs[Attr::Difficulty], 100.0);
        assert_eq!(rock.attrs[Attr::Friction], 1.0);
        assert_eq!(p.get('.').unwrap().attrs, AttributeSet::ZERO);
        assert_eq!(p.get('~').unwrap().attrs[Attr::Temperature], 900.0);
        assert_eq!(p.glyph_of("LAVA"), Some('~'));
        assert_eq!(p.glyph_of("WATER"), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Palette::parse("ab,ROCK"),
            Err(PaletteError::BadGlyph {
                line: 1,
                field: "ab".to_string()
            })
        );
        assert_eq!(Palette::parse("#"), Err(PaletteError::MissingKind { line: 1 }));
        assert!(matches!(
            Palette::parse("\n#,ROCK,difficulty"),
            Err(PaletteError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            Palette::parse("#,ROCK,weight=2"),
            Err(PaletteError::UnknownAttr { .. })
        ));
        assert!(matches!(
            Palette::parse("#,ROCK,difficulty=hard"),
            Err(PaletteError::BadValue { .. })
        ));
        assert_eq!(
            Palette::parse("#,ROCK\n#,STONE"),
            Err(PaletteError::Duplicate { line: 2, glyph: '#' })
        );
    }

    #[test]
    fn terrain_cells() {
        let lava = Terrain::new("LAVA", AttributeSet::new().with(Attr::Temperature, 900.0));
        let c = lava.cell(Point3::new(1, 2, 3));
        assert_eq!(c.kind, "LAVA");
        assert_eq!(c.pos(), Point3::new(1, 2, 3));

        let mut other = Cell::new(Point3::ZERO).with_attr(Attr::Difficulty, 9.0);
        lava.paint(&mut other);
        assert_eq!(other.kind, "LAVA");
        assert_eq!(other.difficulty(), 0.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn palette_round_trip() {
        let p = Palette::parse("#,ROCK,difficulty=100,friction=1\n.,EMPTY").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
