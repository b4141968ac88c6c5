use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric entity families a figure tag can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Point,
    Segment,
    Vector,
    Ray,
    Line,
    Triangle,
    Polygon,
    Angle,
    AngleBetweenLines,
    Cycle,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Point,
        EntityKind::Segment,
        EntityKind::Vector,
        EntityKind::Ray,
        EntityKind::Line,
        EntityKind::Triangle,
        EntityKind::Polygon,
        EntityKind::Angle,
        EntityKind::AngleBetweenLines,
        EntityKind::Cycle,
    ];

    /// Tag prefix, the text before the first separator.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Point => "pt",
            EntityKind::Segment => "seg",
            EntityKind::Vector => "vec",
            EntityKind::Ray => "ray",
            EntityKind::Line => "ln",
            EntityKind::Triangle => "tr",
            EntityKind::Polygon => "plg",
            EntityKind::Angle => "ang",
            EntityKind::AngleBetweenLines => "ang4",
            EntityKind::Cycle => "cyc",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<EntityKind> {
        EntityKind::ALL.iter().copied().find(|k| k.prefix() == prefix)
    }

    pub fn arity(self) -> Arity {
        match self {
            EntityKind::Point => Arity::Exactly(1),
            EntityKind::Segment | EntityKind::Vector | EntityKind::Ray | EntityKind::Line => {
                Arity::Exactly(2)
            }
            EntityKind::Triangle | EntityKind::Angle => Arity::Exactly(3),
            EntityKind::AngleBetweenLines => Arity::Exactly(4),
            EntityKind::Polygon => Arity::AtLeast(3),
            EntityKind::Cycle => Arity::AtLeast(1),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Point => "point",
            EntityKind::Segment => "segment",
            EntityKind::Vector => "vector",
            EntityKind::Ray => "ray",
            EntityKind::Line => "line",
            EntityKind::Triangle => "triangle",
            EntityKind::Polygon => "polygon",
            EntityKind::Angle => "angle",
            EntityKind::AngleBetweenLines => "angle between lines",
            EntityKind::Cycle => "cycle",
        };
        f.write_str(name)
    }
}

/// Number of point identifiers a kind takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "count", rename_all = "snake_case")]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }

    pub fn min(self) -> usize {
        match self {
            Arity::Exactly(k) | Arity::AtLeast(k) => k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "{}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

/// How an overlay line is extended past its defining points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Segment,
    Ray,
    Line,
}

impl RenderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderKind::Segment => "segment",
            RenderKind::Ray => "ray",
            RenderKind::Line => "line",
        }
    }

    /// Extends beyond the start point.
    pub fn straight_first(self) -> bool {
        matches!(self, RenderKind::Line)
    }

    /// Extends beyond the end point.
    pub fn straight_last(self) -> bool {
        matches!(self, RenderKind::Ray | RenderKind::Line)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub start: String,
    pub end: String,
    pub kind: RenderKind,
}

impl LinePrimitive {
    pub fn new(start: &str, end: &str, kind: RenderKind) -> Self {
        LinePrimitive {
            start: start.to_string(),
            end: end.to_string(),
            kind,
        }
    }
}

/// A decoded figure tag. Only constructed through the codec, so the key,
/// points and derived lines always agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct EntityDescriptor {
    pub(crate) key: String,
    pub(crate) kind: EntityKind,
    pub(crate) point_ids: Vec<String>,
    pub(crate) line_primitives: Vec<LinePrimitive>,
}

impl EntityDescriptor {
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
    pub fn point_ids(&self) -> &[String] {
        &self.point_ids
    }
    pub fn line_primitives(&self) -> &[LinePrimitive] {
        &self.line_primitives
    }
    /// Vertex of a three-point angle.
    pub fn vertex(&self) -> Option<&str> {
        match self.kind {
            EntityKind::Angle => self.point_ids.get(1).map(|s| s.as_str()),
            _ => None,
        }
    }
}

/// RGBA colour, (de)serialized as `#RRGGBB[AA]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { byte(6)? } else { 0xFF };
        Some(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
    }

    pub fn to_hex(self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", s)))
    }
}
