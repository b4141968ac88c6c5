// Figure tag codec: `<prefix>__<id_1>__...__<id_n>` <-> EntityDescriptor

use crate::model::{Arity, EntityDescriptor, EntityKind, LinePrimitive, RenderKind};
use std::fmt;
use std::str::FromStr;

pub const SEPARATOR: &str = "__";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The tag starts with no known prefix.
    UnrecognizedPrefix { tag: String },
    /// A known prefix with the wrong number of point ids.
    ArityMismatch { kind: EntityKind, expected: Arity, found: usize },
    /// A point id handed to [`EntityDescriptor::new`] that would not encode
    /// to a decodable tag (empty, contains the separator, or starts/ends
    /// with `_`). `decode` never returns it.
    MalformedPoint { kind: EntityKind, position: usize, id: String },
}

impl DecodeError {
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::UnrecognizedPrefix { .. } => "unrecognized_prefix",
            DecodeError::ArityMismatch { .. } => "arity_mismatch",
            DecodeError::MalformedPoint { .. } => "malformed_point",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnrecognizedPrefix { tag } => {
                write!(f, "tag '{}' has no recognized prefix", tag)
            }
            DecodeError::ArityMismatch { kind, expected, found } => write!(
                f,
                "{} expects {} point ids, found {}",
                kind, expected, found
            ),
            DecodeError::MalformedPoint { kind, position, id } => write!(
                f,
                "{} point id #{} '{}' is malformed",
                kind, position, id
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

#[inline]
pub fn is_valid_point_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(SEPARATOR) && !id.starts_with('_') && !id.ends_with('_')
}

pub fn decode(tag: &str) -> Result<EntityDescriptor, DecodeError> {
    let (prefix, rest) = match tag.split_once(SEPARATOR) {
        Some((p, r)) => (p, Some(r)),
        None => (tag, None),
    };
    let kind = EntityKind::from_prefix(prefix).ok_or_else(|| DecodeError::UnrecognizedPrefix {
        tag: tag.to_string(),
    })?;
    let points: Vec<&str> = match rest {
        Some(r) => r.split(SEPARATOR).collect(),
        None => Vec::new(),
    };
    let found = points.iter().filter(|p| !p.is_empty()).count();
    let arity = kind.arity();
    // an empty id counts as a missing one
    if found != points.len() || !arity.accepts(found) {
        return Err(DecodeError::ArityMismatch { kind, expected: arity, found });
    }
    Ok(assemble(kind, &points))
}

/// Inverse of [`decode`].
pub fn encode(d: &EntityDescriptor) -> String {
    encode_parts(d.kind, &d.point_ids)
}

fn encode_parts<S: AsRef<str>>(kind: EntityKind, points: &[S]) -> String {
    let mut out = String::from(kind.prefix());
    for p in points {
        out.push_str(SEPARATOR);
        out.push_str(p.as_ref());
    }
    out
}

fn build<S: AsRef<str>>(kind: EntityKind, points: &[S]) -> Result<EntityDescriptor, DecodeError> {
    let arity = kind.arity();
    if !arity.accepts(points.len()) {
        return Err(DecodeError::ArityMismatch { kind, expected: arity, found: points.len() });
    }
    if let Some((position, id)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !is_valid_point_id(p.as_ref()))
    {
        return Err(DecodeError::MalformedPoint { kind, position, id: id.as_ref().to_string() });
    }
    Ok(assemble(kind, points))
}

fn assemble<S: AsRef<str>>(kind: EntityKind, points: &[S]) -> EntityDescriptor {
    let point_ids: Vec<String> = points.iter().map(|p| p.as_ref().to_string()).collect();
    let line_primitives = derive_lines(kind, &point_ids);
    EntityDescriptor { key: encode_parts(kind, &point_ids), kind, point_ids, line_primitives }
}

fn derive_lines(kind: EntityKind, p: &[String]) -> Vec<LinePrimitive> {
    use RenderKind::{Line, Ray, Segment};
    match kind {
        EntityKind::Point => Vec::new(),
        EntityKind::Segment | EntityKind::Vector => vec![LinePrimitive::new(&p[0], &p[1], Segment)],
        EntityKind::Ray => vec![LinePrimitive::new(&p[0], &p[1], Ray)],
        EntityKind::Line => vec![LinePrimitive::new(&p[0], &p[1], Line)],
        EntityKind::Triangle => vec![
            LinePrimitive::new(&p[0], &p[1], Segment),
            LinePrimitive::new(&p[0], &p[2], Segment),
            LinePrimitive::new(&p[1], &p[2], Segment),
        ],
        // vertex is the middle id
        EntityKind::Angle => vec![
            LinePrimitive::new(&p[1], &p[0], Ray),
            LinePrimitive::new(&p[1], &p[2], Ray),
        ],
        EntityKind::AngleBetweenLines => vec![
            LinePrimitive::new(&p[0], &p[1], Ray),
            LinePrimitive::new(&p[2], &p[3], Ray),
        ],
        EntityKind::Polygon => (0..p.len())
            .map(|i| LinePrimitive::new(&p[i], &p[(i + 1) % p.len()], Segment))
            .collect(),
        // No closed-loop primitive exists for cycles yet.
        EntityKind::Cycle => Vec::new(),
    }
}

impl EntityDescriptor {
    /// Builds a descriptor from parts, validating arity and point ids.
    pub fn new<S: AsRef<str>>(kind: EntityKind, points: &[S]) -> Result<Self, DecodeError> {
        build(kind, points)
    }
}

impl FromStr for EntityDescriptor {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl fmt::Display for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
