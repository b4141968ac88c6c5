use crate::model::{EntityDescriptor, EntityKind};
use serde::Serialize;
use std::fmt;

/// A point name split around its first `_<digits>` run, `A_12b` -> (`A`, `12`, `b`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PointLabel {
    pub base: String,
    pub subscript: Option<String>,
    pub tail: String,
}

impl PointLabel {
    pub fn parse(id: &str) -> PointLabel {
        match id.split_once('_') {
            Some((base, after)) => {
                let rest = after.trim_start_matches(|c: char| c.is_ascii_digit());
                let digits = after.len() - rest.len();
                PointLabel {
                    base: base.to_string(),
                    subscript: Some(after[..digits].to_string()),
                    tail: after[digits..].to_string(),
                }
            }
            None => PointLabel { base: id.to_string(), subscript: None, tail: String::new() },
        }
    }
}

impl fmt::Display for PointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if let Some(sub) = &self.subscript {
            for c in sub.chars() {
                let d = c.to_digit(10).unwrap_or(0);
                // U+2080..U+2089
                let ch = char::from_u32(0x2080 + d).unwrap_or(c);
                write!(f, "{}", ch)?;
            }
        }
        f.write_str(&self.tail)
    }
}

/// Text of a figure reference: an optional glyph followed by point groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
    pub glyph: Option<char>,
    pub groups: Vec<Vec<PointLabel>>,
}

pub fn glyph(kind: EntityKind) -> Option<char> {
    match kind {
        EntityKind::Triangle => Some('△'),
        EntityKind::Angle | EntityKind::AngleBetweenLines => Some('∠'),
        EntityKind::Cycle => Some('↻'),
        _ => None,
    }
}

pub fn label(d: &EntityDescriptor) -> Label {
    let points: Vec<PointLabel> = d.point_ids().iter().map(|p| PointLabel::parse(p)).collect();
    let groups = match d.kind() {
        EntityKind::AngleBetweenLines => {
            let mut first = points;
            let second = first.split_off(2);
            vec![first, second]
        }
        _ => vec![points],
    };
    Label { glyph: glyph(d.kind()), groups }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(g) = self.glyph {
            write!(f, "{}", g)?;
        }
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            for p in group {
                write!(f, "{}", p)?;
            }
        }
        Ok(())
    }
}
