use crate::limits;
use crate::scene::{Circle, Scene};
use crate::tree::{ProofStep, ProofTree};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestError {
    Json(String),
    CapsExceeded { what: &'static str, max: usize },
    NonFinite { what: &'static str, name: String },
    DuplicatePoint { name: String },
    UnknownPoint { name: String },
    InvalidPremise { step: usize, premise: usize },
    PremiseCycle { step: usize },
}

impl IngestError {
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Json(_) => "invalid_json",
            IngestError::CapsExceeded { .. } => "caps_exceeded",
            IngestError::NonFinite { .. } => "non_finite",
            IngestError::DuplicatePoint { .. } => "duplicate_point",
            IngestError::UnknownPoint { .. } => "unknown_point",
            IngestError::InvalidPremise { .. } => "invalid_premise",
            IngestError::PremiseCycle { .. } => "premise_cycle",
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Json(m) => write!(f, "malformed description: {}", m),
            IngestError::CapsExceeded { what, max } => write!(f, "{}>{}", what, max),
            IngestError::NonFinite { what, name } => {
                write!(f, "{} '{}' is out of bounds", what, name)
            }
            IngestError::DuplicatePoint { name } => write!(f, "point '{}' is defined twice", name),
            IngestError::UnknownPoint { name } => write!(f, "unknown point '{}'", name),
            IngestError::InvalidPremise { step, premise } => {
                write!(f, "step {} references missing premise {}", step, premise)
            }
            IngestError::PremiseCycle { step } => write!(f, "step {} is its own premise", step),
        }
    }
}

impl std::error::Error for IngestError {}

fn check_caps(s: &Scene) -> Result<(), IngestError> {
    if s.points.len() > limits::MAX_POINTS {
        return Err(IngestError::CapsExceeded { what: "points", max: limits::MAX_POINTS });
    }
    if s.lines.len() > limits::MAX_LINES {
        return Err(IngestError::CapsExceeded { what: "lines", max: limits::MAX_LINES });
    }
    if s.circles.len() > limits::MAX_CIRCLES {
        return Err(IngestError::CapsExceeded { what: "circles", max: limits::MAX_CIRCLES });
    }
    Ok(())
}

fn circle_ok(c: &Circle, known: &HashSet<String>) -> Result<(), IngestError> {
    match c {
        Circle::Radius { x, y, radius } => {
            if !limits::in_coord_bounds(*x)
                || !limits::in_coord_bounds(*y)
                || !limits::in_radius_bounds(*radius)
            {
                let name = format!("({}, {})", x, y);
                return Err(IngestError::NonFinite { what: "circle", name });
            }
        }
        Circle::Through { centre, pt } => {
            for n in [centre, pt] {
                if !known.contains(n) {
                    return Err(IngestError::UnknownPoint { name: n.clone() });
                }
            }
        }
    }
    Ok(())
}

/// Drops points, lines and circles that cannot be drawn; fails only on
/// malformed JSON or caps.
pub fn scene_from_json_impl(v: Value) -> Result<Scene, IngestError> {
    let mut s: Scene = serde_json::from_value(v).map_err(|e| IngestError::Json(e.to_string()))?;
    check_caps(&s)?;
    let mut known = HashSet::new();
    s.points.retain(|p| {
        let ok = limits::in_coord_bounds(p.x)
            && limits::in_coord_bounds(p.y)
            && known.insert(p.name.clone());
        if !ok {
            log::warn!("dropping scene point '{}'", p.name);
        }
        ok
    });
    s.lines.retain(|l| {
        let ok = known.contains(&l.pt0) && known.contains(&l.pt1);
        if !ok {
            log::warn!("dropping scene line {}-{}", l.pt0, l.pt1);
        }
        ok
    });
    s.circles.retain(|c| match circle_ok(c, &known) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("dropping scene circle: {}", e);
            false
        }
    });
    log::debug!(
        "scene loaded: {} points, {} lines, {} circles",
        s.points.len(),
        s.lines.len(),
        s.circles.len()
    );
    Ok(s)
}

pub fn scene_from_json_impl_strict(v: Value) -> Result<Scene, IngestError> {
    let s: Scene = serde_json::from_value(v).map_err(|e| IngestError::Json(e.to_string()))?;
    check_caps(&s)?;
    let mut known = HashSet::new();
    for p in &s.points {
        if !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y) {
            return Err(IngestError::NonFinite { what: "point", name: p.name.clone() });
        }
        if !known.insert(p.name.clone()) {
            return Err(IngestError::DuplicatePoint { name: p.name.clone() });
        }
    }
    for l in &s.lines {
        for n in [&l.pt0, &l.pt1] {
            if !known.contains(n) {
                return Err(IngestError::UnknownPoint { name: n.clone() });
            }
        }
    }
    for c in &s.circles {
        circle_ok(c, &known)?;
    }
    Ok(s)
}

pub fn steps_from_json_impl(v: Value) -> Result<Vec<ProofStep>, IngestError> {
    let steps: Vec<ProofStep> =
        serde_json::from_value(v).map_err(|e| IngestError::Json(e.to_string()))?;
    if steps.len() > limits::MAX_PROOF_STEPS {
        return Err(IngestError::CapsExceeded { what: "steps", max: limits::MAX_PROOF_STEPS });
    }
    Ok(steps)
}

pub fn tree_from_json_impl(v: Value) -> Result<ProofTree, IngestError> {
    let steps = steps_from_json_impl(v)?;
    ProofTree::from_steps(&steps)
}
