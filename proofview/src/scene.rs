use crate::limits;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLine {
    pub pt0: String,
    pub pt1: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Circle {
    Radius { x: f64, y: f64, radius: f64 },
    Through { centre: String, pt: String },
}

/// Diagram the figure tags point into. Point names are the ids tags use.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub points: Vec<ScenePoint>,
    #[serde(default)]
    pub lines: Vec<SceneLine>,
    #[serde(default)]
    pub circles: Vec<Circle>,
}

impl Scene {
    pub fn point(&self, name: &str) -> Option<&ScenePoint> {
        self.points.iter().find(|p| p.name == name)
    }

    pub fn contains_point(&self, name: &str) -> bool {
        self.point(name).is_some()
    }

    pub fn point_names(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.name.as_str())
    }

    /// Square box `[min_x, min_y, max_x, max_y]` the board opens on: centred on
    /// the extents of points and circles, side scaled by `VIEWPORT_SCALE`.
    /// Extents below `MIN_VIEWPORT_EXTENT` are widened to it.
    pub fn viewport(&self) -> Option<[f64; 4]> {
        let mut ext: Option<(f64, f64, f64, f64)> = None;
        let mut add = |x: f64, y: f64| {
            ext = Some(match ext {
                None => (x, y, x, y),
                Some((a, b, c, d)) => (a.min(x), b.min(y), c.max(x), d.max(y)),
            });
        };
        for p in &self.points {
            add(p.x, p.y);
        }
        for c in &self.circles {
            let (cx, cy, r) = match c {
                Circle::Radius { x, y, radius } => (*x, *y, *radius),
                Circle::Through { centre, pt } => match (self.point(centre), self.point(pt)) {
                    (Some(o), Some(p)) => (o.x, o.y, (p.x - o.x).hypot(p.y - o.y)),
                    _ => continue,
                },
            };
            add(cx - r, cy - r);
            add(cx + r, cy + r);
        }
        let (min_x, min_y, max_x, max_y) = ext?;
        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        let extent = (max_x - min_x).max(max_y - min_y).max(limits::MIN_VIEWPORT_EXTENT);
        let half = extent * limits::VIEWPORT_SCALE / 2.0;
        Some([mid_x - half, mid_y - half, mid_x + half, mid_y + half])
    }
}
