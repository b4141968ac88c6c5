use crate::model::{Color, RenderKind};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Opaque id of an overlay owned by the render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeError {
    pub message: String,
}

impl BridgeError {
    pub fn new(message: impl Into<String>) -> Self {
        BridgeError { message: message.into() }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render surface: {}", self.message)
    }
}

impl std::error::Error for BridgeError {}

/// Drawing operations the selection registry needs from a rendering surface.
pub trait RenderBridge {
    /// Whether `id` names a point drawn on the surface.
    fn contains_point(&self, id: &str) -> bool;

    fn create_overlay_line(
        &mut self,
        start: &str,
        end: &str,
        kind: RenderKind,
        color: Color,
    ) -> Result<OverlayHandle, BridgeError>;

    /// Marker drawn over a selected point. Surfaces without point markers
    /// keep the default and draw nothing.
    fn create_overlay_point(
        &mut self,
        _id: &str,
        _color: Color,
    ) -> Result<Option<OverlayHandle>, BridgeError> {
        Ok(None)
    }

    fn remove_overlay(&mut self, handle: OverlayHandle);

    fn highlight_point(&mut self, id: &str);

    fn unhighlight_point(&mut self, id: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BridgeCall {
    CreateLine {
        handle: OverlayHandle,
        start: String,
        end: String,
        kind: RenderKind,
        color: Color,
    },
    CreatePoint { handle: OverlayHandle, point: String, color: Color },
    Remove { handle: OverlayHandle },
    Highlight { point: String },
    Unhighlight { point: String },
}

/// Headless surface: knows a set of point names and records every call.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    points: HashSet<String>,
    next_handle: u32,
    live: BTreeSet<OverlayHandle>,
    highlighted: BTreeSet<String>,
    calls: Vec<BridgeCall>,
    point_markers: bool,
}

impl Recorder {
    pub fn new<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recorder { points: points.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn from_scene(scene: &Scene) -> Self {
        Recorder::new(scene.point_names())
    }

    pub fn with_point_markers(mut self, on: bool) -> Self {
        self.point_markers = on;
        self
    }

    pub fn calls(&self) -> &[BridgeCall] {
        &self.calls
    }

    /// Takes the calls recorded since the last drain.
    pub fn drain_calls(&mut self) -> Vec<BridgeCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn live_overlays(&self) -> &BTreeSet<OverlayHandle> {
        &self.live
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted.contains(id)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &str> {
        self.highlighted.iter().map(|s| s.as_str())
    }

    fn next(&mut self) -> OverlayHandle {
        let h = OverlayHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.live.insert(h);
        h
    }
}

impl RenderBridge for Recorder {
    fn contains_point(&self, id: &str) -> bool {
        self.points.contains(id)
    }

    fn create_overlay_line(
        &mut self,
        start: &str,
        end: &str,
        kind: RenderKind,
        color: Color,
    ) -> Result<OverlayHandle, BridgeError> {
        if !self.points.contains(start) || !self.points.contains(end) {
            return Err(BridgeError::new(format!("no line through {} and {}", start, end)));
        }
        let handle = self.next();
        self.calls.push(BridgeCall::CreateLine {
            handle,
            start: start.into(),
            end: end.into(),
            kind,
            color,
        });
        Ok(handle)
    }

    fn create_overlay_point(
        &mut self,
        id: &str,
        color: Color,
    ) -> Result<Option<OverlayHandle>, BridgeError> {
        if !self.point_markers {
            return Ok(None);
        }
        let handle = self.next();
        self.calls.push(BridgeCall::CreatePoint { handle, point: id.into(), color });
        Ok(Some(handle))
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        self.live.remove(&handle);
        self.calls.push(BridgeCall::Remove { handle });
    }

    fn highlight_point(&mut self, id: &str) {
        self.highlighted.insert(id.to_string());
        self.calls.push(BridgeCall::Highlight { point: id.into() });
    }

    fn unhighlight_point(&mut self, id: &str) {
        self.highlighted.remove(id);
        self.calls.push(BridgeCall::Unhighlight { point: id.into() });
    }
}
