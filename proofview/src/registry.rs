use crate::bridge::{BridgeError, OverlayHandle, RenderBridge};
use crate::config::Palette;
use crate::model::{Color, EntityDescriptor};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Usage counters of the highlight colours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorSlots {
    usage: Vec<u32>,
}

impl ColorSlots {
    pub fn new(count: usize) -> Self {
        ColorSlots { usage: vec![0; count.max(1)] }
    }

    /// Least used slot, lowest index on ties.
    pub fn least_used(&self) -> usize {
        let mut best = 0;
        for (i, &u) in self.usage.iter().enumerate() {
            if u < self.usage[best] {
                best = i;
            }
        }
        best
    }

    fn acquire(&mut self, slot: usize) {
        self.usage[slot] += 1;
    }

    fn release(&mut self, slot: usize) {
        self.usage[slot] = self.usage[slot].saturating_sub(1);
    }

    pub fn usage(&self) -> &[u32] {
        &self.usage
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionEntry {
    pub descriptor: EntityDescriptor,
    pub slot: usize,
    pub overlays: Vec<OverlayHandle>,
    pub point_overlays: Vec<OverlayHandle>,
}

/// What a toggle did; views use it to set or clear their "selected" marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Toggled {
    Selected { key: String, slot: usize, color: Color },
    Deselected { key: String, slot: usize },
}

impl Toggled {
    pub fn key(&self) -> &str {
        match self {
            Toggled::Selected { key, .. } | Toggled::Deselected { key, .. } => key,
        }
    }
    pub fn is_selected(&self) -> bool {
        matches!(self, Toggled::Selected { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectError {
    /// A point of the figure is not on the render surface.
    MissingEntity { key: String, point: String },
    /// The surface refused an overlay; everything drawn for the toggle was undone.
    Bridge { key: String, source: BridgeError },
}

impl SelectError {
    pub fn code(&self) -> &'static str {
        match self {
            SelectError::MissingEntity { .. } => "missing_entity",
            SelectError::Bridge { .. } => "bridge_failure",
        }
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::MissingEntity { key, point } => {
                write!(f, "cannot select '{}': point '{}' is not on the board", key, point)
            }
            SelectError::Bridge { key, source } => write!(f, "cannot select '{}': {}", key, source),
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectError::Bridge { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Active figure selections, their colours, and per-point reference counts.
/// All drawing goes through the injected bridge.
pub struct SelectionRegistry<B> {
    bridge: B,
    palette: Palette,
    slots: ColorSlots,
    entries: HashMap<String, SelectionEntry>,
    order: Vec<String>, // pick order
    point_usage: HashMap<String, u32>,
}

impl<B: RenderBridge> SelectionRegistry<B> {
    pub fn new(bridge: B, palette: Palette) -> Self {
        let slots = ColorSlots::new(palette.slot_count());
        SelectionRegistry {
            bridge,
            palette,
            slots,
            entries: HashMap::new(),
            order: Vec::new(),
            point_usage: HashMap::new(),
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn into_bridge(self) -> B {
        self.bridge
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Option<&SelectionEntry> {
        self.entries.get(key)
    }

    pub fn slot_of(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(|e| e.slot)
    }

    pub fn slot_usage(&self) -> &[u32] {
        self.slots.usage()
    }

    pub fn point_usage(&self, point: &str) -> u32 {
        self.point_usage.get(point).copied().unwrap_or(0)
    }

    pub fn is_highlighted(&self, point: &str) -> bool {
        self.point_usage(point) > 0
    }

    /// Selected keys in the order they were picked.
    pub fn picked(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selects `d`, or deselects it when already selected.
    pub fn toggle(&mut self, d: &EntityDescriptor) -> Result<Toggled, SelectError> {
        if self.entries.contains_key(d.key()) {
            Ok(self.deselect(d.key()))
        } else {
            self.select(d)
        }
    }

    /// Deselects everything, most recent first.
    pub fn clear(&mut self) -> Vec<Toggled> {
        let keys: Vec<String> = self.order.iter().rev().cloned().collect();
        keys.iter().map(|k| self.deselect(k)).collect()
    }

    fn select(&mut self, d: &EntityDescriptor) -> Result<Toggled, SelectError> {
        if let Some(p) = d.point_ids().iter().find(|p| !self.bridge.contains_point(p)) {
            log::warn!("skipping selection of '{}': unknown point '{}'", d.key(), p);
            return Err(SelectError::MissingEntity { key: d.key().to_string(), point: p.clone() });
        }
        let slot = self.slots.least_used();
        let color = self.palette.color(slot);
        self.slots.acquire(slot);
        self.retain_points(d);

        let mut entry = SelectionEntry {
            descriptor: d.clone(),
            slot,
            overlays: Vec::new(),
            point_overlays: Vec::new(),
        };
        if let Err(source) = self.draw(&mut entry, color) {
            // roll back to the state before this call
            self.erase(&entry);
            self.release_points(d);
            self.slots.release(slot);
            log::warn!("selection of '{}' rolled back: {}", d.key(), source);
            return Err(SelectError::Bridge { key: d.key().to_string(), source });
        }

        log::debug!("selected '{}' in slot {}", d.key(), slot);
        self.entries.insert(d.key().to_string(), entry);
        self.order.push(d.key().to_string());
        Ok(Toggled::Selected { key: d.key().to_string(), slot, color })
    }

    fn deselect(&mut self, key: &str) -> Toggled {
        let Some(entry) = self.entries.remove(key) else {
            return Toggled::Deselected { key: key.to_string(), slot: 0 };
        };
        self.release_points(&entry.descriptor);
        self.erase(&entry);
        self.slots.release(entry.slot);
        self.order.retain(|k| k != key);
        log::debug!("deselected '{}' from slot {}", key, entry.slot);
        Toggled::Deselected { key: key.to_string(), slot: entry.slot }
    }

    fn draw(&mut self, entry: &mut SelectionEntry, color: Color) -> Result<(), BridgeError> {
        for l in entry.descriptor.line_primitives() {
            let h = self.bridge.create_overlay_line(&l.start, &l.end, l.kind, color)?;
            entry.overlays.push(h);
        }
        if self.palette.mark_points {
            for p in entry.descriptor.point_ids() {
                if let Some(h) = self.bridge.create_overlay_point(p, color)? {
                    entry.point_overlays.push(h);
                }
            }
        }
        Ok(())
    }

    fn erase(&mut self, entry: &SelectionEntry) {
        for &h in entry.point_overlays.iter().chain(entry.overlays.iter()) {
            self.bridge.remove_overlay(h);
        }
    }

    fn retain_points(&mut self, d: &EntityDescriptor) {
        for p in d.point_ids() {
            let count = self.point_usage.entry(p.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                self.bridge.highlight_point(p);
            }
        }
    }

    fn release_points(&mut self, d: &EntityDescriptor) {
        for p in d.point_ids() {
            let Some(count) = self.point_usage.get_mut(p.as_str()) else { continue };
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.point_usage.remove(p.as_str());
                self.bridge.unhighlight_point(p);
            }
        }
    }
}
