use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

// Default palette: five translucent highlight slots.
pub const DEFAULT_SLOT_COLORS: [Color; 5] = [
    Color::rgba(0xF4, 0x43, 0x36, 0x80),
    Color::rgba(0x4C, 0xAF, 0x50, 0x80),
    Color::rgba(0xFF, 0x98, 0x00, 0x80),
    Color::rgba(0x21, 0x96, 0xF3, 0x80),
    Color::rgba(0x00, 0x96, 0x88, 0x80),
];
pub const BASE_COLOR: Color = Color::rgba(0x21, 0x21, 0x21, 0xFF);
pub const SINGLE_HIGHLIGHT: Color = Color::rgba(0xF4, 0x43, 0x36, 0xFF);

pub const MAX_SLOTS: usize = 64;

/// Highlight colours shared by the registry and the render surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// One colour per slot; the slot pool has exactly this many entries.
    pub slots: Vec<Color>,
    /// Colour of the unselected scene.
    pub base: Color,
    /// Draw an overlay point over every point of a selection.
    pub mark_points: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Palette { slots: DEFAULT_SLOT_COLORS.to_vec(), base: BASE_COLOR, mark_points: true }
    }
}

impl Palette {
    /// Every selection shares one colour.
    pub fn single(color: Color) -> Self {
        Palette { slots: vec![color], base: BASE_COLOR, mark_points: false }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn color(&self, slot: usize) -> Color {
        self.slots.get(slot).copied().unwrap_or(SINGLE_HIGHLIGHT)
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.slots.is_empty() {
            return Err(PaletteError::NoSlots);
        }
        if self.slots.len() > MAX_SLOTS {
            return Err(PaletteError::TooManySlots(self.slots.len()));
        }
        Ok(())
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Palette, PaletteError> {
        let p: Palette = serde_json::from_value(v).map_err(|e| PaletteError::Json(e.to_string()))?;
        p.validate()?;
        Ok(p)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteError {
    NoSlots,
    TooManySlots(usize),
    Json(String),
}

impl PaletteError {
    pub fn code(&self) -> &'static str {
        match self {
            PaletteError::NoSlots | PaletteError::TooManySlots(_) => "invalid_palette",
            PaletteError::Json(_) => "invalid_json",
        }
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::NoSlots => f.write_str("palette needs at least one slot colour"),
            PaletteError::TooManySlots(n) => {
                write!(f, "palette has {} slots, max {}", n, MAX_SLOTS)
            }
            PaletteError::Json(m) => write!(f, "palette json: {}", m),
        }
    }
}

impl std::error::Error for PaletteError {}
