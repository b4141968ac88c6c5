// Ingestion caps for scene and proof descriptions coming from untrusted JSON

// Scene size caps
pub const MAX_POINTS: usize = 10_000;
pub const MAX_LINES: usize = 50_000;
pub const MAX_CIRCLES: usize = 10_000;

// Proof caps; a step may be shared by many parents, so the unfolded tree is capped separately
pub const MAX_PROOF_STEPS: usize = 20_000;
pub const MAX_TREE_NODES: usize = 200_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;
pub const RADIUS_MAX: f64 = 10_000_000.0;

// Board margin around the scene extents
pub const VIEWPORT_SCALE: f64 = 1.3;
// Smallest extent a viewport is built from, so a lone point still gets a usable board
pub const MIN_VIEWPORT_EXTENT: f64 = 1.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_radius_bounds(r: f64) -> bool { r.is_finite() && r >= 0.0 && r <= RADIUS_MAX }
