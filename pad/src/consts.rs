//! Shared numeric constants for the pad crate.

// ── Surface ─────────────────────────────────────────────────────

/// Fallback logical width in CSS pixels, used when the container reports no
/// measurable size (not yet laid out).
pub const DEFAULT_LOGICAL_WIDTH: f64 = 400.0;

/// Fallback logical height in CSS pixels.
pub const DEFAULT_LOGICAL_HEIGHT: f64 = 400.0;

// ── Ink ─────────────────────────────────────────────────────────

/// Default ink width in logical (CSS) pixels.
pub const DEFAULT_INK_WIDTH: f64 = 2.0;

/// Ink color (opaque black).
pub const INK_RGBA: [u8; 4] = [0, 0, 0, 255];

/// Surface background (opaque white). Recognition expects dark ink on a
/// light ground.
pub const BACKGROUND_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Distance between disc stamps along a segment, in buffer pixels.
pub const STAMP_STEP_PX: f64 = 0.5;
