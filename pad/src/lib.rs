//! Drawing-pad engine for handwritten math capture.
//!
//! This crate owns the drawing surface end to end: translating raw
//! mouse/touch input into logical drawing-space points, tracking the
//! pen-down/pen-up gesture state, stamping strokes into an in-memory raster
//! buffer, and producing the PNG snapshot the recognition service consumes.
//! It is fully synchronous and has no network or UI dependencies; the host
//! layer is responsible only for wiring platform events into
//! [`engine::PadEngine`] and shipping snapshots upstream.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level pad engine owning geometry, strokes, and pixels |
//! | [`geometry`] | CSS/device/logical coordinate mapping and resize handling |
//! | [`input`] | Mouse/touch samples and pointer normalization |
//! | [`stroke`] | The Idle/Drawing state machine and the stroke store |
//! | [`raster`] | RGBA backing buffer, segment stamping, PNG snapshots |
//! | [`consts`] | Shared numeric constants (default size, ink defaults) |

pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod raster;
pub mod stroke;
