//! Pointer normalization: raw mouse/touch events to logical drawing-space.
//!
//! The two input modalities arrive in different coordinate frames: mouse
//! positions are already offset relative to the surface, touch contacts are
//! in client (viewport) coordinates. Both collapse into one
//! [`PointerSample`] variant consumed uniformly by [`to_logical_point`],
//! which applies the displayed-vs-buffer scale correction and the device
//! pixel ratio division.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use thiserror::Error;

use crate::geometry::{Point, SurfaceGeometry};

/// A single active touch contact, in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchContact {
    #[must_use]
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// A raw pointer event, tagged by input modality.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    /// Mouse/pen position already offset relative to the surface.
    Mouse { x: f64, y: f64 },
    /// Active touch contacts in client coordinates; the first is used.
    /// A touch-end event carries an empty list.
    Touch { contacts: Vec<TouchContact> },
}

/// The surface's bounding rectangle as currently displayed, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Why a pointer sample could not be normalized.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Touch event with no active contacts; callers ignore the event.
    #[error("pointer event has no active contact")]
    NoActiveContact,
    /// The displayed rect has no measurable area yet; retried on the next
    /// layout pass.
    #[error("surface display rect has no measurable area")]
    DisplayNotMeasured,
}

/// Map a raw pointer sample to a logical drawing-space point.
///
/// Touch contacts are made surface-relative by subtracting the rect origin;
/// mouse positions already are. The result is scale-corrected for any
/// displayed-vs-logical size mismatch and clamped into logical bounds.
///
/// # Errors
///
/// [`InputError::NoActiveContact`] for a touch sample with no contacts;
/// [`InputError::DisplayNotMeasured`] for a rect without positive area.
pub fn to_logical_point(
    sample: &PointerSample,
    rect: DisplayRect,
    geometry: &SurfaceGeometry,
) -> Result<Point, InputError> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return Err(InputError::DisplayNotMeasured);
    }

    let raw = match sample {
        PointerSample::Mouse { x, y } => Point::new(*x, *y),
        PointerSample::Touch { contacts } => {
            let first = contacts.first().ok_or(InputError::NoActiveContact)?;
            Point::new(first.client_x - rect.left, first.client_y - rect.top)
        }
    };

    Ok(geometry.display_to_logical(raw, rect.width, rect.height))
}
