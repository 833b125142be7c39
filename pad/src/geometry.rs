//! Surface geometry: the mapping between CSS pixels, device pixels, and
//! logical drawing-space.
//!
//! The surface is displayed at some CSS size, backed by a pixel buffer at
//! CSS size × device pixel ratio (so strokes stay sharp on high-density
//! displays), and strokes are stored in logical drawing-space — CSS-pixel
//! units independent of density. [`SurfaceGeometry`] is recomputed as one
//! value on every resize, so no consumer ever observes a half-updated
//! mapping.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH};

/// A point in logical drawing-space (CSS-pixel units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The surface's size in each coordinate system.
///
/// Invariant: `buffer_width == css_width * device_pixel_ratio` (and
/// analogously for height). Buffer dimensions are kept as `f64` so the
/// invariant holds exactly for fractional ratios; rounding to whole pixels
/// happens only at the raster boundary via [`SurfaceGeometry::buffer_px`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub device_pixel_ratio: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub buffer_width: f64,
    pub buffer_height: f64,
}

impl SurfaceGeometry {
    /// Compute the geometry for a measured container size and device pixel
    /// ratio. Invoked on mount and on every resize.
    ///
    /// A zero or non-finite measured size (container not yet laid out)
    /// falls back to the fixed default logical size instead of producing a
    /// degenerate zero-area surface. A non-positive or non-finite ratio
    /// falls back to 1.0.
    #[must_use]
    pub fn configure(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let measurable =
            css_width.is_finite() && css_width > 0.0 && css_height.is_finite() && css_height > 0.0;
        let (css_width, css_height) = if measurable {
            (css_width, css_height)
        } else {
            (DEFAULT_LOGICAL_WIDTH, DEFAULT_LOGICAL_HEIGHT)
        };

        Self {
            device_pixel_ratio: dpr,
            css_width,
            css_height,
            buffer_width: css_width * dpr,
            buffer_height: css_height * dpr,
        }
    }

    /// Convert a position relative to the displayed surface (CSS pixels)
    /// into logical drawing-space.
    ///
    /// When the displayed size differs from the logical size (responsive
    /// scaling), each axis is corrected by `buffer / displayed`, then
    /// divided by the device pixel ratio — the buffer already includes that
    /// ratio. The result is clamped into logical bounds.
    #[must_use]
    pub fn display_to_logical(&self, raw: Point, display_width: f64, display_height: f64) -> Point {
        let scale_x = self.buffer_width / display_width;
        let scale_y = self.buffer_height / display_height;
        self.clamp(Point::new(
            raw.x * scale_x / self.device_pixel_ratio,
            raw.y * scale_y / self.device_pixel_ratio,
        ))
    }

    /// Convert a logical point to buffer (device-pixel) coordinates.
    #[must_use]
    pub fn logical_to_buffer(&self, point: Point) -> Point {
        Point::new(
            point.x * self.device_pixel_ratio,
            point.y * self.device_pixel_ratio,
        )
    }

    /// Clamp a point into `[0, css_width] × [0, css_height]`.
    #[must_use]
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.css_width),
            point.y.clamp(0.0, self.css_height),
        )
    }

    /// Backing-store dimensions in whole pixels, at least 1×1.
    #[must_use]
    pub fn buffer_px(&self) -> (u32, u32) {
        (
            self.buffer_width.round().max(1.0) as u32,
            self.buffer_height.round().max(1.0) as u32,
        )
    }
}
