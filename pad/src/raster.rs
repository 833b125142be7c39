//! Raster surface: the backing pixel buffer strokes are stamped into.
//!
//! Segments render as overlapping filled discs stepped at sub-pixel
//! intervals, which keeps handwriting smooth at any angle without a full
//! anti-aliased line rasterizer. The buffer lives in device-pixel
//! dimensions; callers convert logical points before drawing.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageOutputFormat, Rgba, RgbaImage};
use thiserror::Error;

use crate::consts::{BACKGROUND_RGBA, DEFAULT_INK_WIDTH, INK_RGBA, STAMP_STEP_PX};
use crate::geometry::Point;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Ink styling applied to subsequent segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Disc diameter in buffer pixels.
    pub width: f64,
    pub color: [u8; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_INK_WIDTH,
            color: INK_RGBA,
        }
    }
}

/// An RGBA drawing buffer in device-pixel dimensions.
pub struct RasterSurface {
    image: RgbaImage,
    style: StrokeStyle,
}

impl RasterSurface {
    /// Create a surface filled with the background color.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), Rgba(BACKGROUND_RGBA)),
            style: StrokeStyle::default(),
        }
    }

    /// Fill the whole surface with the background color. Styling is kept.
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba(BACKGROUND_RGBA);
        }
    }

    /// Reallocate the buffer at a new size. Pixels are discarded and the
    /// stroke style reset: reconfiguring the backing store loses styling
    /// state, so callers must re-apply theirs afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True while no pixel differs from the background.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|px| px.0 == BACKGROUND_RGBA)
    }

    // --- Drawing ---

    /// Stamp a single dot (a pen-down with no movement), in buffer
    /// coordinates.
    pub fn draw_dot(&mut self, at: Point) {
        self.stamp(at);
    }

    /// Render the segment `from → to`, in buffer coordinates.
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < STAMP_STEP_PX {
            self.stamp(to);
            return;
        }

        let steps = (distance / STAMP_STEP_PX).ceil() as u32;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.stamp(Point::new(from.x + dx * t, from.y + dy * t));
        }
    }

    fn stamp(&mut self, center: Point) {
        let radius = (self.style.width / 2.0).max(0.5);
        let w = i64::from(self.image.width());
        let h = i64::from(self.image.height());
        let x0 = (center.x - radius).floor() as i64;
        let x1 = (center.x + radius).ceil() as i64;
        let y0 = (center.y - radius).floor() as i64;
        let y1 = (center.y + radius).ceil() as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                let cx = x as f64 + 0.5 - center.x;
                let cy = y as f64 + 0.5 - center.y;
                if cx * cx + cy * cy <= radius * radius {
                    self.image.put_pixel(x as u32, y as u32, Rgba(self.style.color));
                }
            }
        }
    }

    // --- Snapshots ---

    /// Encode the surface as a PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Png`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }

    /// The surface as a `data:image/png;base64,…` URL — the transport form
    /// carried by recognition requests.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Png`] if the encoder fails.
    pub fn to_data_url(&self) -> Result<String, RasterError> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ))
    }
}
