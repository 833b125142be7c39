//! The drawing-pad engine: one owned state struct for geometry, strokes,
//! and pixels.
//!
//! Data flow: platform pointer/touch events → [`crate::input`]
//! normalization → [`crate::stroke::StrokeRecorder`] (state machine) →
//! [`crate::raster::RasterSurface`] (pixels). `configure` runs on mount and
//! on every resize, and is atomic with respect to stroke commands — no
//! pointer event ever observes a half-configured surface.
//!
//! Host event mapping: mouse-down and touch-start route to
//! [`PadEngine::on_pointer_down`], mouse-move and touch-move to
//! [`PadEngine::on_pointer_move`], and mouse-up, mouse-leave, touch-end,
//! and touch-cancel all route to [`PadEngine::on_pointer_up`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use thiserror::Error;

use crate::consts::DEFAULT_INK_WIDTH;
use crate::geometry::{Point, SurfaceGeometry};
use crate::input::{self, DisplayRect, InputError, PointerSample};
use crate::raster::{RasterError, RasterSurface, StrokeStyle};
use crate::stroke::{DrawState, Stroke, StrokeRecorder};

#[derive(Debug, Error)]
pub enum PadError {
    /// Drawing or snapshotting before the first `configure`.
    #[error("drawing surface is not configured")]
    NotConfigured,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// The drawing pad. Created unconfigured; [`PadEngine::configure`] must run
/// (on mount, then on every resize) before pointer events are accepted.
#[derive(Default)]
pub struct PadEngine {
    geometry: Option<SurfaceGeometry>,
    surface: Option<RasterSurface>,
    recorder: StrokeRecorder,
}

impl PadEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Geometry ---

    /// (Re)configure the surface for a measured container size and device
    /// pixel ratio.
    ///
    /// Reallocates the backing buffer at the new device-pixel size, resets
    /// and re-applies ink styling (reallocating discards styling state),
    /// then replays every recorded stroke — sealed and open — through the
    /// new geometry. Points normalized after this call map through the new
    /// mapping only.
    pub fn configure(&mut self, css_width: f64, css_height: f64, device_pixel_ratio: f64) {
        let geometry = SurfaceGeometry::configure(css_width, css_height, device_pixel_ratio);
        let (width, height) = geometry.buffer_px();

        let mut surface = match self.surface.take() {
            Some(mut surface) => {
                surface.resize(width, height);
                surface
            }
            None => RasterSurface::new(width, height),
        };
        surface.set_style(StrokeStyle {
            width: DEFAULT_INK_WIDTH * geometry.device_pixel_ratio,
            ..StrokeStyle::default()
        });

        self.geometry = Some(geometry);
        self.surface = Some(surface);
        self.replay();
    }

    fn replay(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        for stroke in self.recorder.strokes() {
            replay_points(geometry, surface, stroke.points());
        }
        replay_points(geometry, surface, self.recorder.open_points());
    }

    // --- Pointer events ---

    /// Begin a stroke at the normalized point. A touch sample without an
    /// active contact is ignored.
    ///
    /// # Errors
    ///
    /// [`PadError::NotConfigured`] before the first `configure`;
    /// [`InputError::DisplayNotMeasured`] for a zero-area display rect.
    pub fn on_pointer_down(
        &mut self,
        sample: &PointerSample,
        rect: DisplayRect,
    ) -> Result<(), PadError> {
        let Some(point) = self.normalize(sample, rect)? else {
            return Ok(());
        };
        self.recorder.begin(point);
        if let (Some(geometry), Some(surface)) = (self.geometry, self.surface.as_mut()) {
            surface.draw_dot(geometry.logical_to_buffer(point));
        }
        Ok(())
    }

    /// Extend the open stroke to the normalized point. A no-op while idle:
    /// stray move events after an unclean pointer-up must not draw.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PadEngine::on_pointer_down`].
    pub fn on_pointer_move(
        &mut self,
        sample: &PointerSample,
        rect: DisplayRect,
    ) -> Result<(), PadError> {
        if self.recorder.state() != DrawState::Drawing {
            return Ok(());
        }
        let Some(point) = self.normalize(sample, rect)? else {
            return Ok(());
        };
        let previous = self.recorder.last_open_point();
        self.recorder.extend(point);
        if let (Some(geometry), Some(surface)) = (self.geometry, self.surface.as_mut()) {
            match previous {
                Some(prev) => surface.draw_segment(
                    geometry.logical_to_buffer(prev),
                    geometry.logical_to_buffer(point),
                ),
                None => surface.draw_dot(geometry.logical_to_buffer(point)),
            }
        }
        Ok(())
    }

    /// Seal the open stroke. Handles pointer-up, pointer-leave, touch-end,
    /// and touch-cancel; a no-op while idle.
    pub fn on_pointer_up(&mut self) {
        self.recorder.end();
    }

    /// Discard all strokes and ink. Geometry and styling are kept.
    pub fn clear(&mut self) {
        self.recorder.clear();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    /// Ok(None) means the event carried no usable position and is ignored.
    fn normalize(
        &self,
        sample: &PointerSample,
        rect: DisplayRect,
    ) -> Result<Option<Point>, PadError> {
        let geometry = self.geometry.as_ref().ok_or(PadError::NotConfigured)?;
        match input::to_logical_point(sample, rect, geometry) {
            Ok(point) => Ok(Some(point)),
            Err(InputError::NoActiveContact) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // --- Snapshots ---

    /// PNG snapshot of the current surface as a data URL, the payload for
    /// recognition requests.
    ///
    /// # Errors
    ///
    /// [`PadError::NotConfigured`] before the first `configure`;
    /// [`RasterError::Png`] if encoding fails.
    pub fn snapshot_data_url(&self) -> Result<String, PadError> {
        let surface = self.surface.as_ref().ok_or(PadError::NotConfigured)?;
        Ok(surface.to_data_url()?)
    }

    // --- Queries ---

    #[must_use]
    pub fn draw_state(&self) -> DrawState {
        self.recorder.state()
    }

    /// All sealed strokes, oldest first.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.recorder.strokes()
    }

    /// Points of the stroke currently being drawn.
    #[must_use]
    pub fn open_points(&self) -> &[Point] {
        self.recorder.open_points()
    }

    #[must_use]
    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        self.geometry
    }

    /// True when nothing has been drawn since creation or the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorder.is_empty()
    }
}

fn replay_points(geometry: SurfaceGeometry, surface: &mut RasterSurface, points: &[Point]) {
    let Some(first) = points.first() else {
        return;
    };
    surface.draw_dot(geometry.logical_to_buffer(*first));
    for pair in points.windows(2) {
        surface.draw_segment(
            geometry.logical_to_buffer(pair[0]),
            geometry.logical_to_buffer(pair[1]),
        );
    }
}
