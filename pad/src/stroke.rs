//! Stroke recording: the Idle/Drawing state machine and the stroke store.
//!
//! `begin` and `end` are strict about state; `extend` deliberately is not.
//! Devices fire move events outside the drawing window (a pointer
//! re-entering the surface after leaving without a clean up), and treating
//! those as silent no-ops avoids phantom lines without every caller having
//! to track gesture state itself.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use crate::geometry::Point;

/// Whether a stroke is currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// One continuous pen-down-to-pen-up path. Sealed against further mutation
/// once closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// The recorded points, in draw order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Owns all strokes for the current session plus the active gesture state.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    state: DrawState,
    closed: Vec<Stroke>,
    open: Vec<Point>,
}

impl StrokeRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Transitions ---

    /// Open a new stroke at `point` and enter `Drawing`.
    ///
    /// Called while already `Drawing` (a missed pointer-up), the open
    /// stroke is sealed first so no recorded ink is lost.
    pub fn begin(&mut self, point: Point) {
        if self.state == DrawState::Drawing {
            self.seal();
        }
        self.state = DrawState::Drawing;
        self.open.push(point);
    }

    /// Append `point` to the open stroke. Silent no-op while `Idle`.
    pub fn extend(&mut self, point: Point) {
        if self.state != DrawState::Drawing {
            return;
        }
        self.open.push(point);
    }

    /// Seal the open stroke and return to `Idle`. No-op while `Idle`.
    pub fn end(&mut self) {
        if self.state != DrawState::Drawing {
            return;
        }
        self.seal();
        self.state = DrawState::Idle;
    }

    /// Discard all strokes and force `Idle`.
    pub fn clear(&mut self) {
        self.state = DrawState::Idle;
        self.closed.clear();
        self.open.clear();
    }

    fn seal(&mut self) {
        if !self.open.is_empty() {
            self.closed.push(Stroke {
                points: std::mem::take(&mut self.open),
            });
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// All sealed strokes, oldest first.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.closed
    }

    /// Points of the stroke currently being drawn, if any.
    #[must_use]
    pub fn open_points(&self) -> &[Point] {
        &self.open
    }

    /// Last point of the open stroke, if one is being drawn.
    #[must_use]
    pub fn last_open_point(&self) -> Option<Point> {
        self.open.last().copied()
    }

    /// True when nothing has been recorded — no sealed strokes and no open
    /// points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty() && self.open.is_empty()
    }
}
