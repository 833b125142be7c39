use super::*;
use crate::geometry::Point;
use crate::input::{DisplayRect, PointerSample, TouchContact};
use crate::stroke::DrawState;

fn mouse(x: f64, y: f64) -> PointerSample {
    PointerSample::Mouse { x, y }
}

fn rect(width: f64, height: f64) -> DisplayRect {
    DisplayRect::new(0.0, 0.0, width, height)
}

fn configured_pad() -> PadEngine {
    let mut pad = PadEngine::new();
    pad.configure(400.0, 400.0, 1.0);
    pad
}

// --- Configuration ---

#[test]
fn new_engine_is_unconfigured() {
    let pad = PadEngine::new();
    assert!(pad.geometry().is_none());
    assert!(pad.is_empty());
}

#[test]
fn pointer_down_before_configure_is_an_error() {
    let mut pad = PadEngine::new();
    let err = pad
        .on_pointer_down(&mouse(10.0, 10.0), rect(400.0, 400.0))
        .unwrap_err();
    assert!(matches!(err, PadError::NotConfigured));
}

#[test]
fn snapshot_before_configure_is_an_error() {
    let pad = PadEngine::new();
    assert!(matches!(
        pad.snapshot_data_url(),
        Err(PadError::NotConfigured)
    ));
}

#[test]
fn configure_sets_device_pixel_geometry() {
    let mut pad = PadEngine::new();
    pad.configure(300.0, 150.0, 2.0);
    let g = pad.geometry().unwrap();
    assert_eq!(g.buffer_px(), (600, 300));
    assert_eq!(g.device_pixel_ratio, 2.0);
}

#[test]
fn configure_zero_size_uses_default_surface() {
    let mut pad = PadEngine::new();
    pad.configure(0.0, 0.0, 1.0);
    let g = pad.geometry().unwrap();
    assert_eq!(g.buffer_px(), (400, 400));
}

// --- Pointer flow ---

#[test]
fn pointer_flow_records_one_stroke() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    pad.on_pointer_down(&mouse(10.0, 10.0), r).unwrap();
    pad.on_pointer_move(&mouse(20.0, 20.0), r).unwrap();
    pad.on_pointer_move(&mouse(30.0, 40.0), r).unwrap();
    pad.on_pointer_up();

    assert_eq!(pad.draw_state(), DrawState::Idle);
    assert_eq!(pad.strokes().len(), 1);
    assert_eq!(
        pad.strokes()[0].points(),
        &[
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(30.0, 40.0)
        ]
    );
}

#[test]
fn move_while_idle_records_nothing() {
    let mut pad = configured_pad();
    pad.on_pointer_move(&mouse(50.0, 50.0), rect(400.0, 400.0))
        .unwrap();
    assert!(pad.is_empty());
}

#[test]
fn pointer_up_while_idle_is_a_no_op() {
    let mut pad = configured_pad();
    pad.on_pointer_up();
    assert_eq!(pad.draw_state(), DrawState::Idle);
}

#[test]
fn touch_flow_records_surface_relative_points() {
    let mut pad = configured_pad();
    let r = DisplayRect::new(100.0, 50.0, 400.0, 400.0);
    let start = PointerSample::Touch {
        contacts: vec![TouchContact::new(150.0, 100.0)],
    };
    let drag = PointerSample::Touch {
        contacts: vec![TouchContact::new(200.0, 150.0)],
    };
    pad.on_pointer_down(&start, r).unwrap();
    pad.on_pointer_move(&drag, r).unwrap();
    pad.on_pointer_up();

    assert_eq!(
        pad.strokes()[0].points(),
        &[Point::new(50.0, 50.0), Point::new(100.0, 100.0)]
    );
}

#[test]
fn touch_without_contacts_is_ignored() {
    let mut pad = configured_pad();
    let empty = PointerSample::Touch { contacts: vec![] };
    pad.on_pointer_down(&empty, rect(400.0, 400.0)).unwrap();
    assert_eq!(pad.draw_state(), DrawState::Idle);
    assert!(pad.is_empty());
}

#[test]
fn drawing_inks_the_surface() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    let blank = pad.snapshot_data_url().unwrap();
    pad.on_pointer_down(&mouse(100.0, 100.0), r).unwrap();
    pad.on_pointer_move(&mouse(200.0, 200.0), r).unwrap();
    pad.on_pointer_up();
    assert_ne!(pad.snapshot_data_url().unwrap(), blank);
}

// --- Resize ---

#[test]
fn resize_mid_stroke_maps_through_new_geometry() {
    // Container shrinks 800×200 → 400×200 with the gesture still open. A
    // stale 800-wide mapping would double the x of later points.
    let mut pad = PadEngine::new();
    pad.configure(800.0, 200.0, 1.0);
    pad.on_pointer_down(&mouse(100.0, 50.0), rect(800.0, 200.0))
        .unwrap();

    pad.configure(400.0, 200.0, 1.0);
    pad.on_pointer_move(&mouse(100.0, 50.0), rect(400.0, 200.0))
        .unwrap();
    pad.on_pointer_up();

    assert_eq!(
        pad.strokes()[0].points(),
        &[Point::new(100.0, 50.0), Point::new(100.0, 50.0)]
    );
}

#[test]
fn resize_replays_recorded_strokes() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    pad.on_pointer_down(&mouse(100.0, 100.0), r).unwrap();
    pad.on_pointer_move(&mouse(200.0, 200.0), r).unwrap();
    pad.on_pointer_up();

    pad.configure(400.0, 400.0, 2.0);
    let mut blank = PadEngine::new();
    blank.configure(400.0, 400.0, 2.0);
    assert_ne!(
        pad.snapshot_data_url().unwrap(),
        blank.snapshot_data_url().unwrap()
    );
    assert_eq!(pad.strokes().len(), 1);
}

#[test]
fn resize_keeps_open_stroke_drawable() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    pad.on_pointer_down(&mouse(10.0, 10.0), r).unwrap();
    pad.configure(400.0, 400.0, 1.0);
    assert_eq!(pad.draw_state(), DrawState::Drawing);
    pad.on_pointer_move(&mouse(20.0, 20.0), r).unwrap();
    pad.on_pointer_up();
    assert_eq!(
        pad.strokes()[0].points(),
        &[Point::new(10.0, 10.0), Point::new(20.0, 20.0)]
    );
}

// --- clear ---

#[test]
fn clear_discards_strokes_and_ink() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    let blank = pad.snapshot_data_url().unwrap();
    pad.on_pointer_down(&mouse(100.0, 100.0), r).unwrap();
    pad.on_pointer_move(&mouse(200.0, 200.0), r).unwrap();
    pad.on_pointer_up();

    pad.clear();
    assert!(pad.is_empty());
    assert_eq!(pad.draw_state(), DrawState::Idle);
    assert_eq!(pad.snapshot_data_url().unwrap(), blank);
}

#[test]
fn clear_mid_gesture_forces_idle() {
    let mut pad = configured_pad();
    let r = rect(400.0, 400.0);
    pad.on_pointer_down(&mouse(100.0, 100.0), r).unwrap();
    pad.clear();
    assert_eq!(pad.draw_state(), DrawState::Idle);

    // A stray move after the clear stays a no-op.
    pad.on_pointer_move(&mouse(150.0, 150.0), r).unwrap();
    assert!(pad.is_empty());
}

// --- Snapshots ---

#[test]
fn snapshot_is_a_png_data_url() {
    let pad = configured_pad();
    assert!(
        pad.snapshot_data_url()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
}
