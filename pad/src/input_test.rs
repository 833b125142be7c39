#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::{Point, SurfaceGeometry};

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn geometry(css_w: f64, css_h: f64, dpr: f64) -> SurfaceGeometry {
    SurfaceGeometry::configure(css_w, css_h, dpr)
}

fn full_rect(geometry: &SurfaceGeometry) -> DisplayRect {
    DisplayRect::new(0.0, 0.0, geometry.css_width, geometry.css_height)
}

// --- Mouse samples ---

#[test]
fn mouse_passthrough_at_identity() {
    let g = geometry(400.0, 400.0, 1.0);
    let p = to_logical_point(
        &PointerSample::Mouse { x: 120.0, y: 80.0 },
        full_rect(&g),
        &g,
    )
    .unwrap();
    assert!(point_approx_eq(p, Point::new(120.0, 80.0)));
}

#[test]
fn mouse_unaffected_by_rect_origin() {
    // Mouse offsets are already surface-relative; the rect origin only
    // matters for touch.
    let g = geometry(400.0, 400.0, 1.0);
    let rect = DisplayRect::new(50.0, 90.0, 400.0, 400.0);
    let p = to_logical_point(&PointerSample::Mouse { x: 10.0, y: 20.0 }, rect, &g).unwrap();
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}

#[test]
fn mouse_scaled_when_display_shrunk() {
    let g = geometry(800.0, 200.0, 1.0);
    let rect = DisplayRect::new(0.0, 0.0, 400.0, 200.0);
    let p = to_logical_point(&PointerSample::Mouse { x: 100.0, y: 50.0 }, rect, &g).unwrap();
    assert!(point_approx_eq(p, Point::new(200.0, 50.0)));
}

#[test]
fn mouse_high_dpr_lands_in_css_units() {
    let g = geometry(400.0, 400.0, 2.0);
    let p = to_logical_point(
        &PointerSample::Mouse { x: 100.0, y: 50.0 },
        full_rect(&g),
        &g,
    )
    .unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 50.0)));
}

// --- Touch samples ---

#[test]
fn touch_offset_by_rect_origin() {
    let g = geometry(400.0, 400.0, 1.0);
    let rect = DisplayRect::new(50.0, 90.0, 400.0, 400.0);
    let sample = PointerSample::Touch {
        contacts: vec![TouchContact::new(150.0, 190.0)],
    };
    let p = to_logical_point(&sample, rect, &g).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 100.0)));
}

#[test]
fn touch_uses_first_contact() {
    let g = geometry(400.0, 400.0, 1.0);
    let sample = PointerSample::Touch {
        contacts: vec![TouchContact::new(10.0, 20.0), TouchContact::new(300.0, 300.0)],
    };
    let p = to_logical_point(&sample, full_rect(&g), &g).unwrap();
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}

#[test]
fn touch_with_no_contacts_is_no_active_contact() {
    let g = geometry(400.0, 400.0, 1.0);
    let sample = PointerSample::Touch { contacts: vec![] };
    assert_eq!(
        to_logical_point(&sample, full_rect(&g), &g),
        Err(InputError::NoActiveContact)
    );
}

#[test]
fn touch_scaled_and_dpr_corrected() {
    let g = geometry(800.0, 200.0, 2.0);
    let rect = DisplayRect::new(100.0, 0.0, 400.0, 100.0);
    let sample = PointerSample::Touch {
        contacts: vec![TouchContact::new(200.0, 50.0)],
    };
    let p = to_logical_point(&sample, rect, &g).unwrap();
    assert!(point_approx_eq(p, Point::new(200.0, 100.0)));
}

// --- Degenerate rects ---

#[test]
fn zero_width_rect_is_not_measured() {
    let g = geometry(400.0, 400.0, 1.0);
    let rect = DisplayRect::new(0.0, 0.0, 0.0, 400.0);
    assert_eq!(
        to_logical_point(&PointerSample::Mouse { x: 1.0, y: 1.0 }, rect, &g),
        Err(InputError::DisplayNotMeasured)
    );
}

#[test]
fn nan_rect_is_not_measured() {
    let g = geometry(400.0, 400.0, 1.0);
    let rect = DisplayRect::new(0.0, 0.0, f64::NAN, 400.0);
    assert_eq!(
        to_logical_point(&PointerSample::Mouse { x: 1.0, y: 1.0 }, rect, &g),
        Err(InputError::DisplayNotMeasured)
    );
}

// --- Clamping ---

#[test]
fn result_clamped_into_logical_bounds() {
    let g = geometry(400.0, 400.0, 1.0);
    let p = to_logical_point(
        &PointerSample::Mouse { x: -30.0, y: 900.0 },
        full_rect(&g),
        &g,
    )
    .unwrap();
    assert_eq!(p, Point::new(0.0, 400.0));
}
