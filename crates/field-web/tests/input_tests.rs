// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn viewport_uv_normalizes_and_clamps() {
    assert_eq!(viewport_uv(0.0, 0.0, 800.0, 600.0), [0.0, 0.0]);
    assert_eq!(viewport_uv(400.0, 300.0, 800.0, 600.0), [0.5, 0.5]);
    // Pointer captured outside the window still maps inside [0, 1].
    assert_eq!(viewport_uv(-20.0, 900.0, 800.0, 600.0), [0.0, 1.0]);
}

#[test]
fn viewport_uv_centers_on_degenerate_size() {
    assert_eq!(viewport_uv(10.0, 10.0, 0.0, 600.0), [0.5, 0.5]);
}

#[test]
fn backing_size_scales_by_dpr_and_never_zero() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 3.0), (1, 1));
}

#[test]
fn orientation_requires_all_three_angles() {
    assert_eq!(
        orientation_reading(Some(10.0), Some(-5.0), Some(45.0)),
        Some([10.0, -5.0, 45.0])
    );
    assert_eq!(orientation_reading(None, Some(1.0), Some(1.0)), None);
    assert_eq!(orientation_reading(Some(1.0), Some(f64::NAN), Some(1.0)), None);
}
