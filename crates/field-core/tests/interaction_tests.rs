// Host-side tests for the orientation dormancy state machine.

use field_core::constants::ORIENTATION_DEBOUNCE_MS;
use field_core::{InteractionController, OrientationPermission, OrientationState, Targets, Tilt};

const FRAME_MS: f64 = 16.0;

fn granted() -> InteractionController {
    let mut c = InteractionController::new(Targets::default());
    assert!(c.begin_permission_request());
    assert_eq!(c.permission(), OrientationPermission::Pending);
    c.set_permission(true);
    c
}

/// Feed readings until the controller turns active; returns the time reached.
fn activate(c: &mut InteractionController) -> f64 {
    let mut t = 0.0;
    c.orientation(Tilt::new(0.0, 0.0, 0.0), t);
    while !c.orientation_state().is_active() {
        t += FRAME_MS;
        c.orientation(Tilt::new(0.0, 60.0, 0.0), t);
        assert!(t < 1000.0, "never activated");
    }
    t
}

fn stable_since(c: &InteractionController) -> Option<f64> {
    match c.orientation_state() {
        OrientationState::Active { stable_since, .. } => *stable_since,
        OrientationState::Dormant { .. } => None,
    }
}

#[test]
fn large_tilt_activates_and_drives_targets() {
    let mut c = granted();
    let t = activate(&mut c);
    assert!(c.is_interacting(t));
    assert_ne!(c.targets().aperture, Targets::default().aperture);
}

#[test]
fn dormancy_needs_full_debounce_of_stability() {
    let mut c = granted();
    let mut t = activate(&mut c);
    let mut stable_start = None;
    while c.orientation_state().is_active() {
        t += FRAME_MS;
        c.orientation(Tilt::new(0.0, 60.0, 0.0), t);
        if stable_start.is_none() {
            stable_start = stable_since(&c);
        }
        assert!(t < 10_000.0, "never settled");
    }
    let start = stable_start.expect("stability timer never started");
    assert!(t - start >= ORIENTATION_DEBOUNCE_MS);
    match c.orientation_state() {
        OrientationState::Dormant { baseline: Some(b) } => assert!((b.beta - 60.0).abs() < 1.0),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn small_jitter_does_not_restart_the_timer() {
    let mut c = granted();
    let mut t = activate(&mut c);
    let t0 = loop {
        t += FRAME_MS;
        c.orientation(Tilt::new(0.0, 60.0, 0.0), t);
        if let Some(since) = stable_since(&c) {
            break since;
        }
    };
    t += FRAME_MS;
    c.orientation(Tilt::new(0.0, 61.0, 0.5), t);
    assert_eq!(stable_since(&c), Some(t0));
}

#[test]
fn instability_clears_the_timer() {
    let mut c = granted();
    let mut t = activate(&mut c);
    while stable_since(&c).is_none() {
        t += FRAME_MS;
        c.orientation(Tilt::new(0.0, 60.0, 0.0), t);
    }
    for _ in 0..4 {
        t += FRAME_MS;
        c.orientation(Tilt::new(0.0, 0.0, 40.0), t);
    }
    assert!(c.orientation_state().is_active());
    assert_eq!(stable_since(&c), None);
}

#[test]
fn denied_permission_never_activates() {
    let mut c = InteractionController::new(Targets::default());
    c.begin_permission_request();
    c.set_permission(false);
    for i in 0..200 {
        let swing = if i % 2 == 0 { 80.0 } else { -80.0 };
        c.orientation(Tilt::new(i as f32, swing, -swing), i as f64 * FRAME_MS);
    }
    assert_eq!(*c.orientation_state(), OrientationState::default());
    assert_eq!(*c.targets(), Targets::default());
    assert!(!c.is_interacting(0.0));
}

#[test]
fn permission_is_requested_once() {
    let mut c = InteractionController::default();
    assert!(c.begin_permission_request());
    assert!(!c.begin_permission_request());
}
