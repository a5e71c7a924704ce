// Host-side tests for adaptive quality and the per-frame control loop.

use field_core::constants::{QUALITY_MAX_STEP, QUALITY_WARMUP_MS};
use field_core::{
    AttractorMode, BlendMode, DeviceProfile, FieldConfig, QualityGovernor, SimulationContext,
    Status, Theme,
};

/// Drive the governor at a steady frame interval; returns the level after every frame.
fn run_at(q: &mut QualityGovernor, from_ms: f64, to_ms: f64, frame_ms: f64) -> Vec<f32> {
    let mut levels = Vec::new();
    let mut t = from_ms;
    while t < to_ms {
        q.frame(t);
        levels.push(q.level());
        t += frame_ms;
    }
    levels
}

#[test]
fn slow_frames_only_ever_lower_the_level() {
    let mut q = QualityGovernor::new(0.25, 60.0);
    let levels = run_at(&mut q, 0.0, 12_000.0, 1000.0 / 30.0);
    for pair in levels.windows(2) {
        assert!(pair[1] <= pair[0], "level rose under load: {pair:?}");
        assert!(pair[0] - pair[1] <= QUALITY_MAX_STEP + 1e-6);
    }
    assert!(q.level() < 1.0);
    assert!(q.level() >= 0.25);
}

#[test]
fn level_never_leaves_floor_and_ceiling() {
    let mut q = QualityGovernor::new(0.5, 60.0);
    run_at(&mut q, 0.0, 30_000.0, 1000.0 / 5.0);
    assert_eq!(q.level(), 0.5);
    run_at(&mut q, 30_000.0, 200_000.0, 1000.0 / 240.0);
    assert!(q.level() <= 1.0);
    assert!(q.level() > 0.5);
}

#[test]
fn nothing_changes_during_warmup() {
    let mut q = QualityGovernor::default();
    let levels = run_at(&mut q, 0.0, QUALITY_WARMUP_MS - 1.0, 100.0);
    assert!(levels.iter().all(|&l| l == 1.0));
}

#[test]
fn idle_context_stops_completely() {
    let mut ctx = SimulationContext::new(FieldConfig::default().with_grid_width(4)).unwrap();
    let mut t = 0.0;
    for _ in 0..20 {
        ctx.pointer(0.5, 0.5, t);
        ctx.frame(t);
        t += 16.0;
    }
    assert!(ctx.params().speed > 0.0);
    let mut frames = 0;
    while ctx.params().speed != 0.0 {
        t += 16.0;
        ctx.frame(t);
        frames += 1;
        assert!(frames < 300, "speed never reached zero");
    }
    assert_eq!(ctx.frame(t + 16.0).telemetry.status, Status::Dormant);
}

#[test]
fn theme_round_trip_restores_renderer_state() {
    let mut ctx = SimulationContext::new(FieldConfig::default().with_grid_width(4)).unwrap();
    let before = ctx.frame(0.0);
    ctx.set_theme(ctx.theme().toggle());
    let flipped = ctx.frame(16.0);
    assert_eq!(flipped.blend, BlendMode::Alpha);
    ctx.set_theme(ctx.theme().toggle());
    let after = ctx.frame(32.0);
    assert_eq!(ctx.theme(), Theme::Dark);
    assert_eq!(after.blend, before.blend);
    assert_eq!(after.view.light, before.view.light);
    assert_eq!(after.view.palette, before.view.palette);
    assert_eq!(after.clear_color, before.clear_color);
}

#[test]
fn constrained_devices_keep_a_higher_floor() {
    let config = FieldConfig::for_device(DeviceProfile::Constrained).with_grid_width(4);
    let ctx = SimulationContext::new(config).unwrap();
    assert_eq!(ctx.quality().floor(), 0.5);
    assert_eq!(ctx.mode(), AttractorMode::Thomas);
}
