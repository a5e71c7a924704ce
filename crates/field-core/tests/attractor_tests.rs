// Host-side tests for the integrators and the CPU stepper.

use field_core::attractor::{step, StepInput};
use field_core::constants::{INTEGRATION_DT, PHASE_RATE};
use field_core::{AttractorMode, ParticleState, SimulationStepper, StepParams};
use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn every_state_respects_its_bound_after_each_tick() {
    for mode in AttractorMode::ALL {
        let limit = match mode.profile().bound_radius() {
            Some(r) => r,
            None => continue,
        };
        let mut rng = StdRng::seed_from_u64(mode.id() as u64 + 1);
        let mut stepper = SimulationStepper::new(24, &mut rng).unwrap();
        for tick in 0..60 {
            stepper.step(&StepParams {
                mode,
                dt: INTEGRATION_DT,
                speed: 4.0,
                time: tick as f32 * 0.016,
            });
            for s in stepper.current() {
                assert!(
                    s.position.length() <= limit + 1e-4,
                    "{mode:?} tick {tick}: |p| = {}",
                    s.position.length()
                );
            }
        }
    }
}

#[test]
fn gravity_well_stays_between_horizon_and_spawn_ring() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut stepper = SimulationStepper::new(16, &mut rng).unwrap();
    for tick in 0..200 {
        stepper.step(&StepParams {
            mode: AttractorMode::Singularity,
            dt: INTEGRATION_DT,
            speed: 1.5,
            time: tick as f32 * 0.016,
        });
    }
    for s in stepper.current() {
        assert!(s.position.is_finite());
        assert!(s.position.truncate().length() <= 181.0);
        assert!(s.phase <= 4.5 + 1e-3);
    }
}

#[test]
fn step_is_a_pure_function() {
    let state = ParticleState::new(Vec3::new(0.3, -1.2, 2.5), 0.42);
    let input = StepInput {
        dt: INTEGRATION_DT,
        speed: 0.8,
        time: 12.5,
        uv: Vec2::new(0.25, 0.75),
    };
    for mode in AttractorMode::ALL {
        let a = step(state, mode, &input);
        let b = step(state, mode, &input);
        assert_eq!(a, b, "{mode:?} is not deterministic");
    }
}

#[test]
fn seeded_steppers_agree() {
    let params = StepParams {
        mode: AttractorMode::FractalDream,
        dt: INTEGRATION_DT,
        speed: 1.0,
        time: 3.0,
    };
    let mut a = SimulationStepper::new(10, &mut StdRng::seed_from_u64(7)).unwrap();
    let mut b = SimulationStepper::new(10, &mut StdRng::seed_from_u64(7)).unwrap();
    for _ in 0..5 {
        a.step(&params);
        b.step(&params);
    }
    assert_eq!(a.current(), b.current());
}

#[test]
fn thomas_origin_drifts_only_by_phase() {
    // The field itself vanishes at the origin with phase 0.
    let profile = AttractorMode::Thomas.profile();
    let delta = field_core::attractor::field_delta(profile, Vec3::ZERO, 0.0);
    assert_eq!(delta, Vec3::ZERO);

    // Phase advances before each sub-step, so at speed 1 the point moves off
    // the origin by at most substeps * sin(final phase) * dt, on the diagonal.
    let input = StepInput {
        dt: INTEGRATION_DT,
        speed: 1.0,
        time: 0.0,
        uv: Vec2::splat(0.5),
    };
    let s = step(ParticleState::new(Vec3::ZERO, 0.0), AttractorMode::Thomas, &input);
    let final_phase = PHASE_RATE * profile.substeps as f32;
    assert!((s.phase - final_phase).abs() < 1e-6);
    let bound = profile.substeps as f32 * final_phase.sin() * INTEGRATION_DT;
    let p = s.position;
    assert!(p.x > 0.0 && p.x <= bound, "{p:?} outside (0, {bound}]");
    assert!((p.x - p.y).abs() < 1e-9 && (p.y - p.z).abs() < 1e-9);

    // At rest nothing moves at all.
    let frozen = step(
        ParticleState::new(Vec3::ZERO, 0.0),
        AttractorMode::Thomas,
        &StepInput { speed: 0.0, ..input },
    );
    assert_eq!(frozen.position, Vec3::ZERO);
}

#[test]
fn gravity_well_horizon_crossing_respawns_on_annulus() {
    for i in 0..64 {
        let uv = Vec2::new((i % 8) as f32 / 8.0 + 0.06, (i / 8) as f32 / 8.0 + 0.06);
        let s = ParticleState::new(Vec3::new(6.0, 8.0, 0.0), 1.0);
        let input = StepInput {
            dt: INTEGRATION_DT,
            speed: 1.0,
            time: i as f32 * 0.37,
            uv,
        };
        let next = step(s, AttractorMode::Singularity, &input);
        let r = next.position.truncate().length();
        assert!((119.99..=180.01).contains(&r), "respawn radius {r}");
        assert_eq!(next.phase, 0.0);
    }
}
