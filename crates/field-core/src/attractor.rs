//! Per-particle integrators. Everything here is a pure function of its inputs
//! and is mirrored line for line by `shaders/simulate.wgsl`.

use crate::constants::{
    AGE_RATE, HORIZON_RADIUS, LIFETIME_MIN, LIFETIME_SPAN, PHASE_RATE, SPAWN_RADIUS_MIN,
    SPAWN_RADIUS_SPAN, SPAWN_Z_SPREAD,
};
use crate::hash::{hash12, hash_offset};
use crate::mode::{AttractorMode, ModeProfile};
use crate::particle::ParticleState;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Per-tick inputs shared by every texel, plus the texel's own UV.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepInput {
    pub dt: f32,
    pub speed: f32,
    /// Elapsed seconds; decorrelates respawn positions between ticks.
    pub time: f32,
    pub uv: Vec2,
}

/// Advance one particle by one tick under `mode`, applying its reset policy.
pub fn step(state: ParticleState, mode: AttractorMode, input: &StepInput) -> ParticleState {
    let profile = mode.profile();
    if mode.is_gravity_well() {
        return gravity_well(state, input);
    }

    let mut p = state.position;
    let mut phase = state.phase;
    for _ in 0..profile.substeps {
        phase += PHASE_RATE * input.speed;
        p += field_delta(profile, p, phase) * (input.dt * input.speed);
    }

    match profile.bound_radius() {
        // Negated test so NaN and infinities also respawn.
        Some(limit) if !(p.length() <= limit) => ParticleState::new(respawn_cube(profile, input), 0.0),
        _ => ParticleState::new(p, phase),
    }
}

/// Velocity (flows) or damped displacement (iterated maps) at `p`.
pub fn field_delta(profile: &ModeProfile, p: Vec3, phase: f32) -> Vec3 {
    let [a, b, c, d] = profile.coeffs;
    let Vec3 { x, y, z } = p;
    match profile.mode {
        AttractorMode::Thomas => Vec3::new(
            (y * a + phase).sin() - b * x,
            (z * a + phase).sin() - b * y,
            (x * a + phase).sin() - b * z,
        ),
        AttractorMode::Bedhead => {
            let n = Vec3::new(
                (x * y / b).sin() * y + (a * x - y + phase).cos(),
                x + (y + phase).sin() / b,
                (x * 0.5 + phase).sin(),
            );
            (n - p) * profile.damping
        }
        AttractorMode::Popcorn => {
            let h = a;
            let k = b;
            let n = Vec3::new(
                x - h * (y + (k * y).tan() + phase).sin(),
                y - h * (x + (k * x).tan() + phase).sin(),
                (x * 0.5 + phase).sin(),
            );
            (n - p) * profile.damping
        }
        AttractorMode::FractalDream => {
            let n = Vec3::new(
                (y * b + phase).sin() + c * (x * b).sin(),
                (x * a + phase).sin() + d * (y * a).sin(),
                (x * y * 0.1 + phase).cos(),
            );
            (n - p) * profile.damping
        }
        AttractorMode::Singularity => Vec3::ZERO,
    }
}

fn respawn_cube(profile: &ModeProfile, input: &StepInput) -> Vec3 {
    let s = profile.respawn_scale;
    let base = input.time;
    Vec3::new(
        (hash_offset(input.uv, base) - 0.5) * s,
        (hash_offset(input.uv, base + 1.0) - 0.5) * s,
        (hash_offset(input.uv, base + 2.0) - 0.5) * s,
    )
}

/// Per-texel lifetime in `[0.5, 4.5)`, fixed for the life of the grid.
pub fn max_lifetime(uv: Vec2) -> f32 {
    LIFETIME_MIN + hash12(uv) * LIFETIME_SPAN
}

fn gravity_well(state: ParticleState, input: &StepInput) -> ParticleState {
    let age = state.phase + AGE_RATE * input.dt * input.speed;
    let Vec3 { x, y, z } = state.position;
    let dist = Vec2::new(x, y).length();

    if !(dist >= HORIZON_RADIUS) || age > max_lifetime(input.uv) {
        return ParticleState::new(respawn_annulus(input), 0.0);
    }

    let spin = 2.0 + 50.0 / dist;
    let pull = 200.0 / (dist + 0.1);
    let delta = Vec3::new(
        -y * spin * 0.01 - x * pull * 0.005,
        x * spin * 0.01 - y * pull * 0.005,
        -z * 0.1,
    );
    let p = state.position + delta * input.speed;
    if p.is_finite() {
        ParticleState::new(p, age)
    } else {
        ParticleState::new(respawn_annulus(input), 0.0)
    }
}

fn respawn_annulus(input: &StepInput) -> Vec3 {
    let t = input.time;
    let angle = hash_offset(input.uv, t) * TAU;
    let radius = SPAWN_RADIUS_MIN + hash_offset(input.uv, t + 1.0) * SPAWN_RADIUS_SPAN;
    let z = (hash_offset(input.uv, t + 2.0) - 0.5) * SPAWN_Z_SPREAD;
    Vec3::new(angle.cos() * radius, angle.sin() * radius, z)
}
