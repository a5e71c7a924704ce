//! Particle state, visual point jitter and their seeded initial fields.

use crate::constants::SEED_FIELD_EXTENT;
use glam::{Vec2, Vec3, Vec4};
use rand::Rng;
use std::f32::consts::TAU;

/// One simulated trajectory, laid out as a WGSL `vec4<f32>`.
///
/// `phase` is the periodic forcing term for phase-driven modes and the age
/// counter in the gravity well.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleState {
    pub position: Vec3,
    pub phase: f32,
}

impl ParticleState {
    pub const fn new(position: Vec3, phase: f32) -> Self {
        Self { position, phase }
    }

    pub fn to_vec4(self) -> Vec4 {
        self.position.extend(self.phase)
    }
}

/// Texel-centre UV of state `index` in a `width × width` grid.
#[inline]
pub fn texel_uv(index: usize, width: u32) -> Vec2 {
    let w = width.max(1) as usize;
    let col = (index % w) as f32;
    let row = (index / w) as f32;
    Vec2::new((col + 0.5) / w as f32, (row + 0.5) / w as f32)
}

/// Independent pseudo-random states in `[-50, 50)^3` with phase in `[0, 1)`.
pub fn seed_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ParticleState> {
    let half = SEED_FIELD_EXTENT * 0.5;
    (0..count)
        .map(|_| {
            let p = Vec3::new(
                rng.gen::<f32>() * SEED_FIELD_EXTENT - half,
                rng.gen::<f32>() * SEED_FIELD_EXTENT - half,
                rng.gen::<f32>() * SEED_FIELD_EXTENT - half,
            );
            ParticleState::new(p, rng.gen::<f32>())
        })
        .collect()
}

/// Fixed bokeh jitter for one rendered point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualPoint {
    /// Unit-disk offset applied in view space, scaled by the blur radius.
    pub scatter: Vec2,
    /// Depth-of-field seed in `[0, 1)`; also drives twinkle and palette.
    pub seed: f32,
}

impl VisualPoint {
    /// Packs into one `u32`: x and y as snorm8 in the low half, seed as unorm16 in the high half.
    pub fn pack(self) -> u32 {
        let snorm = |v: f32| ((v.clamp(-1.0, 1.0) * 127.0).round() as i8) as u8 as u32;
        let seed = (self.seed.clamp(0.0, 1.0) * 65535.0).round() as u32;
        snorm(self.scatter.x) | (snorm(self.scatter.y) << 8) | (seed << 16)
    }

    /// Inverse of [`VisualPoint::pack`], mirroring `unpack4x8snorm` in WGSL.
    pub fn unpack(bits: u32) -> Self {
        let snorm = |b: u32| ((b & 0xff) as u8 as i8 as f32 / 127.0).max(-1.0);
        Self {
            scatter: Vec2::new(snorm(bits), snorm(bits >> 8)),
            seed: (bits >> 16) as f32 / 65535.0,
        }
    }
}

/// Uniform unit-disk scatter (`radius = sqrt(u)`) with a uniform seed.
pub fn generate_scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<VisualPoint> {
    (0..count)
        .map(|_| {
            let angle = rng.gen::<f32>() * TAU;
            let radius = rng.gen::<f32>().sqrt();
            VisualPoint {
                scatter: Vec2::new(angle.cos(), angle.sin()) * radius,
                seed: rng.gen::<f32>(),
            }
        })
        .collect()
}

pub fn pack_scatter(points: &[VisualPoint]) -> Vec<u32> {
    points.iter().map(|p| p.pack()).collect()
}
