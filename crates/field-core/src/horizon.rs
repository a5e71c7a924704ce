//! Opaque black sphere shown at the centre of the gravity well, lit only by a
//! rim glow. Geometry is built once on the host; `shaders/horizon.wgsl`
//! evaluates [`rim_glow`] per fragment.

use crate::constants::{HORIZON_GLOW, HORIZON_RIM_POWER};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Indexed UV sphere centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// `segments` rings by `segments` slices. Triangles wind counter-clockwise
    /// seen from outside; the zero-area ones at the poles are left out.
    pub fn new(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let stride = segments + 1;
        let mut positions = Vec::with_capacity((stride * stride) as usize);
        for iy in 0..=segments {
            let theta = iy as f32 / segments as f32 * PI;
            for ix in 0..=segments {
                let phi = ix as f32 / segments as f32 * TAU;
                positions.push([
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ]);
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * stride + ix;
                let b = a + stride;
                let c = b + 1;
                let d = a + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        Self { positions, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Fresnel rim: black where the surface faces the viewer, glowing toward
/// the silhouette. Both vectors must be unit length.
pub fn rim_glow(view_dir: Vec3, normal: Vec3) -> Vec3 {
    let rim = (1.0 - view_dir.dot(normal)).clamp(0.0, 1.0).powf(HORIZON_RIM_POWER);
    Vec3::from(HORIZON_GLOW) * rim
}
