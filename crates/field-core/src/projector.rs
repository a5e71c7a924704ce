//! Sphere projection and per-point depth of field, mirrored by the vertex
//! stage of `shaders/points.wgsl`.

use crate::constants::{
    BASE_POINT_SIZE, BLUR_POINT_SIZE, DOF_RAMP, FOCUS_FUZZ, INTENSITY_PUSH, INTENSITY_SCALE,
    SEED_POINT_SIZE, SIZE_ATTENUATION,
};
use crate::particle::{ParticleState, VisualPoint};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Hermite ramp, identical to WGSL `smoothstep`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    /// Scene rotation followed by the camera view matrix.
    pub model_view: Mat4,
    pub projection: Mat4,
    /// Render target size in physical pixels.
    pub viewport: Vec2,
    pub sphere_radius: f32,
    pub mode_scale: f32,
    /// Use simulated positions directly instead of wrapping onto the sphere.
    pub physical: bool,
    pub focus: f32,
    pub aperture: f32,
    pub size_scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub clip: Vec4,
    /// Diameter in pixels; never negative.
    pub size: f32,
    /// Defocus factor in `[0, 1]`.
    pub blur: f32,
    pub intensity: f32,
    /// Scaled simulation-space position, before the sphere wrap.
    pub visual: Vec3,
    /// Camera-space distance along the view axis.
    pub depth: f32,
}

pub fn display_position(visual: Vec3, view: &ViewParams) -> Vec3 {
    if view.physical {
        visual
    } else {
        let intensity = visual.length() * INTENSITY_SCALE;
        (visual + Vec3::splat(0.001)).normalize_or_zero() * (view.sphere_radius + intensity * INTENSITY_PUSH)
    }
}

pub fn project(state: &ParticleState, point: &VisualPoint, view: &ViewParams) -> ProjectedPoint {
    let visual = state.position * view.mode_scale;
    let intensity = visual.length() * INTENSITY_SCALE;
    let display = display_position(visual, view);

    let mut mv = view.model_view * display.extend(1.0);
    let depth = -mv.z;

    let fuzz = (point.seed - 0.5) * FOCUS_FUZZ;
    let blur = smoothstep(0.0, DOF_RAMP, (depth - (view.focus + fuzz)).abs());
    let blur_radius = blur * view.aperture;
    mv.x += point.scatter.x * blur_radius;
    mv.y += point.scatter.y * blur_radius;

    let base = BASE_POINT_SIZE + point.seed * SEED_POINT_SIZE;
    let size = if depth > 0.0 {
        ((base + blur_radius * BLUR_POINT_SIZE) * (SIZE_ATTENUATION / depth) * view.size_scale).max(0.0)
    } else {
        0.0
    };

    ProjectedPoint {
        clip: view.projection * mv,
        size,
        blur,
        intensity,
        visual,
        depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewParams {
        ViewParams {
            model_view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 0.1), Vec3::new(0.0, 0.0, 10.0), Vec3::Y),
            projection: Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 2000.0),
            viewport: Vec2::new(800.0, 800.0),
            sphere_radius: 300.0,
            mode_scale: 15.0,
            physical: false,
            focus: 300.0,
            aperture: 5.0,
            size_scale: 1.0,
        }
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 500.0, -3.0), 0.0);
        assert_eq!(smoothstep(0.0, 500.0, 900.0), 1.0);
        assert!((smoothstep(0.0, 10.0, 5.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn abstract_modes_hug_the_sphere() {
        let v = view();
        let s = ParticleState::new(Vec3::new(0.0, 0.0, 2.0), 0.0);
        let display = display_position(s.position * v.mode_scale, &v);
        let expected = 300.0 + 30.0 * INTENSITY_SCALE * INTENSITY_PUSH;
        assert!((display.length() - expected).abs() < 1e-2);
    }

    #[test]
    fn in_focus_point_has_no_blur() {
        let v = view();
        let s = ParticleState::new(Vec3::new(0.0, 0.0, 1.0), 0.0);
        let p = project(&s, &VisualPoint { scatter: Vec2::X, seed: 0.5 }, &v);
        // display z is ~309, camera sits at z=0.1 looking down +z
        assert!(p.depth > 300.0);
        assert!(p.blur < 0.01);
        assert!(p.size > 0.0);
    }

    #[test]
    fn points_behind_camera_have_zero_size() {
        let v = view();
        let s = ParticleState::new(Vec3::new(0.0, 0.0, -1.0), 0.0);
        let p = project(&s, &VisualPoint { scatter: Vec2::ZERO, seed: 0.9 }, &v);
        assert!(p.depth < 0.0);
        assert_eq!(p.size, 0.0);
    }
}
