//! Uniform blocks shared with the WGSL sources. Field order and padding must
//! match the `struct` declarations in `shaders/*.wgsl`.

use crate::constants::{HORIZON_GLOW, HORIZON_RIM_POWER};
use crate::mode::{Bound, ModeProfile};
use crate::params::SimulationParameters;
use crate::projector::ViewParams;
use crate::shading::Theme;
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SimUniforms {
    pub mode: u32,
    pub substeps: u32,
    pub width: u32,
    pub count: u32,
    pub dt: f32,
    pub speed: f32,
    pub time: f32,
    /// Reset radius; negative when the mode resets itself.
    pub bound: f32,
    pub coeffs: [f32; 4],
    pub damping: f32,
    pub respawn_scale: f32,
    pub _pad: [f32; 2],
}

impl SimUniforms {
    pub fn new(profile: &ModeProfile, params: &SimulationParameters, width: u32) -> Self {
        Self {
            mode: profile.mode.id(),
            substeps: profile.substeps,
            width,
            count: width * width,
            dt: params.dt,
            speed: params.speed,
            time: params.time,
            bound: match profile.bound {
                Bound::Radius(r) => r,
                Bound::Internal => -1.0,
            },
            coeffs: profile.coeffs,
            damping: profile.damping,
            respawn_scale: profile.respawn_scale,
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub sphere_radius: f32,
    pub mode_scale: f32,
    pub focus: f32,
    pub aperture: f32,
    pub size_scale: f32,
    pub time: f32,
    pub hue_shift: f32,
    pub fog_density: f32,
    pub physical: u32,
    pub palette: u32,
    pub light: u32,
    pub alpha_boost: f32,
    pub grid_width: u32,
    pub _pad: u32,
}

/// Frame-level inputs for [`ViewUniforms::new`] beyond the projector's own.
#[derive(Clone, Copy, Debug)]
pub struct ShadeFrame {
    pub profile: &'static ModeProfile,
    pub theme: Theme,
    pub time: f32,
    pub hue_shift: f32,
    pub fog_density: f32,
    pub grid_width: u32,
}

impl ViewUniforms {
    pub fn new(view: &ViewParams, frame: &ShadeFrame) -> Self {
        Self {
            model_view: view.model_view.to_cols_array_2d(),
            projection: view.projection.to_cols_array_2d(),
            viewport: view.viewport.to_array(),
            sphere_radius: view.sphere_radius,
            mode_scale: view.mode_scale,
            focus: view.focus,
            aperture: view.aperture,
            size_scale: view.size_scale,
            time: frame.time,
            hue_shift: frame.hue_shift,
            fog_density: frame.fog_density,
            physical: view.physical as u32,
            palette: frame.profile.palette.id(),
            light: frame.theme.is_light() as u32,
            alpha_boost: frame.theme.alpha_boost(),
            grid_width: frame.grid_width,
            _pad: 0,
        }
    }
}

/// The horizon sphere sits at the world origin, outside the system rotation.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HorizonUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// Glow colour in `rgb`, rim exponent in `w`.
    pub glow: [f32; 4],
}

impl HorizonUniforms {
    pub fn new(view_proj: Mat4, eye: Vec3) -> Self {
        let [r, g, b] = HORIZON_GLOW;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            glow: [r, g, b, HORIZON_RIM_POWER],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<SimUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ViewUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<SimUniforms>(), 64);
        assert_eq!(std::mem::size_of::<ViewUniforms>(), 192);
        assert_eq!(std::mem::size_of::<HorizonUniforms>(), 96);
    }
}
