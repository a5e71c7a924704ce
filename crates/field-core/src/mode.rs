//! Attractor modes and their fixed parameter table.
//!
//! Every per-mode constant (visual scale, bounding radius, respawn cube,
//! palette, speed envelope) lives in [`ModeProfile`] so that the integrator,
//! projector and shaders read the same numbers instead of branching on the
//! mode in several places.

use crate::constants::{CAMERA_ZNEAR, FOG_DENSITY};
use crate::error::FieldError;
use crate::shading::Palette;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AttractorMode {
    #[default]
    Thomas,
    Bedhead,
    Popcorn,
    FractalDream,
    Singularity,
}

impl AttractorMode {
    pub const ALL: [AttractorMode; 5] = [
        AttractorMode::Thomas,
        AttractorMode::Bedhead,
        AttractorMode::Popcorn,
        AttractorMode::FractalDream,
        AttractorMode::Singularity,
    ];

    pub fn from_id(id: u32) -> Result<Self, FieldError> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(FieldError::UnknownMode(id))
    }

    /// Stable numeric id shared with the WGSL `mode` uniform.
    pub fn id(self) -> u32 {
        match self {
            AttractorMode::Thomas => 0,
            AttractorMode::Bedhead => 1,
            AttractorMode::Popcorn => 2,
            AttractorMode::FractalDream => 3,
            AttractorMode::Singularity => 4,
        }
    }

    pub fn profile(self) -> &'static ModeProfile {
        &MODE_TABLE[self.id() as usize]
    }

    pub fn is_gravity_well(self) -> bool {
        matches!(self, AttractorMode::Singularity)
    }
}

/// How a mode's respawn policy is bounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    /// Reset when `|p|` leaves the sphere of this radius.
    Radius(f32),
    /// The integrator applies its own terminal conditions.
    Internal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeProfile {
    pub mode: AttractorMode,
    pub label: &'static str,
    pub track: &'static str,
    /// Coefficients `a, b, c, d` of the map (unused ones are zero).
    pub coeffs: [f32; 4],
    /// Multiplier applied to `(new - old)` for iterated maps.
    pub damping: f32,
    pub substeps: u32,
    pub bound: Bound,
    pub respawn_scale: f32,
    pub visual_scale: f32,
    /// Rendered positions are used as-is instead of being wrapped onto the sphere.
    pub physical: bool,
    pub palette: Palette,
    pub base_speed: f32,
    pub max_speed: f32,
}

impl ModeProfile {
    /// Bounding radius used by the generic reset check, if any.
    pub fn bound_radius(&self) -> Option<f32> {
        match self.bound {
            Bound::Radius(r) => Some(r),
            Bound::Internal => None,
        }
    }
}

pub const MODE_TABLE: [ModeProfile; 5] = [
    ModeProfile {
        mode: AttractorMode::Thomas,
        label: "THOMAS",
        track: "HOME.BASE",
        coeffs: [1.2, 0.19, 0.0, 0.0],
        damping: 1.0,
        substeps: 3,
        bound: Bound::Radius(60.0),
        respawn_scale: 10.0,
        visual_scale: 15.0,
        physical: false,
        palette: Palette::Stellar,
        base_speed: 0.0,
        max_speed: 1.0,
    },
    ModeProfile {
        mode: AttractorMode::Bedhead,
        label: "BEDHEAD",
        track: "SELECTED.WORKS",
        coeffs: [0.06, 0.98, 0.0, 0.0],
        damping: 0.5,
        substeps: 1,
        bound: Bound::Radius(10.0),
        respawn_scale: 0.1,
        visual_scale: 60.0,
        physical: false,
        palette: Palette::Stellar,
        base_speed: 0.0,
        max_speed: 1.0,
    },
    ModeProfile {
        mode: AttractorMode::Popcorn,
        label: "POPCORN",
        track: "LIVE.PERFORMANCE",
        coeffs: [0.05, 3.0, 0.0, 0.0],
        damping: 10.0,
        substeps: 1,
        bound: Bound::Radius(15.0),
        respawn_scale: 6.0,
        visual_scale: 25.0,
        physical: false,
        palette: Palette::Stellar,
        base_speed: 0.0,
        max_speed: 1.0,
    },
    ModeProfile {
        mode: AttractorMode::FractalDream,
        label: "FRACTAL-DREAM",
        track: "RESEARCH.LAB",
        coeffs: [-1.4, 1.6, 1.0, 0.7],
        damping: 1.0,
        substeps: 1,
        bound: Bound::Radius(15.0),
        respawn_scale: 0.1,
        visual_scale: 35.0,
        physical: false,
        palette: Palette::Stellar,
        base_speed: 0.0,
        max_speed: 1.0,
    },
    ModeProfile {
        mode: AttractorMode::Singularity,
        label: "EVENT.HORIZON",
        track: "SINGULARITY",
        coeffs: [0.0; 4],
        damping: 1.0,
        substeps: 1,
        bound: Bound::Internal,
        respawn_scale: 0.0,
        visual_scale: 1.0,
        physical: true,
        palette: Palette::Ember,
        base_speed: 1.5,
        max_speed: 4.0,
    },
];

/// Side effects of a mode switch that the host applies to the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeChange {
    pub mode: AttractorMode,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    pub fog_density: f32,
    pub focus_target: Option<f32>,
    pub aperture_target: Option<f32>,
    /// Draw the black-hole sphere at the origin.
    pub show_horizon: bool,
    pub label: &'static str,
    pub track: &'static str,
}

/// External-facing switch driven by the routing/UI layer.
#[derive(Clone, Debug, Default)]
pub struct ModeController {
    current: AttractorMode,
}

impl ModeController {
    pub fn new(mode: AttractorMode) -> Self {
        Self { current: mode }
    }

    pub fn current(&self) -> AttractorMode {
        self.current
    }

    pub fn profile(&self) -> &'static ModeProfile {
        self.current.profile()
    }

    pub fn set_mode(&mut self, mode: AttractorMode) -> ModeChange {
        if mode != self.current {
            log::info!("[mode] {:?} -> {:?}", self.current, mode);
        }
        self.current = mode;
        let profile = mode.profile();
        if mode.is_gravity_well() {
            ModeChange {
                mode,
                camera_eye: Vec3::new(0.0, 20.0, 150.0),
                camera_target: Vec3::ZERO,
                fog_density: 0.0,
                focus_target: Some(20.0),
                aperture_target: Some(1.0),
                show_horizon: true,
                label: profile.label,
                track: profile.track,
            }
        } else {
            ModeChange {
                mode,
                camera_eye: Vec3::new(0.0, 0.0, CAMERA_ZNEAR),
                camera_target: Vec3::new(0.0, 0.0, 10.0),
                fog_density: FOG_DENSITY,
                focus_target: None,
                aperture_target: None,
                show_horizon: false,
                label: profile.label,
                track: profile.track,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_table() {
        for mode in AttractorMode::ALL {
            assert_eq!(AttractorMode::from_id(mode.id()), Ok(mode));
            assert_eq!(mode.profile().mode, mode);
        }
        assert_eq!(AttractorMode::from_id(9), Err(FieldError::UnknownMode(9)));
    }

    #[test]
    fn respawn_cube_fits_inside_bound() {
        for mode in AttractorMode::ALL {
            let p = mode.profile();
            if let Some(r) = p.bound_radius() {
                let half_diag = 3.0_f32.sqrt() * p.respawn_scale * 0.5;
                assert!(half_diag < r, "{mode:?} respawns outside its bound");
            }
        }
    }

    #[test]
    fn gravity_well_moves_camera_and_clears_fog() {
        let mut ctl = ModeController::default();
        let change = ctl.set_mode(AttractorMode::Singularity);
        assert_eq!(change.fog_density, 0.0);
        assert_eq!(change.camera_eye, Vec3::new(0.0, 20.0, 150.0));
        assert_eq!(change.focus_target, Some(20.0));
        assert!(change.show_horizon);
        let back = ctl.set_mode(AttractorMode::Bedhead);
        assert!(back.fog_density > 0.0);
        assert!(!back.show_horizon);
        assert!(back.focus_target.is_none());
        assert_eq!(ctl.current(), AttractorMode::Bedhead);
    }
}
