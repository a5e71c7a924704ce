//! The explicit per-page simulation state owned by the frame loop.

use crate::camera::{Camera, SystemRotation};
use crate::config::FieldConfig;
use crate::constants::SPHERE_RADIUS;
use crate::error::FieldError;
use crate::interaction::{InteractionController, OrientationPermission, Tilt};
use crate::mode::{AttractorMode, ModeChange, ModeController};
use crate::params::{SimulationParameters, Targets};
use crate::projector::ViewParams;
use crate::quality::QualityGovernor;
use crate::shading::{BlendMode, Theme};
use crate::telemetry::{Status, Telemetry};
use crate::uniforms::{HorizonUniforms, ShadeFrame, SimUniforms, ViewUniforms};
use glam::Vec2;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub sim: SimUniforms,
    pub view: ViewUniforms,
    pub view_params: ViewParams,
    pub visible_points: u32,
    pub blend: BlendMode,
    pub clear_color: [f64; 4],
    pub show_horizon: bool,
    pub horizon: HorizonUniforms,
    pub telemetry: Telemetry,
    /// Set on the frame the quality governor moved the level.
    pub quality_changed: Option<f32>,
}

pub struct SimulationContext {
    config: FieldConfig,
    params: SimulationParameters,
    interaction: InteractionController,
    modes: ModeController,
    quality: QualityGovernor,
    theme: Theme,
    camera: Camera,
    rotation: SystemRotation,
    fog_density: f32,
    show_horizon: bool,
    total_points: u32,
    viewport: (u32, u32),
    start_ms: Option<f64>,
}

impl SimulationContext {
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let total_points = config.point_count()?;
        let quality = QualityGovernor::new(config.device.quality_floor(), config.target_fps);
        let mut ctx = Self {
            params: SimulationParameters::default(),
            interaction: InteractionController::new(Targets::default()),
            modes: ModeController::default(),
            quality,
            theme: Theme::default(),
            camera: Camera::default(),
            rotation: SystemRotation::default(),
            fog_density: 0.0,
            show_horizon: false,
            total_points,
            viewport: (1, 1),
            start_ms: None,
            config,
        };
        ctx.set_mode(AttractorMode::default());
        Ok(ctx)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn mode(&self) -> AttractorMode {
        self.modes.current()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn quality(&self) -> &QualityGovernor {
        &self.quality
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn set_mode(&mut self, mode: AttractorMode) -> ModeChange {
        let change = self.modes.set_mode(mode);
        self.params.mode = mode;
        self.camera.eye = change.camera_eye;
        self.camera.target = change.camera_target;
        self.fog_density = change.fog_density;
        self.show_horizon = change.show_horizon;
        self.interaction.reset_camera_tilt();
        let targets = self.interaction.targets_mut();
        if let Some(focus) = change.focus_target {
            targets.focus = focus;
        }
        if let Some(aperture) = change.aperture_target {
            targets.aperture = aperture;
        }
        change
    }

    pub fn set_mode_id(&mut self, id: u32) -> Result<ModeChange, FieldError> {
        Ok(self.set_mode(AttractorMode::from_id(id)?))
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            log::info!("[theme] {:?}", theme);
        }
        self.theme = theme;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        self.camera.set_viewport(width, height);
    }

    pub fn pointer(&mut self, nx: f32, ny: f32, now_ms: f64) {
        let mode = self.modes.current();
        self.interaction.pointer(nx, ny, mode, now_ms);
    }

    pub fn orientation(&mut self, reading: Tilt, now_ms: f64) {
        self.interaction.orientation(reading, now_ms);
    }

    pub fn begin_permission_request(&mut self) -> bool {
        self.interaction.begin_permission_request()
    }

    pub fn set_orientation_permission(&mut self, granted: bool) {
        self.interaction.set_permission(granted);
    }

    pub fn orientation_permission(&self) -> OrientationPermission {
        self.interaction.permission()
    }

    pub fn view_params(&self) -> ViewParams {
        let profile = self.modes.profile();
        ViewParams {
            model_view: self.camera.view_matrix() * self.rotation.matrix(),
            projection: self.camera.projection_matrix(),
            viewport: Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32),
            sphere_radius: SPHERE_RADIUS,
            mode_scale: profile.visual_scale,
            physical: profile.physical,
            focus: self.params.focus,
            aperture: self.params.aperture,
            size_scale: self.config.device.size_scale(),
        }
    }

    /// Advance every host-side controller by one display frame.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutput {
        let start = *self.start_ms.get_or_insert(now_ms);
        self.params.time = ((now_ms - start) * 0.001) as f32;

        let mode = self.modes.current();
        let profile = mode.profile();
        let interacting = self.interaction.is_interacting(now_ms);
        self.params.ramp_speed(profile, interacting);
        self.params
            .smooth_toward(self.interaction.targets(), self.config.device.smoothing_rate());

        if mode.is_gravity_well() {
            if let Some(tilt) = self.interaction.camera_tilt() {
                self.camera.ease_tilt(tilt);
            }
        }
        self.rotation.advance(self.params.speed, mode.is_gravity_well());

        let quality_changed = self.quality.frame(now_ms);
        let visible_points = self.quality.visible_points(self.total_points);

        let view_params = self.view_params();
        let sim = SimUniforms::new(profile, &self.params, self.config.grid_width);
        let view = ViewUniforms::new(
            &view_params,
            &ShadeFrame {
                profile,
                theme: self.theme,
                time: self.params.time,
                hue_shift: self.params.hue_shift,
                fog_density: self.fog_density,
                grid_width: self.config.grid_width,
            },
        );

        let horizon = HorizonUniforms::new(
            view_params.projection * self.camera.view_matrix(),
            self.camera.eye,
        );

        FrameOutput {
            sim,
            view,
            view_params,
            visible_points,
            blend: self.theme.blend_mode(),
            clear_color: self.theme.clear_color(),
            show_horizon: self.show_horizon,
            horizon,
            telemetry: Telemetry {
                focus: self.params.focus,
                aperture: self.params.aperture,
                status: Status::from_speed(self.params.speed, mode),
                fps: self.quality.fps(),
                points: visible_points,
                quality: self.quality.level(),
                label: profile.label,
                track: profile.track,
            },
            quality_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceProfile;

    fn ctx() -> SimulationContext {
        SimulationContext::new(FieldConfig::for_device(DeviceProfile::Desktop).with_grid_width(8))
            .unwrap()
    }

    #[test]
    fn pointer_wakes_simulation() {
        let mut c = ctx();
        let idle = c.frame(0.0);
        assert_eq!(idle.telemetry.status, Status::Dormant);
        let mut t = 16.0;
        for _ in 0..30 {
            c.pointer(0.8, 0.5, t);
            c.frame(t);
            t += 16.0;
        }
        assert!(c.params().speed > 0.5);
        assert!(c.params().focus > 300.0);
    }

    #[test]
    fn gravity_well_switch_applies_scene_changes() {
        let mut c = ctx();
        c.set_mode_id(4).unwrap();
        let out = c.frame(0.0);
        assert_eq!(out.view.fog_density, 0.0);
        assert_eq!(out.view.physical, 1);
        assert_eq!(c.interaction().targets().focus, 20.0);
        assert_eq!(out.telemetry.label, "EVENT.HORIZON");
        assert!(c.set_mode_id(12).is_err());
    }

    #[test]
    fn theme_drives_blend_and_clear() {
        let mut c = ctx();
        c.set_theme(Theme::Light);
        let out = c.frame(0.0);
        assert_eq!(out.blend, BlendMode::Alpha);
        assert_eq!(out.view.light, 1);
        c.set_theme(c.theme().toggle());
        assert_eq!(c.frame(16.0).blend, BlendMode::Additive);
    }

    #[test]
    fn visible_points_start_at_full_count() {
        let mut c = ctx();
        let out = c.frame(0.0);
        assert_eq!(out.visible_points, 8 * 8 * 8);
        assert_eq!(out.sim.count, 64);
    }

    #[test]
    fn horizon_sphere_follows_gravity_well() {
        let mut c = ctx();
        assert!(!c.frame(0.0).show_horizon);
        c.set_mode(AttractorMode::Singularity);
        let out = c.frame(16.0);
        assert!(out.show_horizon);
        assert_eq!(out.horizon.eye, [0.0, 20.0, 150.0, 1.0]);
        // The origin projects to the screen centre regardless of the spin.
        let view_proj = glam::Mat4::from_cols_array_2d(&out.horizon.view_proj);
        let centre = view_proj.project_point3(glam::Vec3::ZERO);
        assert!(centre.x.abs() < 1e-4 && centre.y.abs() < 1e-4);
        for mode in [AttractorMode::Thomas, AttractorMode::FractalDream] {
            c.set_mode(mode);
            assert!(!c.frame(32.0).show_horizon, "{mode:?} shows the horizon");
        }
    }
}
