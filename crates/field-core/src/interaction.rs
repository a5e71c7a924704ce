//! Input-to-target mapping for pointer, touch and device orientation.
//!
//! Every source writes into one shared [`Targets`] set; the per-frame
//! smoothing in [`crate::params`] chases those targets. Orientation runs a
//! two-state machine with hysteresis so a phone lying on a table settles back
//! to dormant instead of drifting.

use crate::constants::{
    CAMERA_TILT_RANGE, IDLE_TIMEOUT_MS, ORIENTATION_ACTIVATE_DEG, ORIENTATION_APERTURE_HALF,
    ORIENTATION_APERTURE_MID, ORIENTATION_DEBOUNCE_MS, ORIENTATION_FOCUS_HALF,
    ORIENTATION_FOCUS_MID, ORIENTATION_SMOOTHING, ORIENTATION_STABLE_STDDEV_DEG,
    ORIENTATION_TILT_CYCLE_DEG, ORIENTATION_TURN_CYCLE_DEG, ORIENTATION_WINDOW,
    POINTER_APERTURE_SPAN, POINTER_FOCUS_BASE, POINTER_FOCUS_SPAN,
};
use crate::mode::AttractorMode;
use crate::params::Targets;
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Device orientation angles in degrees (`alpha` compass, `beta` front/back, `gamma` left/right).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

/// Wraps an angle difference into `(-180, 180]`.
pub fn wrap_degrees(d: f32) -> f32 {
    let w = (d + 180.0).rem_euclid(360.0) - 180.0;
    if w == -180.0 {
        180.0
    } else {
        w
    }
}

impl Tilt {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Exponential blend toward `next`, taking the short way round the compass.
    fn blend(self, next: Tilt, weight: f32) -> Tilt {
        Tilt {
            alpha: (self.alpha + wrap_degrees(next.alpha - self.alpha) * weight).rem_euclid(360.0),
            beta: self.beta + (next.beta - self.beta) * weight,
            gamma: self.gamma + (next.gamma - self.gamma) * weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrientationState {
    Dormant { baseline: Option<Tilt> },
    Active { baseline: Tilt, stable_since: Option<f64> },
}

impl Default for OrientationState {
    fn default() -> Self {
        OrientationState::Dormant { baseline: None }
    }
}

impl OrientationState {
    pub fn is_active(&self) -> bool {
        matches!(self, OrientationState::Active { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrientationPermission {
    #[default]
    NotRequested,
    Pending,
    Granted,
    Denied,
}

/// Population standard deviation.
fn stddev(values: impl Iterator<Item = f32> + Clone) -> f32 {
    let n = values.clone().count();
    if n == 0 {
        return 0.0;
    }
    let mean = values.clone().sum::<f32>() / n as f32;
    let var = values.map(|v| (v - mean) * (v - mean)).sum::<f32>() / n as f32;
    var.sqrt()
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    targets: Targets,
    camera_tilt: Option<Vec2>,
    last_input_ms: Option<f64>,
    smoothed: Option<Tilt>,
    state: OrientationState,
    permission: OrientationPermission,
    window: SmallVec<[(f32, f32); ORIENTATION_WINDOW]>,
}

impl InteractionController {
    pub fn new(targets: Targets) -> Self {
        Self {
            targets,
            ..Default::default()
        }
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut Targets {
        &mut self.targets
    }

    /// Gravity-well camera offset the host eases toward, once the pointer has moved.
    pub fn camera_tilt(&self) -> Option<Vec2> {
        self.camera_tilt
    }

    pub fn reset_camera_tilt(&mut self) {
        self.camera_tilt = None;
    }

    pub fn orientation_state(&self) -> &OrientationState {
        &self.state
    }

    pub fn permission(&self) -> OrientationPermission {
        self.permission
    }

    pub fn is_interacting(&self, now_ms: f64) -> bool {
        self.last_input_ms
            .is_some_and(|t| now_ms - t <= IDLE_TIMEOUT_MS)
    }

    fn touch(&mut self, now_ms: f64) {
        self.last_input_ms = Some(now_ms);
    }

    /// Pointer or touch sample with coordinates normalised to `[0, 1]`.
    pub fn pointer(&mut self, nx: f32, ny: f32, mode: AttractorMode, now_ms: f64) {
        let nx = nx.clamp(0.0, 1.0);
        let ny = ny.clamp(0.0, 1.0);
        if mode.is_gravity_well() {
            self.camera_tilt = Some(Vec2::new(nx - 0.5, ny - 0.5) * 2.0 * CAMERA_TILT_RANGE);
        } else {
            self.targets.focus = POINTER_FOCUS_BASE + nx * POINTER_FOCUS_SPAN;
            self.targets.aperture = ny * POINTER_APERTURE_SPAN;
        }
        self.touch(now_ms);
    }

    /// Marks the start of a lazy permission request. Returns `false` if one
    /// was already made.
    pub fn begin_permission_request(&mut self) -> bool {
        if self.permission == OrientationPermission::NotRequested {
            self.permission = OrientationPermission::Pending;
            true
        } else {
            false
        }
    }

    pub fn set_permission(&mut self, granted: bool) {
        self.permission = if granted {
            log::info!("[orientation] permission granted");
            OrientationPermission::Granted
        } else {
            log::info!("[orientation] permission denied; orientation input stays inert");
            OrientationPermission::Denied
        };
    }

    /// One `deviceorientation` sample in degrees.
    pub fn orientation(&mut self, reading: Tilt, now_ms: f64) {
        if self.permission != OrientationPermission::Granted {
            return;
        }
        let tilt = match self.smoothed {
            Some(prev) => prev.blend(reading, ORIENTATION_SMOOTHING),
            None => reading,
        };
        self.smoothed = Some(tilt);

        match self.state {
            OrientationState::Dormant { baseline: None } => {
                self.state = OrientationState::Dormant {
                    baseline: Some(tilt),
                };
            }
            OrientationState::Dormant {
                baseline: Some(baseline),
            } => {
                let magnitude = (tilt.beta - baseline.beta).hypot(tilt.gamma - baseline.gamma);
                if magnitude > ORIENTATION_ACTIVATE_DEG {
                    log::debug!("[orientation] active (tilt {magnitude:.1} deg)");
                    self.window.clear();
                    self.state = OrientationState::Active {
                        baseline,
                        stable_since: None,
                    };
                    self.apply_tilt(baseline, tilt, now_ms);
                }
            }
            OrientationState::Active {
                baseline,
                stable_since,
            } => {
                self.apply_tilt(baseline, tilt, now_ms);
                self.track_stability(baseline, stable_since, tilt, now_ms);
            }
        }
    }

    fn apply_tilt(&mut self, baseline: Tilt, tilt: Tilt, now_ms: f64) {
        let d_beta = tilt.beta - baseline.beta;
        let d_gamma = tilt.gamma - baseline.gamma;
        let d_alpha = wrap_degrees(tilt.alpha - baseline.alpha);
        self.targets.focus =
            ORIENTATION_FOCUS_MID + ORIENTATION_FOCUS_HALF * (TAU * d_gamma / ORIENTATION_TILT_CYCLE_DEG).sin();
        self.targets.aperture = ORIENTATION_APERTURE_MID
            + ORIENTATION_APERTURE_HALF * (TAU * d_beta / ORIENTATION_TILT_CYCLE_DEG).sin();
        self.targets.hue_shift = PI * (TAU * d_alpha / ORIENTATION_TURN_CYCLE_DEG).sin();
        self.touch(now_ms);
    }

    fn track_stability(&mut self, baseline: Tilt, stable_since: Option<f64>, tilt: Tilt, now_ms: f64) {
        if self.window.len() == ORIENTATION_WINDOW {
            self.window.remove(0);
        }
        self.window.push((tilt.beta, tilt.gamma));
        if self.window.len() < ORIENTATION_WINDOW {
            return;
        }

        let sigma = stddev(self.window.iter().map(|w| w.0)).max(stddev(self.window.iter().map(|w| w.1)));
        if sigma >= ORIENTATION_STABLE_STDDEV_DEG {
            self.state = OrientationState::Active {
                baseline,
                stable_since: None,
            };
            return;
        }

        let since = stable_since.unwrap_or(now_ms);
        if now_ms - since >= ORIENTATION_DEBOUNCE_MS {
            log::debug!("[orientation] dormant (sigma {sigma:.2} deg)");
            self.window.clear();
            self.state = OrientationState::Dormant {
                baseline: Some(tilt),
            };
        } else {
            self.state = OrientationState::Active {
                baseline,
                stable_since: Some(since),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted() -> InteractionController {
        let mut c = InteractionController::new(Targets::default());
        c.set_permission(true);
        c
    }

    #[test]
    fn wrap_takes_short_way() {
        assert_eq!(wrap_degrees(350.0), -10.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
    }

    #[test]
    fn pointer_maps_linearly_and_expires() {
        let mut c = InteractionController::default();
        c.pointer(0.5, 0.2, AttractorMode::Thomas, 1000.0);
        assert_eq!(c.targets().focus, 350.0);
        assert!((c.targets().aperture - 2.0).abs() < 1e-6);
        assert!(c.is_interacting(1150.0));
        assert!(!c.is_interacting(1201.0));
    }

    #[test]
    fn pointer_in_gravity_well_tilts_camera_only() {
        let mut c = InteractionController::default();
        let before = *c.targets();
        c.pointer(1.0, 0.0, AttractorMode::Singularity, 0.0);
        assert_eq!(*c.targets(), before);
        assert_eq!(c.camera_tilt(), Some(Vec2::new(100.0, -100.0)));
    }

    #[test]
    fn first_reading_only_sets_baseline() {
        let mut c = granted();
        c.orientation(Tilt::new(0.0, 40.0, 0.0), 0.0);
        assert_eq!(
            *c.orientation_state(),
            OrientationState::Dormant {
                baseline: Some(Tilt::new(0.0, 40.0, 0.0))
            }
        );
        assert!(!c.is_interacting(0.0));
    }

    #[test]
    fn ungranted_controller_ignores_readings() {
        let mut c = InteractionController::default();
        for i in 0..50 {
            c.orientation(Tilt::new(0.0, i as f32 * 5.0, 0.0), i as f64 * 16.0);
        }
        assert_eq!(*c.orientation_state(), OrientationState::default());
    }
}
