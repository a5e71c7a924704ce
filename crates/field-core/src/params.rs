use crate::constants::{
    DEFAULT_APERTURE, DEFAULT_FOCUS, INTEGRATION_DT, SPEED_DEAD_ZONE, SPEED_FALL, SPEED_RISE,
};
use crate::mode::{AttractorMode, ModeProfile};

/// Instantaneous values written by input sources.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Targets {
    pub focus: f32,
    pub aperture: f32,
    pub hue_shift: f32,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS,
            aperture: DEFAULT_APERTURE,
            hue_shift: 0.0,
        }
    }
}

/// Smoothed values read by the stepper and projector each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
    pub mode: AttractorMode,
    pub speed: f32,
    pub focus: f32,
    pub aperture: f32,
    pub hue_shift: f32,
    /// Seconds since start.
    pub time: f32,
    pub dt: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let t = Targets::default();
        Self {
            mode: AttractorMode::default(),
            speed: 0.0,
            focus: t.focus,
            aperture: t.aperture,
            hue_shift: t.hue_shift,
            time: 0.0,
            dt: INTEGRATION_DT,
        }
    }
}

impl SimulationParameters {
    /// Close `rate` of the gap to each target.
    pub fn smooth_toward(&mut self, targets: &Targets, rate: f32) {
        self.focus += (targets.focus - self.focus) * rate;
        self.aperture += (targets.aperture - self.aperture) * rate;
        self.hue_shift += (targets.hue_shift - self.hue_shift) * rate;
    }

    /// Asymmetric ramp toward the mode's speed envelope, snapping tiny speeds to zero.
    pub fn ramp_speed(&mut self, profile: &ModeProfile, interacting: bool) {
        let (target, rate) = if interacting {
            (profile.max_speed, SPEED_RISE)
        } else {
            (profile.base_speed, SPEED_FALL)
        };
        self.speed += (target - self.speed) * rate;
        if self.speed < SPEED_DEAD_ZONE {
            self.speed = 0.0;
        }
    }
}
