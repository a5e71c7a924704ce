//! Read-only debug readout produced once per frame.

use crate::constants::STATUS_ACTIVE_SPEED;
use crate::mode::AttractorMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Active,
    Gravity,
    Dormant,
}

impl Status {
    pub fn from_speed(speed: f32, mode: AttractorMode) -> Self {
        if speed > STATUS_ACTIVE_SPEED {
            Status::Active
        } else if mode.is_gravity_well() {
            Status::Gravity
        } else {
            Status::Dormant
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Gravity => "GRAVITY",
            Status::Dormant => "DORMANT",
        }
    }

    /// Readout colour; bright while running.
    pub fn css_color(self) -> &'static str {
        match self {
            Status::Active => "#ffffff",
            _ => "#666666",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub focus: f32,
    pub aperture: f32,
    pub status: Status,
    pub fps: f32,
    pub points: u32,
    pub quality: f32,
    pub label: &'static str,
    pub track: &'static str,
}

impl Telemetry {
    pub fn focus_text(&self) -> String {
        format!("{:.0}", self.focus)
    }

    pub fn aperture_text(&self) -> String {
        format!("{:.1}", self.aperture)
    }

    pub fn fps_text(&self) -> String {
        format!("{:.0}", self.fps)
    }

    pub fn points_text(&self) -> String {
        self.points.to_string()
    }

    pub fn quality_text(&self) -> String {
        format!("{:.0}%", self.quality * 100.0)
    }

    /// `(element id, text)` pairs for the DOM readout.
    pub fn fields(&self) -> [(&'static str, String); 8] {
        [
            ("val-focus", self.focus_text()),
            ("val-aperture", self.aperture_text()),
            ("val-status", self.status.as_str().to_string()),
            ("val-fps", self.fps_text()),
            ("val-points", self.points_text()),
            ("val-quality", self.quality_text()),
            ("val-eq", self.label.to_string()),
            ("track-title", self.track.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_follows_speed_and_mode() {
        assert_eq!(Status::from_speed(0.5, AttractorMode::Thomas), Status::Active);
        assert_eq!(Status::from_speed(0.0, AttractorMode::Thomas).as_str(), "DORMANT");
        assert_eq!(Status::from_speed(0.05, AttractorMode::Singularity).as_str(), "GRAVITY");
    }

    #[test]
    fn readout_formatting() {
        let t = Telemetry {
            focus: 312.6,
            aperture: 4.96,
            status: Status::Dormant,
            fps: 59.7,
            points: 8_000_000,
            quality: 0.854,
            label: "THOMAS",
            track: "HOME.BASE",
        };
        assert_eq!(t.focus_text(), "313");
        assert_eq!(t.aperture_text(), "5.0");
        assert_eq!(t.fps_text(), "60");
        assert_eq!(t.quality_text(), "85%");
        assert_eq!(t.fields()[4].1, "8000000");
    }
}
