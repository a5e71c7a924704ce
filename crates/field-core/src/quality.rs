//! Frame-rate driven load shedding: sheds points quickly, restores slowly.

use crate::constants::{
    QUALITY_GAIN, QUALITY_HYSTERESIS, QUALITY_MAX_STEP, QUALITY_RESTORE_DAMPING,
    QUALITY_TARGET_FPS, QUALITY_WARMUP_MS, QUALITY_WINDOW_MS,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityState {
    pub performance_level: f32,
}

#[derive(Clone, Debug)]
pub struct QualityGovernor {
    state: QualityState,
    floor: f32,
    target_fps: f32,
    started_ms: Option<f64>,
    window_start_ms: Option<f64>,
    frames: u32,
    last_fps: f32,
}

impl QualityGovernor {
    pub fn new(floor: f32, target_fps: f32) -> Self {
        Self {
            state: QualityState {
                performance_level: 1.0,
            },
            floor: floor.clamp(0.0, 1.0),
            target_fps,
            started_ms: None,
            window_start_ms: None,
            frames: 0,
            last_fps: 0.0,
        }
    }

    pub fn level(&self) -> f32 {
        self.state.performance_level
    }

    pub fn state(&self) -> QualityState {
        self.state
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Most recent windowed measurement; 0 until the first window closes.
    pub fn fps(&self) -> f32 {
        self.last_fps
    }

    /// Prefix of the point list to draw.
    pub fn visible_points(&self, total: u32) -> u32 {
        ((total as f64) * (self.state.performance_level as f64)).ceil() as u32
    }

    /// Record one presented frame at `now_ms`. Returns the new level when it changed.
    pub fn frame(&mut self, now_ms: f64) -> Option<f32> {
        let started = *self.started_ms.get_or_insert(now_ms);
        if now_ms - started < QUALITY_WARMUP_MS {
            return None;
        }
        let window_start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;
        let elapsed = now_ms - window_start;
        if elapsed < QUALITY_WINDOW_MS {
            return None;
        }

        let fps = (self.frames as f64 * 1000.0 / elapsed) as f32;
        self.last_fps = fps;
        self.frames = 0;
        self.window_start_ms = Some(now_ms);
        self.adjust(fps)
    }

    /// Apply one window's measurement.
    pub fn adjust(&mut self, fps: f32) -> Option<f32> {
        let mut adj = (fps - self.target_fps) * QUALITY_GAIN;
        if adj > 0.0 {
            adj *= QUALITY_RESTORE_DAMPING;
        }
        adj = adj.clamp(-QUALITY_MAX_STEP, QUALITY_MAX_STEP);
        let current = self.state.performance_level;
        let next = (current + adj).clamp(self.floor, 1.0);
        if (next - current).abs() > QUALITY_HYSTERESIS {
            log::info!("[quality] {fps:.0} fps, level {current:.2} -> {next:.2}");
            self.state.performance_level = next;
            Some(next)
        } else {
            None
        }
    }
}

impl Default for QualityGovernor {
    fn default() -> Self {
        Self::new(crate::constants::QUALITY_FLOOR, QUALITY_TARGET_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_frames_are_ignored() {
        let mut q = QualityGovernor::default();
        for i in 0..120 {
            assert_eq!(q.frame(i as f64 * 16.0), None);
        }
        assert_eq!(q.level(), 1.0);
    }

    #[test]
    fn sheds_fast_restores_slow() {
        let mut q = QualityGovernor::default();
        q.adjust(20.0);
        let shed = 1.0 - q.level();
        assert!((shed - 0.15).abs() < 1e-6);
        let before = q.level();
        q.adjust(120.0);
        let restored = q.level() - before;
        assert!((restored - 0.045).abs() < 1e-5);
    }

    #[test]
    fn small_changes_fall_inside_hysteresis() {
        let mut q = QualityGovernor::default();
        assert_eq!(q.adjust(58.5), None);
        assert_eq!(q.level(), 1.0);
    }

    #[test]
    fn visible_points_round_up() {
        let mut q = QualityGovernor::new(0.25, 60.0);
        q.adjust(0.0);
        assert_eq!(q.visible_points(10), 9);
        assert_eq!(q.visible_points(0), 0);
    }
}
