use crate::constants::{
    CONSTRAINED_SIZE_SCALE, GRID_WIDTH_CONSTRAINED, GRID_WIDTH_DESKTOP, GRID_WIDTH_MAX, QUALITY_FLOOR,
    QUALITY_FLOOR_CONSTRAINED, QUALITY_TARGET_FPS, SMOOTHING_RATE, SMOOTHING_RATE_CONSTRAINED,
    SUB_PARTICLES,
};
use crate::error::FieldError;

/// Coarse device class chosen by the host at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    /// Phones and tablets: smaller grid, smaller points, gentler smoothing.
    Constrained,
}

impl DeviceProfile {
    pub fn grid_width(self) -> u32 {
        match self {
            DeviceProfile::Desktop => GRID_WIDTH_DESKTOP,
            DeviceProfile::Constrained => GRID_WIDTH_CONSTRAINED,
        }
    }

    pub fn size_scale(self) -> f32 {
        match self {
            DeviceProfile::Desktop => 1.0,
            DeviceProfile::Constrained => CONSTRAINED_SIZE_SCALE,
        }
    }

    pub fn quality_floor(self) -> f32 {
        match self {
            DeviceProfile::Desktop => QUALITY_FLOOR,
            DeviceProfile::Constrained => QUALITY_FLOOR_CONSTRAINED,
        }
    }

    pub fn smoothing_rate(self) -> f32 {
        match self {
            DeviceProfile::Desktop => SMOOTHING_RATE,
            DeviceProfile::Constrained => SMOOTHING_RATE_CONSTRAINED,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub device: DeviceProfile,
    /// Side of the square state grid.
    pub grid_width: u32,
    pub target_fps: f32,
    /// Seed for the initial field and the scatter table.
    pub seed: u64,
}

impl FieldConfig {
    pub fn for_device(device: DeviceProfile) -> Self {
        Self {
            device,
            grid_width: device.grid_width(),
            target_fps: QUALITY_TARGET_FPS,
            seed: 0x5eed_f1e1d,
        }
    }

    pub fn with_grid_width(mut self, width: u32) -> Self {
        self.grid_width = width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.grid_width == 0 {
            return Err(FieldError::EmptyGrid);
        }
        if self.grid_width > GRID_WIDTH_MAX {
            return Err(FieldError::GridTooLarge {
                width: self.grid_width,
                max: GRID_WIDTH_MAX,
            });
        }
        Ok(())
    }

    fn too_large(&self) -> FieldError {
        FieldError::GridTooLarge {
            width: self.grid_width,
            max: GRID_WIDTH_MAX,
        }
    }

    pub fn state_count(&self) -> Result<u32, FieldError> {
        self.grid_width
            .checked_mul(self.grid_width)
            .ok_or_else(|| self.too_large())
    }

    pub fn point_count(&self) -> Result<u32, FieldError> {
        self.state_count()?
            .checked_mul(SUB_PARTICLES)
            .ok_or_else(|| self.too_large())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::for_device(DeviceProfile::Desktop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_profile_is_lighter() {
        let c = FieldConfig::for_device(DeviceProfile::Constrained);
        assert_eq!(c.grid_width, 512);
        assert_eq!(c.point_count(), Ok(512 * 512 * 8));
        assert_eq!(c.device.quality_floor(), 0.5);
        assert!(c.device.size_scale() < 1.0);
    }

    #[test]
    fn zero_grid_is_rejected() {
        let c = FieldConfig::default().with_grid_width(0);
        assert_eq!(c.validate(), Err(FieldError::EmptyGrid));
    }

    #[test]
    fn oversized_grid_is_rejected_without_overflow() {
        let max = FieldConfig::default().with_grid_width(GRID_WIDTH_MAX);
        assert_eq!(max.validate(), Ok(()));
        assert_eq!(max.point_count().map(|n| n as u64 * 4), Ok(128 << 20));

        let big = FieldConfig::default().with_grid_width(5000);
        assert_eq!(
            big.validate(),
            Err(FieldError::GridTooLarge { width: 5000, max: GRID_WIDTH_MAX })
        );

        let huge = FieldConfig::default().with_grid_width(70_000);
        assert!(huge.validate().is_err());
        assert!(huge.state_count().is_err());
        assert!(huge.point_count().is_err());
    }
}
