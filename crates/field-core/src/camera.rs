//! Scene camera and the system rotation applied to the particle cloud.

use crate::constants::{
    CAMERA_EASE, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, ROTATION_X_IDLE, ROTATION_X_SETTLE,
    ROTATION_X_SPEED, ROTATION_Y_IDLE, ROTATION_Y_SPEED,
};
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_ZNEAR),
            target: Vec3::new(0.0, 0.0, 10.0),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Ease the eye's x/y toward `tilt`, keeping its distance along z.
    pub fn ease_tilt(&mut self, tilt: Vec2) {
        self.eye.x += (tilt.x - self.eye.x) * CAMERA_EASE;
        self.eye.y += (tilt.y - self.eye.y) * CAMERA_EASE;
    }
}

/// Slow whole-system spin; faster while the simulation runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SystemRotation {
    pub x: f32,
    pub y: f32,
}

impl SystemRotation {
    pub fn advance(&mut self, speed: f32, settle_x: bool) {
        self.y += ROTATION_Y_IDLE + ROTATION_Y_SPEED * speed;
        if settle_x {
            self.x *= ROTATION_X_SETTLE;
        } else {
            self.x += ROTATION_X_IDLE + ROTATION_X_SPEED * speed;
        }
    }

    /// Model matrix: rotate about x, then y (Three.js `XYZ` Euler order).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_decays_x_rotation() {
        let mut r = SystemRotation { x: 1.0, y: 0.0 };
        for _ in 0..200 {
            r.advance(1.5, true);
        }
        assert!(r.x < 1e-4);
        assert!(r.y > 0.5);
    }

    #[test]
    fn tilt_easing_keeps_depth() {
        let mut cam = Camera {
            eye: Vec3::new(0.0, 20.0, 150.0),
            target: Vec3::ZERO,
            ..Default::default()
        };
        cam.ease_tilt(Vec2::new(100.0, 0.0));
        assert!((cam.eye.x - 5.0).abs() < 1e-5);
        assert!((cam.eye.y - 19.0).abs() < 1e-5);
        assert_eq!(cam.eye.z, 150.0);
    }
}
