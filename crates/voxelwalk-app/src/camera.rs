//! First-person camera.

use glam::{EulerRot, Mat4, Quat, Vec3};
use voxelwalk_physics::Player;

use crate::scene::SceneSettings;

/// Perspective camera described by position and view angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation about world Y, in radians.
    pub yaw: f32,
    /// Rotation about the camera's X axis, in radians.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let scene = SceneSettings::default();
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: scene.fov_radians(),
            aspect: 16.0 / 9.0,
            near: scene.near,
            far: scene.far,
        }
    }
}

impl Camera {
    /// Camera at the player's eyes.
    #[must_use]
    pub fn first_person(player: &Player, scene: &SceneSettings, aspect: f32) -> Self {
        Self {
            position: player.eye_position(),
            yaw: player.yaw(),
            pitch: player.pitch(),
            fov: scene.fov_radians(),
            aspect,
            near: scene.near,
            far: scene.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit view direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction(), self.up())
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get the view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
