//! Player tuning parameters.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelwalk_core::{Error, Result};

/// Player movement, collision and interaction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Feet position at startup.
    pub spawn: Vec3,
    /// Feet position after falling below `death_plane`.
    pub respawn: Vec3,
    /// Altitude below which the player is respawned.
    pub death_plane: f32,
    /// Horizontal speed in blocks per second.
    pub speed: f32,
    /// Speed factor while the walk modifier is held.
    pub walk_multiplier: f32,
    /// Upward velocity applied on jump.
    pub jump_force: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Body height.
    pub height: f32,
    /// Horizontal half-width of the body.
    pub radius: f32,
    /// Eye offset above the feet.
    pub eye_height: f32,
    /// Collision sub-steps per update.
    pub substeps: u32,
    /// Gap left between the body and a block face after a horizontal or head collision.
    pub collision_epsilon: f32,
    /// Maximum distance for removing or placing blocks.
    pub reach: f32,
    /// Upper bound on the pick ray length.
    pub pick_distance: f32,
    /// Radians of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Half-extents of the box around the body center where placement is refused.
    pub placement_clearance: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 25.0, 0.0),
            respawn: Vec3::new(0.0, 30.0, 0.0),
            death_plane: -30.0,
            speed: 5.0,
            walk_multiplier: 0.5,
            jump_force: 8.0,
            gravity: 20.0,
            height: 1.7,
            radius: 0.3,
            eye_height: 1.6,
            substeps: 8,
            collision_epsilon: 0.001,
            reach: 6.0,
            pick_distance: 64.0,
            mouse_sensitivity: 0.002,
            placement_clearance: Vec3::new(0.8, 1.5, 0.8),
        }
    }
}

impl PlayerConfig {
    /// Set the spawn point.
    #[must_use]
    pub const fn with_spawn(mut self, spawn: Vec3) -> Self {
        self.spawn = spawn;
        self
    }

    /// Set the horizontal speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the number of collision sub-steps.
    #[must_use]
    pub const fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("height", self.height),
            ("radius", self.radius),
            ("reach", self.reach),
            ("pick distance", self.pick_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "player {name} must be positive, got {value}"
                )));
            }
        }
        if self.radius >= 0.5 {
            return Err(Error::InvalidConfig(format!(
                "player radius {} must be below half a block",
                self.radius
            )));
        }
        if self.substeps == 0 {
            return Err(Error::InvalidConfig("player substeps must be at least 1".into()));
        }
        if self.eye_height > self.height {
            return Err(Error::InvalidConfig(format!(
                "eye height {} above body height {}",
                self.eye_height, self.height
            )));
        }
        Ok(())
    }
}
