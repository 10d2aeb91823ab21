//! Scene presentation settings handed to the render backend.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelwalk_core::types::hex_to_rgb;
use voxelwalk_core::{Error, Result};

/// Sky, fog, lighting and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Clear color and fog color, as `0xRRGGBB`.
    pub sky_color: u32,
    /// Distance where fog starts.
    pub fog_near: f32,
    /// Distance where fog is opaque.
    pub fog_far: f32,
    pub ambient_intensity: f32,
    /// Position of the directional light; it shines toward the origin.
    pub sun_position: Vec3,
    pub sun_intensity: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sky_color: 0x87_CE_EB,
            fog_near: 20.0,
            fog_far: 60.0,
            ambient_intensity: 0.6,
            sun_position: Vec3::new(50.0, 100.0, 50.0),
            sun_intensity: 0.8,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl SceneSettings {
    /// Sky color as linear `0..1` floats.
    #[must_use]
    pub fn sky_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.sky_color)
    }

    /// Unit vector the sun light travels along.
    #[must_use]
    pub fn sun_direction(&self) -> Vec3 {
        (-self.sun_position).normalize_or_zero()
    }

    #[must_use]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "field of view {} outside (0, 180) degrees",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got {}..{}",
                self.near, self.far
            )));
        }
        if self.fog_far < self.fog_near {
            return Err(Error::InvalidConfig(format!(
                "fog ends at {} before it starts at {}",
                self.fog_far, self.fog_near
            )));
        }
        Ok(())
    }
}
