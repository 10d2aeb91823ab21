//! Read-only HUD data and the frame-rate counter behind it.

use std::fmt;

use glam::{IVec3, Vec3};
use voxelwalk_core::BlockKind;

/// What the HUD shows, captured once per refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Player feet position, rounded to whole blocks.
    pub position: IVec3,
    pub selected: BlockKind,
    pub fps: u32,
}

impl HudSnapshot {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(position: Vec3, selected: BlockKind, fps: u32) -> Self {
        // halves round toward +inf
        let rounded = (position + Vec3::splat(0.5)).floor();
        Self {
            position: IVec3::new(rounded.x as i32, rounded.y as i32, rounded.z as i32),
            selected,
            fps,
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {}, {}, {} | Block: {} | FPS: {}",
            self.position.x, self.position.y, self.position.z, self.selected, self.fps
        )
    }
}

/// Counts frames and publishes the count once a second has passed.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: u32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame of length `dt`. Returns the new rate when one is published.
    pub fn tick(&mut self, dt: f32) -> Option<u32> {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < 1.0 {
            return None;
        }
        self.fps = self.frames;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    /// Most recently published rate; zero until the first second has passed.
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }
}
