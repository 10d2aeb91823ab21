//! Ray and bounding-box math.

use glam::Vec3;

use crate::coords::BlockPos;

/// Ray for picking and line-of-sight queries.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray; the direction is normalized.
    #[inline]
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Box standing on `feet` with the given horizontal half-width and height.
    #[inline]
    #[must_use]
    pub fn from_feet(feet: Vec3, half_width: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(feet.x - half_width, feet.y, feet.z - half_width),
            max: Vec3::new(feet.x + half_width, feet.y + height, feet.z + half_width),
        }
    }

    /// Inclusive range of block cells the box touches, as `(min, max)`.
    #[inline]
    #[must_use]
    pub fn block_range(&self) -> (BlockPos, BlockPos) {
        (BlockPos::from_vec3(self.min), BlockPos::from_vec3(self.max))
    }
}
