//! Coordinate systems for the voxel world.
//!
//! Three spaces are used:
//! - [`BlockPos`]: integer world position of a single block
//! - [`ChunkPos`]: horizontal chunk column index (no vertical chunking)
//! - [`LocalPos`]: block position relative to its chunk's origin
//!
//! Splitting a world position always uses floor division, so `x = -1`
//! lands in chunk `-1` at local `15`, never in chunk `0`.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{CHUNK_AREA, CHUNK_HEIGHT_I32, CHUNK_SIZE, CHUNK_SIZE_I32};

/// Block position relative to a chunk origin.
///
/// Not every value is inside the chunk: neighbor lookups during meshing
/// routinely produce `-1` or `CHUNK_SIZE`. Use [`LocalPos::to_index`] to
/// find out whether the position addresses a stored cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LocalPos {
    /// Create a new local position
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns true if the position addresses a cell inside the chunk.
    #[inline]
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0
            && self.x < CHUNK_SIZE_I32
            && self.y >= 0
            && self.y < CHUNK_HEIGHT_I32
            && self.z >= 0
            && self.z < CHUNK_SIZE_I32
    }

    /// Flat storage offset `x + z * SIZE + y * SIZE²`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some(self.x as usize + self.z as usize * CHUNK_SIZE + self.y as usize * CHUNK_AREA)
    }

    /// Inverse of [`LocalPos::to_index`].
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn from_index(index: usize) -> Self {
        let x = (index % CHUNK_SIZE) as i32;
        let z = ((index / CHUNK_SIZE) % CHUNK_SIZE) as i32;
        let y = (index / CHUNK_AREA) as i32;
        Self { x, y, z }
    }

    /// Position shifted by the given offset.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Chunk column position in chunk coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Create a new chunk position
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World position of the chunk's minimum corner `(x * SIZE, 0, z * SIZE)`.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> BlockPos {
        BlockPos::new(self.x * CHUNK_SIZE_I32, 0, self.z * CHUNK_SIZE_I32)
    }

    /// Chunk containing a continuous world position.
    #[inline]
    #[must_use]
    pub fn from_world(position: Vec3) -> Self {
        BlockPos::from_vec3(position).chunk_pos()
    }

    /// Chunk position shifted by the given number of chunks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Largest per-axis distance to another chunk.
    #[inline]
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dz = (self.z - other.z).abs();
        if dx > dz {
            dx
        } else {
            dz
        }
    }

    /// All chunk positions within `radius` (Chebyshev) of this one, row by row.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = Self> {
        (-radius..=radius)
            .flat_map(move |dx| (-radius..=radius).map(move |dz| self.offset(dx, dz)))
    }
}

/// Integer world position of a single block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing a continuous world position (componentwise floor).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x.floor() as i32, v.y.floor() as i32, v.z.floor() as i32)
    }

    /// Get the chunk containing this position
    #[inline]
    #[must_use]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos::new(
            self.x.div_euclid(CHUNK_SIZE_I32),
            self.z.div_euclid(CHUNK_SIZE_I32),
        )
    }

    /// Get the position relative to the owning chunk; `y` passes through unchanged.
    #[inline]
    #[must_use]
    pub const fn local_pos(self) -> LocalPos {
        LocalPos::new(
            self.x.rem_euclid(CHUNK_SIZE_I32),
            self.y,
            self.z.rem_euclid(CHUNK_SIZE_I32),
        )
    }

    /// Split into chunk and local position
    #[inline]
    #[must_use]
    pub const fn split(self) -> (ChunkPos, LocalPos) {
        (self.chunk_pos(), self.local_pos())
    }

    /// Create from chunk and local position
    #[inline]
    #[must_use]
    pub const fn from_chunk_local(chunk: ChunkPos, local: LocalPos) -> Self {
        Self::new(
            chunk.x * CHUNK_SIZE_I32 + local.x,
            local.y,
            chunk.z * CHUNK_SIZE_I32 + local.z,
        )
    }

    /// Position shifted by the given offset.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Minimum corner as floating point
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Center of the block cell.
    #[inline]
    #[must_use]
    pub fn center(self) -> Vec3 {
        self.to_vec3() + Vec3::splat(0.5)
    }
}

impl From<IVec3> for BlockPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<BlockPos> for IVec3 {
    fn from(pos: BlockPos) -> Self {
        Self::new(pos.x, pos.y, pos.z)
    }
}
