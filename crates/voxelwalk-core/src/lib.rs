//! Core types, math, and traits shared by every voxelwalk crate.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - The closed set of block kinds and their display colors
//! - Coordinate systems (block, chunk, chunk-local) with floor-division splitting
//! - Ray and bounding-box math
//! - The [`BlockSource`] / [`VoxelGrid`] traits that decouple physics from storage

pub mod coords;
pub mod error;
pub mod grid;
pub mod math;
pub mod types;

pub use coords::{BlockPos, ChunkPos, LocalPos};
pub use error::{Error, Result};
pub use grid::{BlockSource, EmptySpace, VoxelGrid};
pub use types::BlockKind;

/// World-wide constants
pub mod constants {
    /// Width and depth of a chunk in blocks
    pub const CHUNK_SIZE: usize = 16;
    /// Height of a chunk in blocks; chunks span the full world height
    pub const CHUNK_HEIGHT: usize = 32;
    /// Blocks in one horizontal layer of a chunk
    pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;
    /// Total blocks in a chunk (16 * 16 * 32)
    pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_HEIGHT;
    /// Signed chunk width, for world-coordinate arithmetic
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
    /// Signed chunk height, for world-coordinate arithmetic
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const CHUNK_HEIGHT_I32: i32 = CHUNK_HEIGHT as i32;
    /// Default streaming radius around the player, in chunks (Chebyshev distance)
    pub const WORLD_SIZE: i32 = 4;
}
