//! Chunked voxel world: terrain generation, meshing, and chunk streaming.

pub mod chunk;
pub mod generation;
pub mod mesh;
pub mod world;

pub use chunk::Chunk;
pub use generation::{NoiseSource, SimplexNoise, TerrainConfig, TerrainGenerator};
pub use mesh::{ChunkMesh, ChunkVertex, Face, Faces};
pub use world::{MAX_LOAD_RADIUS, World, WorldConfig};

/// World seed for procedural generation.
pub type WorldSeed = u64;
