//! Loaded chunk set with streaming around the player.

use glam::Vec3;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use voxelwalk_core::constants::{CHUNK_SIZE_I32, WORLD_SIZE};
use voxelwalk_core::{BlockKind, BlockPos, BlockSource, ChunkPos, Error, Result, VoxelGrid};

use crate::chunk::Chunk;
use crate::generation::{TerrainConfig, TerrainGenerator};

/// Largest accepted load radius, in chunks.
pub const MAX_LOAD_RADIUS: i32 = 32;

/// World configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Chebyshev radius, in chunks, kept loaded around the player.
    pub load_radius: i32,
    /// Terrain parameters for newly loaded chunks.
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            load_radius: WORLD_SIZE,
            terrain: TerrainConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Check the configuration before building a world from it.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_LOAD_RADIUS).contains(&self.load_radius) {
            return Err(Error::InvalidConfig(format!(
                "load radius must be in 0..={MAX_LOAD_RADIUS}, got {}",
                self.load_radius
            )));
        }
        self.terrain.validate()
    }
}

/// All loaded chunks plus the generator that fills new ones.
///
/// Chunks are created on demand by [`World::update`] and never unloaded.
/// Every mesh rebuild is recorded so the render side can pick it up with
/// [`World::take_mesh_updates`].
pub struct World {
    chunks: HashMap<ChunkPos, Chunk>,
    generator: TerrainGenerator,
    load_radius: i32,
    mesh_updates: HashSet<ChunkPos>,
}

impl World {
    /// Create an empty world from a validated configuration.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let generator = TerrainGenerator::new(config.terrain);
        Ok(Self::with_generator(generator, config.load_radius))
    }

    /// Create an empty world around an existing generator.
    ///
    /// The radius is clamped to `0..=MAX_LOAD_RADIUS`.
    #[must_use]
    pub fn with_generator(generator: TerrainGenerator, load_radius: i32) -> Self {
        let load_radius = load_radius.clamp(0, MAX_LOAD_RADIUS);
        let side = usize::try_from(2 * load_radius + 1).unwrap_or(1);
        Self {
            chunks: HashMap::with_capacity(side * side),
            generator,
            load_radius,
            mesh_updates: HashSet::new(),
        }
    }

    /// Terrain generator used for new chunks.
    #[must_use]
    pub const fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Chebyshev load radius in chunks.
    #[must_use]
    pub const fn load_radius(&self) -> i32 {
        self.load_radius
    }

    /// Get a loaded chunk.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Check if a chunk is loaded.
    #[must_use]
    pub fn contains_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterate over loaded chunks in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Block at a world position. Unloaded chunks and out-of-range Y read as air.
    #[must_use]
    pub fn get_block(&self, pos: BlockPos) -> BlockKind {
        let (chunk_pos, local) = pos.split();
        self.chunks
            .get(&chunk_pos)
            .map_or(BlockKind::Air, |chunk| chunk.block(local))
    }

    /// Replace a block and rebuild every mesh that can see it.
    ///
    /// Edits to unloaded chunks or out-of-range Y are dropped. The owning
    /// chunk is rebuilt, then any neighbor across the edge the block touches.
    /// Only the four side neighbors are considered: a corner block refreshes
    /// at most two of them.
    pub fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        let (chunk_pos, local) = pos.split();
        let Some(chunk) = self.chunks.get_mut(&chunk_pos) else {
            trace!(?pos, "edit in unloaded chunk dropped");
            return;
        };
        if !chunk.set_block(local, kind) {
            return;
        }
        trace!(?pos, %kind, "block set");

        self.remesh(chunk_pos, true);

        let last = CHUNK_SIZE_I32 - 1;
        if local.x == 0 {
            self.rebuild_chunk_mesh(chunk_pos.offset(-1, 0));
        } else if local.x == last {
            self.rebuild_chunk_mesh(chunk_pos.offset(1, 0));
        }
        if local.z == 0 {
            self.rebuild_chunk_mesh(chunk_pos.offset(0, -1));
        } else if local.z == last {
            self.rebuild_chunk_mesh(chunk_pos.offset(0, 1));
        }
    }

    /// Load every missing chunk within the load radius of `player`.
    ///
    /// Each new chunk is generated and meshed immediately. Returns the number
    /// of chunks created.
    pub fn update(&mut self, player: Vec3) -> usize {
        let center = ChunkPos::from_world(player);
        let missing: Vec<ChunkPos> = center
            .square_around(self.load_radius)
            .filter(|pos| !self.chunks.contains_key(pos))
            .collect();

        let mut created = 0;
        for pos in missing {
            if self.insert_generated_chunk(pos) {
                created += 1;
            }
        }
        if created > 0 {
            debug!(?center, created, total = self.chunks.len(), "chunks loaded");
        }
        created
    }

    /// Generate and mesh the chunk at `pos` if it is not loaded yet.
    ///
    /// Returns `true` if a chunk was created.
    pub fn insert_generated_chunk(&mut self, pos: ChunkPos) -> bool {
        if self.chunks.contains_key(&pos) {
            return false;
        }
        let mut chunk = Chunk::new(pos);
        chunk.generate(&self.generator);
        self.insert_chunk(chunk);
        true
    }

    /// Add a prepared chunk, replacing any chunk at the same position, and mesh it.
    pub(crate) fn insert_chunk(&mut self, mut chunk: Chunk) {
        let pos = chunk.pos();
        chunk.mark_dirty();
        if let Some(mut old) = self.chunks.insert(pos, chunk) {
            old.dispose();
        }
        self.remesh(pos, false);
    }

    /// Force a mesh rebuild of a loaded chunk. Unloaded positions are ignored.
    pub fn rebuild_chunk_mesh(&mut self, pos: ChunkPos) {
        self.remesh(pos, true);
    }

    fn remesh(&mut self, pos: ChunkPos, force: bool) {
        let Some(chunk) = self.chunks.get(&pos) else {
            return;
        };
        if !force && !chunk.is_dirty() {
            return;
        }
        let mesh = chunk.build_mesh(&*self);
        trace!(?pos, quads = mesh.quad_count(), "chunk meshed");

        if let Some(chunk) = self.chunks.get_mut(&pos) {
            chunk.install_mesh(mesh);
            self.mesh_updates.insert(pos);
        }
    }

    /// Chunks whose mesh changed since the last call, sorted by `(x, z)`.
    pub fn take_mesh_updates(&mut self) -> Vec<ChunkPos> {
        let mut updates: Vec<ChunkPos> = self.mesh_updates.drain().collect();
        updates.sort_unstable();
        updates
    }

    /// Whether any mesh changed since the last [`World::take_mesh_updates`].
    #[must_use]
    pub fn has_mesh_updates(&self) -> bool {
        !self.mesh_updates.is_empty()
    }

    /// Release every chunk mesh and drop all chunks.
    ///
    /// Returns the positions whose meshes were released, sorted.
    pub fn dispose(&mut self) -> Vec<ChunkPos> {
        let mut released: Vec<ChunkPos> = self
            .chunks
            .iter_mut()
            .filter_map(|(pos, chunk)| chunk.dispose().then_some(*pos))
            .collect();
        released.sort_unstable();
        self.chunks.clear();
        self.mesh_updates.clear();
        debug!(released = released.len(), "world disposed");
        released
    }
}

impl BlockSource for World {
    fn block_at(&self, pos: BlockPos) -> BlockKind {
        self.get_block(pos)
    }
}

impl VoxelGrid for World {
    fn set_block_at(&mut self, pos: BlockPos, kind: BlockKind) {
        self.set_block(pos, kind);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("chunks", &self.chunks.len())
            .field("load_radius", &self.load_radius)
            .field("pending_mesh_updates", &self.mesh_updates.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_world(radius: i32) -> World {
        let generator =
            TerrainGenerator::with_noise(TerrainConfig::default(), |_: f64, _: f64| -1.0);
        World::with_generator(generator, radius)
    }

    #[test]
    fn config_rejects_negative_radius() {
        let config = WorldConfig {
            load_radius: -1,
            ..WorldConfig::default()
        };
        assert!(World::new(config).is_err());
        assert!(World::new(WorldConfig::default()).is_ok());
    }

    #[test]
    fn config_rejects_oversized_radius() {
        for load_radius in [MAX_LOAD_RADIUS + 1, i32::MAX] {
            let config = WorldConfig {
                load_radius,
                ..WorldConfig::default()
            };
            assert!(matches!(World::new(config), Err(Error::InvalidConfig(_))));
        }
        let edge = WorldConfig {
            load_radius: MAX_LOAD_RADIUS,
            ..WorldConfig::default()
        };
        assert!(World::new(edge).is_ok());
    }

    #[test]
    fn with_generator_clamps_radius() {
        assert_eq!(flat_world(i32::MAX).load_radius(), MAX_LOAD_RADIUS);
        assert_eq!(flat_world(i32::MIN).load_radius(), 0);
    }

    #[test]
    fn block_edits_log_at_trace() {
        use std::sync::{Arc, Mutex};
        use tracing::{Event, Level, Subscriber};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Clone, Default)]
        struct Levels(Arc<Mutex<Vec<Level>>>);

        impl<S: Subscriber> Layer<S> for Levels {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                self.0.lock().unwrap().push(*event.metadata().level());
            }
        }

        let mut world = flat_world(0);
        world.update(Vec3::ZERO);

        let levels = Levels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        tracing::subscriber::with_default(subscriber, || {
            world.set_block(BlockPos::new(5, 10, 5), BlockKind::Stone);
        });

        let seen = levels.0.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|level| *level == Level::TRACE));
    }

    #[test]
    fn unloaded_reads_are_air_and_writes_dropped() {
        let mut world = flat_world(0);
        let pos = BlockPos::new(100, 2, 100);
        assert_eq!(world.get_block(pos), BlockKind::Air);
        world.set_block(pos, BlockKind::Stone);
        assert_eq!(world.get_block(pos), BlockKind::Air);
        assert_eq!(world.chunk_count(), 0);
        assert!(!world.has_mesh_updates());
    }

    #[test]
    fn update_loads_square_once() {
        let mut world = flat_world(1);
        assert_eq!(world.update(Vec3::new(0.5, 20.0, 0.5)), 9);
        assert_eq!(world.update(Vec3::new(0.5, 20.0, 0.5)), 0);
        assert_eq!(world.chunk_count(), 9);
        assert!(world.chunks().all(|c| c.mesh().is_some() && !c.is_dirty()));
    }

    #[test]
    fn update_never_unloads() {
        let mut world = flat_world(0);
        world.update(Vec3::new(0.0, 10.0, 0.0));
        world.update(Vec3::new(100.0, 10.0, 100.0));
        assert!(world.contains_chunk(ChunkPos::new(0, 0)));
        assert!(world.contains_chunk(ChunkPos::new(6, 6)));
        assert_eq!(world.chunk_count(), 2);
    }

    #[test]
    fn set_and_get_across_negative_coordinates() {
        let mut world = flat_world(1);
        world.update(Vec3::ZERO);
        world.take_mesh_updates();

        let pos = BlockPos::new(-3, 12, -7);
        world.set_block(pos, BlockKind::Wood);
        assert_eq!(world.get_block(pos), BlockKind::Wood);
        assert_eq!(world.take_mesh_updates(), vec![ChunkPos::new(-1, -1)]);
    }

    #[test]
    fn out_of_range_y_edit_is_ignored() {
        let mut world = flat_world(0);
        world.update(Vec3::ZERO);
        world.take_mesh_updates();

        world.set_block(BlockPos::new(1, 32, 1), BlockKind::Stone);
        world.set_block(BlockPos::new(1, -1, 1), BlockKind::Stone);
        assert!(!world.has_mesh_updates());
    }

    #[test]
    fn dispose_releases_every_mesh() {
        let mut world = flat_world(1);
        world.update(Vec3::ZERO);
        let released = world.dispose();
        assert_eq!(released.len(), 9);
        assert_eq!(world.chunk_count(), 0);
        assert!(world.dispose().is_empty());
    }
}
