//! Chunk data structure: a dense column of blocks plus its mesh.

use glam::Vec3;
use voxelwalk_core::constants::{CHUNK_HEIGHT_I32, CHUNK_SIZE_I32, CHUNK_VOLUME};
use voxelwalk_core::{BlockKind, BlockPos, BlockSource, ChunkPos, LocalPos};

use crate::generation::TerrainGenerator;
use crate::mesh::{ChunkMesh, Face, Faces};

/// A `16 x 32 x 16` column of blocks.
///
/// Lifecycle: created empty, filled once by [`Chunk::generate`], meshed on the
/// first [`Chunk::update_mesh`] and re-meshed whenever an edit marks it dirty.
/// Local accessors treat out-of-range coordinates as air and ignore writes to them.
pub struct Chunk {
    /// Position in chunk coordinates.
    pos: ChunkPos,
    /// Blocks in `x + z * SIZE + y * SIZE²` order.
    blocks: Box<[BlockKind]>,
    /// Mesh from the last rebuild, if any.
    mesh: Option<ChunkMesh>,
    /// Whether the mesh is stale relative to the blocks.
    dirty: bool,
}

impl Chunk {
    /// Create a new empty (all air) chunk at the given position.
    #[must_use]
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: vec![BlockKind::Air; CHUNK_VOLUME].into_boxed_slice(),
            mesh: None,
            dirty: true,
        }
    }

    /// Position in chunk coordinates.
    #[must_use]
    pub const fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Block at a local position; air when out of range.
    #[inline]
    #[must_use]
    pub fn block(&self, local: LocalPos) -> BlockKind {
        local
            .to_index()
            .map_or(BlockKind::Air, |index| self.blocks[index])
    }

    /// Block at local `(x, y, z)`; air when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockKind {
        self.block(LocalPos::new(x, y, z))
    }

    /// Store a block and mark the mesh stale. Out-of-range writes are ignored.
    ///
    /// Returns `true` if the position was inside the chunk.
    pub fn set_block(&mut self, local: LocalPos, kind: BlockKind) -> bool {
        let Some(index) = local.to_index() else {
            return false;
        };
        self.blocks[index] = kind;
        self.dirty = true;
        true
    }

    /// Store a block at local `(x, y, z)`.
    pub fn set(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) -> bool {
        self.set_block(LocalPos::new(x, y, z), kind)
    }

    /// Fill the chunk from terrain noise.
    ///
    /// Only adds blocks: cells the terrain leaves empty are not cleared, so this
    /// must run once per chunk, before any edits.
    pub fn generate(&mut self, generator: &TerrainGenerator) {
        let origin = self.pos.origin();
        for z in 0..CHUNK_SIZE_I32 {
            for x in 0..CHUNK_SIZE_I32 {
                let height = generator.column_height(origin.x + x, origin.z + z);
                for y in 0..CHUNK_HEIGHT_I32 {
                    let kind = generator.block_for(y, height);
                    if kind.is_solid() {
                        self.set(x, y, z, kind);
                    }
                }
            }
        }
        self.dirty = true;
    }

    /// World position of a local position in this chunk.
    #[inline]
    #[must_use]
    pub const fn world_pos(&self, local: LocalPos) -> BlockPos {
        BlockPos::from_chunk_local(self.pos, local)
    }

    /// Block next to `local` in direction `face`, reading across the chunk
    /// border through `neighbors` when needed.
    fn neighbor<S: BlockSource + ?Sized>(&self, local: LocalPos, face: Face, neighbors: &S) -> BlockKind {
        let n = face.normal();
        let next = local.offset(n.x, n.y, n.z);
        match next.to_index() {
            Some(index) => self.blocks[index],
            None => neighbors.block_at(self.world_pos(next)),
        }
    }

    /// Faces of the block at `local` that border air.
    ///
    /// Air cells have no visible faces.
    #[must_use]
    pub fn visible_faces<S: BlockSource + ?Sized>(&self, local: LocalPos, neighbors: &S) -> Faces {
        if self.block(local).is_air() {
            return Faces::empty();
        }
        Face::ALL
            .into_iter()
            .filter(|&face| self.neighbor(local, face, neighbors).is_air())
            .fold(Faces::empty(), |acc, face| acc | face.flag())
    }

    /// Build the mesh for the current blocks without touching chunk state.
    ///
    /// `neighbors` answers for cells outside this chunk; a border with no
    /// loaded neighbor reads as air and gets a face.
    #[must_use]
    pub fn build_mesh<S: BlockSource + ?Sized>(&self, neighbors: &S) -> ChunkMesh {
        let mut mesh = ChunkMesh::new();
        for (index, &kind) in self.blocks.iter().enumerate() {
            if kind.is_air() {
                continue;
            }
            let local = LocalPos::from_index(index);
            let faces = self.visible_faces(local, neighbors);
            if faces.is_empty() {
                continue;
            }
            let base = Vec3::new(local.x as f32, local.y as f32, local.z as f32);
            let color = kind.color_rgb();
            for face in Face::ALL {
                if faces.contains(face.flag()) {
                    mesh.push_face(base, face, color);
                }
            }
        }
        mesh
    }

    /// Rebuild the mesh if the chunk is dirty.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn update_mesh<S: BlockSource + ?Sized>(&mut self, neighbors: &S) -> bool {
        if !self.dirty {
            return false;
        }
        let mesh = self.build_mesh(neighbors);
        self.install_mesh(mesh);
        true
    }

    /// Replace the mesh, releasing the previous one first, and clear the dirty flag.
    pub fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.dispose();
        self.mesh = Some(mesh);
        self.dirty = false;
    }

    /// Release the mesh. Safe to call repeatedly.
    ///
    /// Returns `true` if a mesh was released.
    pub fn dispose(&mut self) -> bool {
        self.mesh.take().is_some()
    }

    /// Current mesh, if one has been built.
    #[must_use]
    pub const fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Whether the mesh is stale.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next [`Chunk::update_mesh`] to rebuild.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Number of non-air blocks.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|kind| kind.is_solid()).count()
    }

    /// Check if this chunk is empty (all air).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|kind| kind.is_air())
    }

    /// Raw block storage, in index order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockKind] {
        &self.blocks
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("pos", &self.pos)
            .field("solid", &self.solid_count())
            .field("quads", &self.mesh.as_ref().map(ChunkMesh::quad_count))
            .field("dirty", &self.dirty)
            .finish()
    }
}
