//! Render backend boundary.
//!
//! The game core produces chunk meshes and a camera; turning them into
//! pixels is the backend's job. [`MemoryBackend`] keeps the buffers in
//! memory and is used for headless runs and tests.

use glam::Vec3;
use hashbrown::HashMap;
use tracing::trace;
use voxelwalk_core::{ChunkPos, Result};
use voxelwalk_world::ChunkMesh;

use crate::camera::Camera;
use crate::scene::SceneSettings;

/// Everything a backend needs to draw one frame besides the chunk buffers.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub scene: &'a SceneSettings,
    pub frame_number: u64,
}

/// Consumer of chunk geometry.
pub trait RenderBackend {
    /// Store a chunk's geometry at `origin`, replacing any previous buffers for `pos`.
    fn upload_chunk(&mut self, pos: ChunkPos, origin: Vec3, mesh: &ChunkMesh) -> Result<()>;

    /// Release a chunk's buffers. Unknown positions are ignored.
    fn dispose_chunk(&mut self, pos: ChunkPos);

    /// Draw every uploaded chunk.
    fn render(&mut self, frame: &FrameView<'_>) -> Result<()>;
}

/// One chunk's buffers as a backend would hold them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBuffers {
    /// World position of the chunk's minimum corner.
    pub origin: Vec3,
    /// Interleaved position, normal, color; nine floats per vertex.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl ChunkBuffers {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Backend that keeps buffers in host memory and counts calls.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    chunks: HashMap<ChunkPos, ChunkBuffers>,
    uploads: u64,
    renders: u64,
    last_frame: Option<u64>,
    last_triangles: usize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&ChunkBuffers> {
        self.chunks.get(&pos)
    }

    /// Number of chunks with live buffers.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total uploads, including replacements.
    #[must_use]
    pub const fn upload_count(&self) -> u64 {
        self.uploads
    }

    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.renders
    }

    /// Frame number of the most recent render.
    #[must_use]
    pub const fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    /// Triangles drawn by the most recent render.
    #[must_use]
    pub const fn last_triangle_count(&self) -> usize {
        self.last_triangles
    }
}

impl RenderBackend for MemoryBackend {
    fn upload_chunk(&mut self, pos: ChunkPos, origin: Vec3, mesh: &ChunkMesh) -> Result<()> {
        let buffers = ChunkBuffers {
            origin,
            vertices: mesh.interleaved().to_vec(),
            indices: mesh.indices.clone(),
        };
        trace!(?pos, triangles = buffers.triangle_count(), "chunk uploaded");
        self.chunks.insert(pos, buffers);
        self.uploads += 1;
        Ok(())
    }

    fn dispose_chunk(&mut self, pos: ChunkPos) {
        self.chunks.remove(&pos);
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<()> {
        self.last_triangles = self.chunks.values().map(ChunkBuffers::triangle_count).sum();
        self.last_frame = Some(frame.frame_number);
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelwalk_world::Face;

    fn quad_mesh() -> ChunkMesh {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Vec3::ZERO, Face::Top, [1.0, 1.0, 1.0]);
        mesh
    }

    #[test]
    fn upload_replaces_in_place() {
        let mut backend = MemoryBackend::new();
        let pos = ChunkPos::new(2, -1);
        backend.upload_chunk(pos, Vec3::new(32.0, 0.0, -16.0), &quad_mesh()).unwrap();
        backend.upload_chunk(pos, Vec3::new(32.0, 0.0, -16.0), &ChunkMesh::new()).unwrap();

        assert_eq!(backend.chunk_count(), 1);
        assert_eq!(backend.upload_count(), 2);
        let buffers = backend.chunk(pos).unwrap();
        assert_eq!(buffers.vertex_count(), 0);
        assert_eq!(buffers.origin, Vec3::new(32.0, 0.0, -16.0));
    }

    #[test]
    fn dispose_and_render() {
        let mut backend = MemoryBackend::new();
        backend.upload_chunk(ChunkPos::new(0, 0), Vec3::ZERO, &quad_mesh()).unwrap();
        backend.upload_chunk(ChunkPos::new(1, 0), Vec3::X * 16.0, &quad_mesh()).unwrap();
        backend.dispose_chunk(ChunkPos::new(1, 0));
        backend.dispose_chunk(ChunkPos::new(9, 9));

        let camera = Camera::default();
        let scene = SceneSettings::default();
        backend
            .render(&FrameView {
                camera: &camera,
                scene: &scene,
                frame_number: 7,
            })
            .unwrap();
        assert_eq!(backend.render_count(), 1);
        assert_eq!(backend.last_frame(), Some(7));
        assert_eq!(backend.last_triangle_count(), 2);
    }
}
