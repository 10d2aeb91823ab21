//! Chunk mesh data: one quad per exposed block face.
//!
//! Vertex positions are relative to the chunk origin; the render backend
//! places each mesh at `(cx * SIZE, 0, cz * SIZE)`.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};

bitflags! {
    /// Set of block faces, used to report which faces of a block are exposed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Faces: u8 {
        /// +Y
        const TOP    = 0b0000_0001;
        /// -Y
        const BOTTOM = 0b0000_0010;
        /// +Z
        const FRONT  = 0b0000_0100;
        /// -Z
        const BACK   = 0b0000_1000;
        /// +X
        const RIGHT  = 0b0001_0000;
        /// -X
        const LEFT   = 0b0010_0000;
    }
}

/// One of the six axis-aligned faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    Front,
    Back,
    Right,
    Left,
}

impl Face {
    /// Faces in meshing order.
    pub const ALL: [Self; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Front,
        Self::Back,
        Self::Right,
        Self::Left,
    ];

    /// Outward unit normal as integer offset to the neighboring cell.
    #[must_use]
    pub const fn normal(self) -> IVec3 {
        match self {
            Self::Top => IVec3::Y,
            Self::Bottom => IVec3::NEG_Y,
            Self::Front => IVec3::Z,
            Self::Back => IVec3::NEG_Z,
            Self::Right => IVec3::X,
            Self::Left => IVec3::NEG_X,
        }
    }

    /// The matching flag in [`Faces`].
    #[must_use]
    pub const fn flag(self) -> Faces {
        match self {
            Self::Top => Faces::TOP,
            Self::Bottom => Faces::BOTTOM,
            Self::Front => Faces::FRONT,
            Self::Back => Faces::BACK,
            Self::Right => Faces::RIGHT,
            Self::Left => Faces::LEFT,
        }
    }

    /// Quad corners relative to the block's minimum corner.
    ///
    /// Counter-clockwise when viewed from outside, so triangles
    /// `(0, 1, 2)` and `(0, 2, 3)` face along [`Face::normal`].
    #[must_use]
    pub const fn corners(self) -> [[u8; 3]; 4] {
        match self {
            Self::Top => [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]],
            Self::Bottom => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
            Self::Front => [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
            Self::Back => [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
            Self::Right => [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]],
            Self::Left => [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
        }
    }
}

/// Interleaved chunk vertex: position, normal, color (9 floats).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Triangle geometry for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the quad for `face` of the block whose minimum corner is `base`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_face(&mut self, base: Vec3, face: Face, color: [f32; 3]) {
        let first = self.vertices.len() as u32;
        let normal = face.normal().as_vec3().to_array();

        for corner in face.corners() {
            let offset = Vec3::new(
                f32::from(corner[0]),
                f32::from(corner[1]),
                f32::from(corner[2]),
            );
            self.vertices.push(ChunkVertex {
                position: (base + offset).to_array(),
                normal,
                color,
            });
        }

        self.indices.extend_from_slice(&[
            first,
            first + 1,
            first + 2,
            first,
            first + 2,
            first + 3,
        ]);
    }

    /// Number of quads (4 vertices each).
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as a flat `f32` slice (position, normal, color per vertex).
    #[must_use]
    pub fn interleaved(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex data as raw bytes for buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_winding_points_outward() {
        for face in Face::ALL {
            let c = face.corners().map(|[x, y, z]| {
                Vec3::new(f32::from(x), f32::from(y), f32::from(z))
            });
            let winding = (c[1] - c[0]).cross(c[2] - c[0]).normalize();
            assert_eq!(winding, face.normal().as_vec3(), "{face:?}");
        }
    }

    #[test]
    fn push_face_emits_quad() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Vec3::new(2.0, 3.0, 4.0), Face::Top, [1.0, 0.0, 0.0]);
        mesh.push_face(Vec3::ZERO, Face::Left, [0.0, 1.0, 0.0]);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.indices[6..], [4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.vertices[0].position, [2.0, 4.0, 5.0]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn interleaved_layout_is_nine_floats_per_vertex() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(Vec3::ZERO, Face::Back, [0.25, 0.5, 0.75]);

        let floats = mesh.interleaved();
        assert_eq!(floats.len(), 4 * 9);
        assert_eq!(&floats[..9], &[1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.25, 0.5, 0.75]);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 9 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn face_flags_are_distinct() {
        let all = Face::ALL.iter().fold(Faces::empty(), |acc, f| acc | f.flag());
        assert_eq!(all, Faces::all());
    }
}
