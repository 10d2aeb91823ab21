//! World-level meshing and editing behavior.

use approx::assert_relative_eq;
use glam::Vec3;
use voxelwalk_core::{BlockKind, BlockPos, ChunkPos, LocalPos};
use voxelwalk_world::{Chunk, Faces, TerrainConfig, TerrainGenerator, World, WorldConfig};

/// Every column is 5 blocks tall: grass at y = 4.
fn flat_world(radius: i32) -> World {
    let generator = TerrainGenerator::with_noise(TerrainConfig::default(), |_: f64, _: f64| -1.0);
    World::with_generator(generator, radius)
}

fn quads(world: &World, pos: ChunkPos) -> usize {
    world
        .chunk(pos)
        .and_then(Chunk::mesh)
        .map_or(0, |mesh| mesh.quad_count())
}

/// Radius-1 flat world with every mesh rebuilt after all nine chunks exist.
fn floating_world() -> World {
    let mut world = flat_world(1);
    world.update(Vec3::ZERO);
    for x in -1..=1 {
        for z in -1..=1 {
            world.rebuild_chunk_mesh(ChunkPos::new(x, z));
        }
    }
    world.take_mesh_updates();
    world
}

#[test]
fn initial_load_is_eighty_one_chunks() {
    let mut world = flat_world(4);
    assert_eq!(world.update(Vec3::new(0.0, 25.0, 0.0)), 81);
    assert_eq!(world.chunk_count(), 81);

    let updates = world.take_mesh_updates();
    assert_eq!(updates.len(), 81);
    assert_eq!(updates.first(), Some(&ChunkPos::new(-4, -4)));
    assert_eq!(updates.last(), Some(&ChunkPos::new(4, 4)));
    assert!(world.take_mesh_updates().is_empty());
}

#[test]
fn mesh_updates_are_sorted_and_deduplicated() {
    let mut world = flat_world(1);
    world.update(Vec3::ZERO);
    world.take_mesh_updates();

    world.set_block(BlockPos::new(3, 10, 3), BlockKind::Stone);
    world.set_block(BlockPos::new(4, 10, 3), BlockKind::Stone);
    world.set_block(BlockPos::new(-1, 10, 3), BlockKind::Stone);
    assert_eq!(
        world.take_mesh_updates(),
        vec![ChunkPos::new(-1, 0), ChunkPos::new(0, 0)]
    );
}

#[test]
fn block_across_chunk_border_hides_face() {
    let mut world = floating_world();
    let left = ChunkPos::new(0, 0);
    let right = ChunkPos::new(1, 0);
    let before_left = quads(&world, left);
    let before_right = quads(&world, right);

    world.set_block(BlockPos::new(15, 10, 5), BlockKind::Stone);
    assert_eq!(quads(&world, left), before_left + 6);
    assert_eq!(quads(&world, right), before_right);

    world.take_mesh_updates();
    world.set_block(BlockPos::new(16, 10, 5), BlockKind::Stone);
    assert_eq!(quads(&world, left), before_left + 5);
    assert_eq!(quads(&world, right), before_right + 5);
    assert_eq!(world.take_mesh_updates(), vec![left, right]);

    let left_faces = world
        .chunk(left)
        .map(|chunk| chunk.visible_faces(LocalPos::new(15, 10, 5), &world))
        .unwrap_or_default();
    assert!(!left_faces.contains(Faces::RIGHT));
    assert!(left_faces.contains(Faces::LEFT));

    let right_faces = world
        .chunk(right)
        .map(|chunk| chunk.visible_faces(LocalPos::new(0, 10, 5), &world))
        .unwrap_or_default();
    assert!(!right_faces.contains(Faces::LEFT));
    assert!(right_faces.contains(Faces::RIGHT));
}

#[test]
fn removing_border_block_restores_neighbor_face() {
    let mut world = floating_world();
    world.set_block(BlockPos::new(15, 10, 5), BlockKind::Stone);
    world.set_block(BlockPos::new(16, 10, 5), BlockKind::Stone);
    let right = ChunkPos::new(1, 0);
    let with_pair = quads(&world, right);

    world.set_block(BlockPos::new(15, 10, 5), BlockKind::Air);
    assert_eq!(quads(&world, right), with_pair + 1);
}

#[test]
fn edit_at_chunk_corner_rebuilds_two_side_neighbors() {
    let mut world = floating_world();
    world.take_mesh_updates();

    world.set_block(BlockPos::new(15, 10, 15), BlockKind::Stone);
    assert_eq!(
        world.take_mesh_updates(),
        vec![ChunkPos::new(0, 0), ChunkPos::new(0, 1), ChunkPos::new(1, 0)]
    );
}

#[test]
fn diagonal_neighbor_is_not_rebuilt() {
    let mut world = floating_world();
    world.take_mesh_updates();

    world.set_block(BlockPos::new(0, 10, 0), BlockKind::Stone);
    let updates = world.take_mesh_updates();
    assert!(!updates.contains(&ChunkPos::new(-1, -1)));
    assert_eq!(
        updates,
        vec![ChunkPos::new(-1, 0), ChunkPos::new(0, -1), ChunkPos::new(0, 0)]
    );
}

#[test]
fn dig_into_terrain_exposes_walls() {
    let mut world = flat_world(0);
    world.update(Vec3::ZERO);
    let origin = ChunkPos::new(0, 0);
    let before = quads(&world, origin);

    // Removing a surface block opens four side faces and the block below's top,
    // and loses the removed top face.
    world.set_block(BlockPos::new(8, 4, 8), BlockKind::Air);
    assert_eq!(quads(&world, origin), before + 4);
}

#[test]
fn every_chunk_in_default_radius_has_geometry() {
    for seed in [0, 2024] {
        let config = WorldConfig {
            terrain: TerrainConfig::default().with_seed(seed),
            ..WorldConfig::default()
        };
        let mut world = World::new(config).expect("default config is valid");
        assert_eq!(world.update(Vec3::ZERO), 81);
        assert_eq!(world.chunk_count(), 81);
        for chunk in world.chunks() {
            let quads = chunk.mesh().map_or(0, |mesh| mesh.quad_count());
            assert!(quads > 0, "chunk {:?} has no geometry", chunk.pos());
        }
    }
}

#[test]
fn generated_world_matches_generator() {
    let mut world = World::with_generator(TerrainGenerator::with_seed(2024), 1);
    world.update(Vec3::ZERO);
    let generator = TerrainGenerator::with_seed(2024);

    for (x, z) in [(-16, -16), (0, 0), (31, 5), (-7, 20)] {
        let height = generator.column_height(x, z);
        assert_eq!(world.get_block(BlockPos::new(x, height - 1, z)), BlockKind::Grass);
        assert_eq!(world.get_block(BlockPos::new(x, height, z)), BlockKind::Air);
    }
}

#[test]
fn mesh_normals_are_unit_axes() {
    let mut world = flat_world(0);
    world.update(Vec3::ZERO);
    let mesh = world.chunk(ChunkPos::new(0, 0)).and_then(Chunk::mesh);
    for vertex in mesh.into_iter().flat_map(|m| m.vertices.iter()) {
        let length = Vec3::from_array(vertex.normal).length();
        assert_relative_eq!(length, 1.0);
    }
}
