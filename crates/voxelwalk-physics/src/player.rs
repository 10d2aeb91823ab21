//! First-person player controller.
//!
//! Movement is velocity-based with no inertia: horizontal velocity is set
//! from input every update, gravity accumulates on the vertical axis, and
//! collision is resolved against the voxel grid one axis at a time.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, IVec3, Quat, Vec2, Vec3};
use tracing::{debug, trace};
use voxelwalk_core::math::{Aabb, Ray};
use voxelwalk_core::{BlockKind, BlockPos, BlockSource, VoxelGrid};

use crate::config::PlayerConfig;
use crate::raycast::raycast;

/// Input snapshot for one player update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Slow movement modifier.
    pub walk: bool,
    /// Pointer motion since the last update, in pixels.
    pub look_delta: Vec2,
}

/// Collision axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Blocks the player is pointing at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionTarget {
    /// Solid block under the crosshair.
    pub remove: BlockPos,
    /// Empty cell in front of the hit face.
    pub place: BlockPos,
    /// Distance from the eye to the hit point.
    pub distance: f32,
    /// Normal of the hit face.
    pub normal: IVec3,
}

/// The player: a capsule-free AABB body with a free-look camera.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    /// Feet position.
    pub position: Vec3,
    pub velocity: Vec3,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
    selected: BlockKind,
}

impl Player {
    /// Create a player standing at the configured spawn point.
    #[must_use]
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            position: config.spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: false,
            selected: BlockKind::Stone,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Advance the player by `dt` seconds.
    pub fn update<S: BlockSource + ?Sized>(&mut self, dt: f32, input: &PlayerInput, grid: &S) {
        self.look(input.look_delta);

        let forward = self.forward_flat();
        let right = self.right_flat();
        let mut intent = Vec3::ZERO;
        if input.forward {
            intent += forward;
        }
        if input.back {
            intent -= forward;
        }
        if input.right {
            intent += right;
        }
        if input.left {
            intent -= right;
        }
        let intent = intent.normalize_or_zero();

        let speed = if input.walk {
            self.config.speed * self.config.walk_multiplier
        } else {
            self.config.speed
        };
        self.velocity.x = intent.x * speed;
        self.velocity.z = intent.z * speed;

        if self.on_ground && input.jump {
            self.velocity.y = self.config.jump_force;
            self.on_ground = false;
        }
        self.velocity.y -= self.config.gravity * dt;

        self.move_by(dt, grid);

        if self.position.y < self.config.death_plane {
            debug!(fell_to = self.position.y, "player respawned");
            self.respawn();
        }
    }

    /// Integrate velocity over `dt` in equal sub-steps, resolving X, then Z, then Y.
    #[allow(clippy::cast_precision_loss)]
    pub fn move_by<S: BlockSource + ?Sized>(&mut self, dt: f32, grid: &S) {
        let steps = self.config.substeps.max(1);
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.position.x += self.velocity.x * h;
            self.resolve_collision(Axis::X, grid);
            self.position.z += self.velocity.z * h;
            self.resolve_collision(Axis::Z, grid);
            self.position.y += self.velocity.y * h;
            self.resolve_collision(Axis::Y, grid);
        }
    }

    /// Push the body out of the first solid cell it overlaps along `axis`.
    ///
    /// Cells are scanned in ascending x, then y, then z. Only the first hit
    /// is resolved.
    pub fn resolve_collision<S: BlockSource + ?Sized>(&mut self, axis: Axis, grid: &S) {
        let (min, max) = self.bounding_box().block_range();
        let eps = self.config.collision_epsilon;
        let r = self.config.radius;

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let cell = BlockPos::new(x, y, z);
                    if !grid.is_solid_at(cell) {
                        continue;
                    }
                    let block = cell.to_vec3();
                    match axis {
                        Axis::X => {
                            self.position.x = if self.velocity.x > 0.0 {
                                block.x - r - eps
                            } else {
                                block.x + 1.0 + r + eps
                            };
                            self.velocity.x = 0.0;
                        }
                        Axis::Z => {
                            self.position.z = if self.velocity.z > 0.0 {
                                block.z - r - eps
                            } else {
                                block.z + 1.0 + r + eps
                            };
                            self.velocity.z = 0.0;
                        }
                        Axis::Y => {
                            if self.velocity.y < 0.0 {
                                self.position.y = block.y + 1.0;
                                self.on_ground = true;
                            } else {
                                self.position.y = block.y - self.config.height - eps;
                            }
                            self.velocity.y = 0.0;
                        }
                    }
                    return;
                }
            }
        }

        if axis == Axis::Y && self.velocity.y < 0.0 {
            self.on_ground = false;
        }
    }

    /// Apply pointer motion to the view angles.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.config.mouse_sensitivity;
        self.pitch -= delta.y * self.config.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Teleport to the respawn point and stop.
    pub fn respawn(&mut self) {
        self.position = self.config.respawn;
        self.velocity = Vec3::ZERO;
        self.on_ground = false;
    }

    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set both view angles; pitch is clamped to straight up/down.
    pub fn set_view(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// View orientation: yaw about world Y, then pitch.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Horizontal forward direction. Depends on yaw only, so looking
    /// straight up or down still walks forward.
    #[must_use]
    pub fn forward_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Horizontal right direction.
    #[must_use]
    pub fn right_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }

    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.config.eye_height
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_feet(self.position, self.config.radius, self.config.height)
    }

    #[must_use]
    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Block kind used by [`Player::place_block`].
    #[must_use]
    pub const fn selected_block(&self) -> BlockKind {
        self.selected
    }

    pub fn select_block(&mut self, kind: BlockKind) {
        self.selected = kind;
    }

    /// The block under the crosshair and the cell in front of it.
    ///
    /// The hit point lies on a face boundary, so it is nudged half a block
    /// along the face normal in each direction before flooring.
    #[must_use]
    pub fn interaction_target<S: BlockSource + ?Sized>(&self, grid: &S) -> Option<InteractionTarget> {
        let ray = Ray::new(self.eye_position(), self.view_direction());
        let hit = raycast(grid, &ray, self.config.pick_distance)?;
        let half = hit.normal.as_vec3() * 0.5;
        Some(InteractionTarget {
            remove: BlockPos::from_vec3(hit.position - half),
            place: BlockPos::from_vec3(hit.position + half),
            distance: hit.distance,
            normal: hit.normal,
        })
    }

    /// Whether a block at `pos` would intersect the player's body.
    #[must_use]
    pub fn blocks_placement(&self, pos: BlockPos) -> bool {
        let body = self.position + Vec3::Y * (self.config.height * 0.5);
        let offset = (pos.center() - body).abs();
        offset.cmplt(self.config.placement_clearance).all()
    }

    /// Replace the targeted block with air. Returns the cleared cell.
    pub fn remove_block<G: VoxelGrid + ?Sized>(&self, grid: &mut G) -> Option<BlockPos> {
        let target = self.reachable_target(&*grid)?;
        grid.set_block_at(target.remove, BlockKind::Air);
        trace!(pos = ?target.remove, "block removed");
        Some(target.remove)
    }

    /// Put the selected block in front of the targeted face. Returns the filled cell.
    pub fn place_block<G: VoxelGrid + ?Sized>(&self, grid: &mut G) -> Option<BlockPos> {
        let target = self.reachable_target(&*grid)?;
        if self.blocks_placement(target.place) {
            trace!(pos = ?target.place, "placement inside player refused");
            return None;
        }
        grid.set_block_at(target.place, self.selected);
        trace!(pos = ?target.place, kind = %self.selected, "block placed");
        Some(target.place)
    }

    fn reachable_target<S: BlockSource + ?Sized>(&self, grid: &S) -> Option<InteractionTarget> {
        self.interaction_target(grid)
            .filter(|target| target.distance < self.config.reach)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use hashbrown::HashMap;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct TestGrid {
        blocks: HashMap<BlockPos, BlockKind>,
    }

    impl TestGrid {
        /// Stone floor with its top face at `top`, covering `-r..=r` in x and z.
        fn floor(top: i32, r: i32) -> Self {
            let mut grid = Self::default();
            for x in -r..=r {
                for z in -r..=r {
                    grid.set_block_at(BlockPos::new(x, top - 1, z), BlockKind::Stone);
                }
            }
            grid
        }
    }

    impl BlockSource for TestGrid {
        fn block_at(&self, pos: BlockPos) -> BlockKind {
            self.blocks.get(&pos).copied().unwrap_or_default()
        }
    }

    impl VoxelGrid for TestGrid {
        fn set_block_at(&mut self, pos: BlockPos, kind: BlockKind) {
            if kind.is_air() {
                self.blocks.remove(&pos);
            } else {
                self.blocks.insert(pos, kind);
            }
        }
    }

    fn player_at(position: Vec3) -> Player {
        Player::new(PlayerConfig::default().with_spawn(position))
    }

    #[test]
    fn landing_snaps_to_block_top() {
        let mut grid = TestGrid::default();
        grid.set_block_at(BlockPos::new(0, 0, 0), BlockKind::Stone);

        let mut player = player_at(Vec3::new(0.5, 0.9, 0.5));
        player.velocity.y = -1.0;
        player.resolve_collision(Axis::Y, &grid);

        assert_eq!(player.position.y, 1.0);
        assert_eq!(player.velocity.y, 0.0);
        assert!(player.on_ground());
    }

    #[test]
    fn falls_and_rests_on_floor() {
        let grid = TestGrid::floor(1, 3);
        let mut player = player_at(Vec3::new(0.5, 4.0, 0.5));

        for _ in 0..120 {
            player.update(DT, &PlayerInput::default(), &grid);
        }
        assert_relative_eq!(player.position.y, 1.0);
        assert!(player.on_ground());
    }

    #[test]
    fn leaving_ground_clears_flag() {
        let grid = TestGrid::floor(1, 0);
        let mut player = player_at(Vec3::new(0.5, 1.0, 0.5));
        player.update(DT, &PlayerInput::default(), &grid);
        assert!(player.on_ground());

        player.position = Vec3::new(10.5, 1.0, 0.5);
        player.update(DT, &PlayerInput::default(), &grid);
        assert!(!player.on_ground());
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let mut grid = TestGrid::floor(1, 4);
        for y in 1..3 {
            for z in -4..=4 {
                grid.set_block_at(BlockPos::new(2, y, z), BlockKind::Stone);
            }
        }
        let mut player = player_at(Vec3::new(0.5, 1.0, 0.5));
        let input = PlayerInput {
            right: true,
            ..PlayerInput::default()
        };

        for _ in 0..60 {
            player.update(DT, &input, &grid);
        }
        assert_abs_diff_eq!(player.position.x, 2.0 - 0.3 - 0.001, epsilon = 1e-4);
        assert_abs_diff_eq!(player.position.z, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn jump_leaves_ground() {
        let grid = TestGrid::floor(1, 2);
        let mut player = player_at(Vec3::new(0.5, 1.0, 0.5));
        player.update(DT, &PlayerInput::default(), &grid);
        assert!(player.on_ground());

        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::default()
        };
        player.update(DT, &jump, &grid);
        assert!(!player.on_ground());
        assert!(player.position.y > 1.0);
        assert!(player.velocity.y > 0.0);
    }

    #[test]
    fn head_hits_ceiling() {
        let mut grid = TestGrid::floor(1, 2);
        grid.set_block_at(BlockPos::new(0, 3, 0), BlockKind::Stone);
        let mut player = player_at(Vec3::new(0.5, 1.0, 0.5));
        player.update(DT, &PlayerInput::default(), &grid);

        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::default()
        };
        let mut highest = player.position.y;
        for _ in 0..30 {
            player.update(DT, &jump, &grid);
            highest = highest.max(player.position.y);
        }
        assert!(highest <= 3.0 - 1.7);
    }

    #[test]
    fn falling_out_of_world_respawns() {
        let mut player = player_at(Vec3::new(3.0, -29.99, 3.0));
        player.velocity.y = -10.0;
        player.update(0.1, &PlayerInput::default(), &TestGrid::default());

        assert_eq!(player.position, Vec3::new(0.0, 30.0, 0.0));
        assert_eq!(player.velocity, Vec3::ZERO);
    }

    #[test]
    fn walk_halves_speed_and_diagonals_keep_top_speed() {
        let grid = TestGrid::default();
        let mut player = player_at(Vec3::new(0.0, 10.0, 0.0));

        let forward = PlayerInput {
            forward: true,
            ..PlayerInput::default()
        };
        player.update(DT, &forward, &grid);
        assert_relative_eq!(player.velocity.z, -5.0);
        assert_abs_diff_eq!(player.velocity.x, 0.0);

        let walking = PlayerInput {
            walk: true,
            ..forward
        };
        player.update(DT, &walking, &grid);
        assert_relative_eq!(player.velocity.z, -2.5);

        let diagonal = PlayerInput {
            forward: true,
            right: true,
            ..PlayerInput::default()
        };
        player.update(DT, &diagonal, &grid);
        let horizontal = Vec2::new(player.velocity.x, player.velocity.z);
        assert_relative_eq!(horizontal.length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn look_clamps_pitch() {
        let mut player = Player::default();
        player.look(Vec2::new(0.0, -10_000.0));
        assert_relative_eq!(player.pitch(), FRAC_PI_2);
        player.look(Vec2::new(0.0, 20_000.0));
        assert_relative_eq!(player.pitch(), -FRAC_PI_2);

        player.look(Vec2::new(100.0, 0.0));
        assert_relative_eq!(player.yaw(), -0.2, epsilon = 1e-6);
    }

    #[test]
    fn default_view_looks_down_negative_z() {
        let player = Player::default();
        let dir = player.view_direction();
        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.z, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(player.right_flat().x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn looking_down_targets_floor() {
        let grid = TestGrid::floor(5, 3);
        let mut player = player_at(Vec3::new(0.5, 5.0, 0.5));
        player.set_view(0.0, -FRAC_PI_2);

        let target = player.interaction_target(&grid).expect("floor under the player");
        assert_eq!(target.remove, BlockPos::new(0, 4, 0));
        assert_eq!(target.place, BlockPos::new(0, 5, 0));
        assert_eq!(target.normal, IVec3::Y);
        assert_relative_eq!(target.distance, 1.6, epsilon = 1e-4);
    }

    #[test]
    fn remove_block_clears_target() {
        let mut grid = TestGrid::floor(5, 3);
        let mut player = player_at(Vec3::new(0.5, 5.0, 0.5));
        player.set_view(0.0, -FRAC_PI_2);

        assert_eq!(player.remove_block(&mut grid), Some(BlockPos::new(0, 4, 0)));
        assert_eq!(grid.block_at(BlockPos::new(0, 4, 0)), BlockKind::Air);
    }

    #[test]
    fn placement_inside_body_is_refused() {
        let mut grid = TestGrid::floor(5, 3);
        let mut player = player_at(Vec3::new(0.5, 5.0, 0.5));
        player.set_view(0.0, -FRAC_PI_2);

        assert_eq!(player.place_block(&mut grid), None);
        assert_eq!(grid.block_at(BlockPos::new(0, 5, 0)), BlockKind::Air);
    }

    #[test]
    fn placement_in_front_uses_selected_block() {
        let mut grid = TestGrid::floor(5, 3);
        let mut player = player_at(Vec3::new(0.5, 5.0, 0.5));
        player.set_view(0.0, -FRAC_PI_2 / 2.0);
        player.select_block(BlockKind::Leaves);

        let placed = player.place_block(&mut grid);
        assert_eq!(placed, Some(BlockPos::new(0, 5, -2)));
        assert_eq!(grid.block_at(BlockPos::new(0, 5, -2)), BlockKind::Leaves);
    }

    #[test]
    fn edits_beyond_reach_do_nothing() {
        let mut grid = TestGrid::floor(5, 3);
        let mut player = player_at(Vec3::new(0.5, 20.0, 0.5));
        player.set_view(0.0, -FRAC_PI_2);

        let target = player.interaction_target(&grid).expect("floor far below");
        assert!(target.distance >= 6.0);
        assert_eq!(player.remove_block(&mut grid), None);
        assert_eq!(player.place_block(&mut grid), None);
        assert_eq!(grid.block_at(BlockPos::new(0, 4, 0)), BlockKind::Stone);
        assert_eq!(grid.block_at(BlockPos::new(0, 5, 0)), BlockKind::Air);
    }

    #[test]
    fn default_selection_is_stone() {
        assert_eq!(Player::default().selected_block(), BlockKind::Stone);
    }
}
