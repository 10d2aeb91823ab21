//! One running game: world, player and the backend that draws them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, trace_span};
use voxelwalk_core::{BlockKind, BlockPos, Result};
use voxelwalk_input::{Action, InputManager};
use voxelwalk_physics::{Player, PlayerConfig, PlayerInput};
use voxelwalk_world::{Chunk, World, WorldConfig};

use crate::backend::{FrameView, RenderBackend};
use crate::camera::Camera;
use crate::hud::{FpsCounter, HudSnapshot};
use crate::scene::SceneSettings;

/// Everything needed to start a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub scene: SceneSettings,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.player.validate()?;
        self.scene.validate()
    }
}

/// World, player and render backend advanced together one frame at a time.
///
/// Each [`GameSession::tick`] runs the player, then the world, then hands
/// changed chunk meshes to the backend and renders.
#[derive(Debug)]
pub struct GameSession<B: RenderBackend> {
    world: World,
    player: Player,
    backend: B,
    scene: SceneSettings,
    fps: FpsCounter,
    aspect: f32,
    frame_number: u64,
}

impl<B: RenderBackend> GameSession<B> {
    pub fn new(config: SessionConfig, backend: B) -> Result<Self> {
        config.validate()?;
        let world = World::new(config.world)?;
        info!(
            seed = world.generator().config().seed,
            load_radius = world.load_radius(),
            "session created"
        );
        Ok(Self {
            world,
            player: Player::new(config.player),
            backend,
            scene: config.scene,
            fps: FpsCounter::new(),
            aspect: 16.0 / 9.0,
            frame_number: 0,
        })
    }

    /// Advance one frame: [`GameSession::step`] then [`GameSession::render`].
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> Result<()> {
        self.step(dt, input)?;
        self.render()
    }

    /// Move the player, stream chunks and push changed meshes to the backend.
    pub fn step(&mut self, dt: f32, input: &PlayerInput) -> Result<()> {
        {
            let _span = trace_span!("frame.player").entered();
            self.player.update(dt, input, &self.world);
        }

        let _span = trace_span!("frame.world").entered();
        self.world.update(self.player.position);
        self.sync_meshes()?;
        if let Some(fps) = self.fps.tick(dt) {
            trace!(fps, "frame rate");
        }
        Ok(())
    }

    /// Draw the current state through the backend.
    pub fn render(&mut self) -> Result<()> {
        let _span = trace_span!("frame.render").entered();
        let camera = self.camera();
        self.backend.render(&FrameView {
            camera: &camera,
            scene: &self.scene,
            frame_number: self.frame_number,
        })?;
        self.frame_number += 1;
        Ok(())
    }

    /// Push rebuilt chunk meshes to the backend. Returns how many chunks changed.
    pub fn sync_meshes(&mut self) -> Result<usize> {
        let updates = self.world.take_mesh_updates();
        for &pos in &updates {
            match self.world.chunk(pos).and_then(Chunk::mesh) {
                Some(mesh) => self.backend.upload_chunk(pos, pos.origin().to_vec3(), mesh)?,
                None => self.backend.dispose_chunk(pos),
            }
        }
        Ok(updates.len())
    }

    /// React to a triggered input action. Movement actions are read from
    /// [`PlayerInput`] instead and are ignored here.
    pub fn apply_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Select(kind) => self.select_block(kind),
            Action::RemoveBlock => {
                self.remove_block()?;
            }
            Action::PlaceBlock => {
                self.place_block()?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn select_block(&mut self, kind: BlockKind) {
        self.player.select_block(kind);
    }

    /// Remove the targeted block and upload the affected meshes.
    pub fn remove_block(&mut self) -> Result<Option<BlockPos>> {
        let edited = self.player.remove_block(&mut self.world);
        if let Some(pos) = edited {
            debug!(?pos, "block removed");
            self.sync_meshes()?;
        }
        Ok(edited)
    }

    /// Place the selected block against the targeted face and upload the affected meshes.
    pub fn place_block(&mut self) -> Result<Option<BlockPos>> {
        let edited = self.player.place_block(&mut self.world);
        if let Some(pos) = edited {
            debug!(?pos, kind = %self.player.selected_block(), "block placed");
            self.sync_meshes()?;
        }
        Ok(edited)
    }

    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::new(
            self.player.position,
            self.player.selected_block(),
            self.fps.fps(),
        )
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::first_person(&self.player, &self.scene, self.aspect)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub const fn scene(&self) -> &SceneSettings {
        &self.scene
    }

    /// Frames rendered so far.
    #[must_use]
    pub const fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Release every chunk's meshes and backend buffers.
    pub fn shutdown(&mut self) {
        let released = self.world.dispose();
        for &pos in &released {
            self.backend.dispose_chunk(pos);
        }
        info!(chunks = released.len(), frames = self.frame_number, "session shut down");
    }
}

/// Movement snapshot from held actions and pointer motion.
#[must_use]
pub fn player_input(input: &InputManager) -> PlayerInput {
    PlayerInput {
        forward: input.is_active(Action::MoveForward),
        back: input.is_active(Action::MoveBack),
        left: input.is_active(Action::MoveLeft),
        right: input.is_active(Action::MoveRight),
        jump: input.is_active(Action::Jump),
        walk: input.is_active(Action::Walk),
        look_delta: input.look_delta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use voxelwalk_input::KeyCode;

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SessionConfig::default();
        config.scene.fov_degrees = 0.0;
        assert!(GameSession::new(config, MemoryBackend::new()).is_err());
    }

    #[test]
    fn held_keys_become_player_input() {
        let mut input = InputManager::new();
        input.press_key(KeyCode::KeyW);
        input.press_key(KeyCode::ShiftLeft);
        let snapshot = player_input(&input);
        assert!(snapshot.forward && snapshot.walk);
        assert!(!snapshot.back && !snapshot.jump);
    }

    #[test]
    fn aspect_ignores_degenerate_sizes() {
        let mut session = GameSession::new(SessionConfig::default(), MemoryBackend::new()).unwrap();
        session.set_aspect(0.0);
        session.set_aspect(f32::NAN);
        assert!((session.camera().aspect - 16.0 / 9.0).abs() < 1e-6);
        session.set_aspect(2.0);
        assert!((session.camera().aspect - 2.0).abs() < 1e-6);
    }
}
