//! First-person player physics for voxelwalk.
//!
//! The controller works against the [`BlockSource`](voxelwalk_core::BlockSource)
//! and [`VoxelGrid`](voxelwalk_core::VoxelGrid) traits, so it has no
//! dependency on how chunks are stored.

pub mod config;
pub mod player;
pub mod raycast;

pub use config::PlayerConfig;
pub use player::{Axis, InteractionTarget, Player, PlayerInput};
pub use raycast::{raycast, RaycastHit};
