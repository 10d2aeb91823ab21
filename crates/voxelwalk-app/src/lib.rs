//! Host loop and application framework for voxelwalk.
//!
//! This crate ties the world, the player and input together:
//! - [`GameSession`] advances player, world and render backend once per frame
//! - [`RenderBackend`] is the boundary to whatever draws chunk meshes;
//!   [`MemoryBackend`] keeps them in memory for headless runs and tests
//! - [`VoxelApp`] with [`run_app`] (winit window) or [`run_headless`]
//!
//! # Example
//!
//! ```no_run
//! use voxelwalk_app::{run_app, AppConfig, AppContext, FrameContext, VoxelApp};
//!
//! struct MyApp {}
//!
//! impl VoxelApp for MyApp {
//!     fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
//!         Ok(MyApp {})
//!     }
//!
//!     fn update(&mut self, ctx: &mut AppContext, dt: f32) {}
//!
//!     fn render(&mut self, ctx: &AppContext, frame: &FrameContext) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     run_app::<MyApp>(AppConfig::default())
//! }
//! ```

mod app;
pub mod backend;
pub mod camera;
mod context;
mod frame;
pub mod hud;
mod runner;
pub mod scene;
pub mod session;

pub use app::VoxelApp;
pub use backend::{ChunkBuffers, FrameView, MemoryBackend, RenderBackend};
pub use camera::Camera;
pub use context::AppContext;
pub use frame::FrameContext;
pub use hud::{FpsCounter, HudSnapshot};
pub use runner::{init_logging, run_app, run_headless, AppConfig};
pub use scene::SceneSettings;
pub use session::{player_input, GameSession, SessionConfig};

// Re-export commonly used types for convenience
pub use winit::event::{DeviceEvent, DeviceId, WindowEvent};
