//! `VoxelApp` trait definition.

use crate::context::AppContext;
use crate::frame::FrameContext;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};

/// Trait for voxelwalk applications.
///
/// The runner owns the event loop and frame timing; the app owns its game
/// state. The same app runs windowed through [`crate::run_app`] or without a
/// window through [`crate::run_headless`].
pub trait VoxelApp: Sized {
    /// Initialize the application.
    ///
    /// Called once, after the window (if any) has been created.
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self>;

    /// Update application state.
    ///
    /// Called every frame before rendering. The context is mutable so the
    /// app can change pointer lock or request exit.
    ///
    /// # Arguments
    /// * `ctx` - Application context with window access
    /// * `dt` - Delta time in seconds since last frame
    fn update(&mut self, ctx: &mut AppContext, dt: f32);

    /// Render a frame. Called every frame after `update()`.
    fn render(&mut self, ctx: &AppContext, frame: &FrameContext) -> anyhow::Result<()>;

    /// Handle window resize. Zero-sized resizes are filtered out by the runner.
    #[allow(unused_variables)]
    fn on_resize(&mut self, ctx: &mut AppContext, width: u32, height: u32) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handle window events.
    ///
    /// Return `true` if the event was handled and should not be processed further.
    #[allow(unused_variables)]
    fn on_event(&mut self, event: &WindowEvent) -> bool {
        false
    }

    /// Handle device events (raw input).
    ///
    /// Raw mouse motion arrives here, which is what mouse look needs while
    /// the cursor is locked.
    #[allow(unused_variables)]
    fn on_device_event(&mut self, device_id: DeviceId, event: &DeviceEvent) {}

    /// Called once before shutdown.
    #[allow(unused_variables)]
    fn cleanup(&mut self, ctx: &mut AppContext) {}
}
