//! Application context.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use winit::window::{CursorGrabMode, Window};

/// State shared between the runner and the app: the window (absent when
/// headless), its size, frame count and pointer lock.
#[derive(Debug)]
pub struct AppContext {
    window: Option<Arc<Window>>,
    width: u32,
    height: u32,
    /// Total frames rendered.
    pub frame_count: u64,
    /// Time of last frame (for delta time calculation).
    pub(crate) last_frame_time: Instant,
    pointer_locked: bool,
    exit_requested: bool,
}

impl AppContext {
    /// Context without a window.
    #[must_use]
    pub fn headless(width: u32, height: u32) -> Self {
        Self {
            window: None,
            width: width.max(1),
            height: height.max(1),
            frame_count: 0,
            last_frame_time: Instant::now(),
            pointer_locked: false,
            exit_requested: false,
        }
    }

    pub(crate) fn windowed(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let mut ctx = Self::headless(size.width, size.height);
        ctx.window = Some(window);
        ctx
    }

    #[must_use]
    pub fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }

    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.window.is_none()
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the aspect ratio (width / height).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    #[must_use]
    pub const fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Lock or release the pointer, grabbing the cursor when there is a window.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer_locked == locked {
            return;
        }
        if let Some(window) = &self.window {
            apply_cursor_mode(window, locked);
        }
        self.pointer_locked = locked;
        info!(locked, "pointer lock changed");
    }

    /// Ask the runner to stop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    #[must_use]
    pub const fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

fn apply_cursor_mode(window: &Window, locked: bool) {
    let grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };

    if let Err(e) = window.set_cursor_grab(grab_mode) {
        // Some platforms only support confining the cursor
        if locked {
            if let Err(e2) = window.set_cursor_grab(CursorGrabMode::Confined) {
                warn!("Failed to confine cursor: {e2}");
            }
        } else {
            warn!("Failed to set cursor grab mode: {e}");
        }
    }

    window.set_cursor_visible(!locked);
}
