//! Per-frame context for rendering.

/// Timing for the frame being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Delta time since last frame in seconds.
    pub dt: f32,
    /// Current frame number.
    pub frame_number: u64,
    /// Instantaneous frame rate, `1 / dt`.
    pub fps: f32,
}

impl FrameContext {
    pub(crate) fn new(dt: f32, frame_number: u64) -> Self {
        let fps = if dt > 0.0 { dt.recip() } else { 0.0 };
        Self {
            dt,
            frame_number,
            fps,
        }
    }
}
