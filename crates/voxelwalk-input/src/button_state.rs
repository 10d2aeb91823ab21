//! Per-frame press/release tracking for keys and mouse buttons.

/// Edge-aware state of a single key or mouse button.
///
/// ```text
/// Released --press--> JustPressed --end_frame--> Pressed
///    ^                                              |
///    +---end_frame--- JustReleased <----release-----+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Went down during the current frame.
    JustPressed,
    /// Held since an earlier frame.
    Pressed,
    /// Went up during the current frame.
    JustReleased,
    #[default]
    Released,
}

impl ButtonState {
    /// Down, whether this frame or earlier.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    #[inline]
    #[must_use]
    pub const fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    #[inline]
    #[must_use]
    pub const fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }

    /// Record a press. Repeats while held (key autorepeat) are ignored.
    #[inline]
    pub fn press(&mut self) {
        if !self.is_pressed() {
            *self = Self::JustPressed;
        }
    }

    /// Record a release. Releasing an already released button is ignored.
    #[inline]
    pub fn release(&mut self) {
        if self.is_pressed() {
            *self = Self::JustReleased;
        }
    }

    /// Apply a platform press/release report.
    #[inline]
    pub fn set(&mut self, pressed: bool) {
        if pressed {
            self.press();
        } else {
            self.release();
        }
    }

    /// Settle the edge states once the frame has consumed them.
    #[inline]
    pub fn end_frame(&mut self) {
        *self = match *self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            settled => settled,
        };
    }
}
