//! Mouse buttons and relative motion.

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton};

use crate::button_state::ButtonState;

/// Mouse buttons the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    const COUNT: usize = 3;

    const fn slot(self) -> usize {
        self as usize
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            _ => Err(()),
        }
    }
}

/// Button states plus pointer motion accumulated over the current frame.
#[derive(Debug, Default)]
pub struct MouseState {
    buttons: [ButtonState; MouseButton::COUNT],
    motion: Vec2,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a winit button event. Extra buttons are ignored.
    pub fn process_button(&mut self, button: WinitMouseButton, state: ElementState) {
        if let Ok(button) = MouseButton::try_from(button) {
            self.set(button, state == ElementState::Pressed);
        }
    }

    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        self.buttons[button.slot()].set(pressed);
    }

    /// Accumulate relative pointer motion in pixels.
    pub fn add_motion(&mut self, delta: Vec2) {
        self.motion += delta;
    }

    /// Motion accumulated since the last [`MouseState::end_frame`].
    #[must_use]
    pub const fn motion(&self) -> Vec2 {
        self.motion
    }

    #[must_use]
    pub const fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()].is_pressed()
    }

    #[must_use]
    pub const fn is_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()].is_just_pressed()
    }

    #[must_use]
    pub const fn is_just_released(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()].is_just_released()
    }

    pub fn end_frame(&mut self) {
        self.buttons.iter_mut().for_each(ButtonState::end_frame);
        self.motion = Vec2::ZERO;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
