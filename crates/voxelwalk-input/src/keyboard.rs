//! Keyboard state.

use hashbrown::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::button_state::ButtonState;

/// Physical key states, keyed by layout-independent key code.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a winit key event. Keys without a physical code are ignored.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.set(code, event.state == ElementState::Pressed);
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.set(key, false);
    }

    fn set(&mut self, key: KeyCode, pressed: bool) {
        self.keys.entry(key).or_default().set(pressed);
    }

    fn state(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.state(key).is_pressed()
    }

    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.state(key).is_just_pressed()
    }

    #[must_use]
    pub fn is_just_released(&self, key: KeyCode) -> bool {
        self.state(key).is_just_released()
    }

    pub fn end_frame(&mut self) {
        self.keys.values_mut().for_each(ButtonState::end_frame);
        self.keys.retain(|_, state| *state != ButtonState::Released);
    }

    /// Forget every key, e.g. after the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
