//! Game actions and their key/mouse bindings.

use hashbrown::HashMap;
use voxelwalk_core::BlockKind;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::{MouseButton, MouseState};

/// Something the player can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    /// Slow down while held.
    Walk,
    RemoveBlock,
    PlaceBlock,
    /// Choose the block kind used for placement.
    Select(BlockKind),
    /// Give the pointer back to the OS.
    ReleasePointer,
}

impl Action {
    /// Block kinds on hotkeys `1` through `6`, in order.
    pub const HOTBAR: [BlockKind; 6] = [
        BlockKind::Dirt,
        BlockKind::Grass,
        BlockKind::Stone,
        BlockKind::Wood,
        BlockKind::Leaves,
        BlockKind::Water,
    ];

    const HOTKEYS: [KeyCode; 6] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
    ];

    /// Returns true for actions that edit the world.
    #[must_use]
    pub const fn edits_world(self) -> bool {
        matches!(self, Self::RemoveBlock | Self::PlaceBlock)
    }
}

/// A physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl InputBinding {
    fn is_pressed(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(key) => keyboard.is_pressed(key),
            Self::Mouse(button) => mouse.is_pressed(button),
        }
    }

    fn is_just_pressed(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(key) => keyboard.is_just_pressed(key),
            Self::Mouse(button) => mouse.is_just_pressed(button),
        }
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Bindings from actions to inputs. An action may have several bindings.
#[derive(Debug, Clone)]
pub struct ActionMap {
    bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for ActionMap {
    /// WASD movement, Space to jump, left Shift to walk, mouse buttons to
    /// edit, digits for the hotbar and Escape to release the pointer.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Action::MoveForward, KeyCode::KeyW);
        map.bind(Action::MoveBack, KeyCode::KeyS);
        map.bind(Action::MoveLeft, KeyCode::KeyA);
        map.bind(Action::MoveRight, KeyCode::KeyD);
        map.bind(Action::Jump, KeyCode::Space);
        map.bind(Action::Walk, KeyCode::ShiftLeft);
        map.bind(Action::RemoveBlock, MouseButton::Left);
        map.bind(Action::PlaceBlock, MouseButton::Right);
        for (kind, key) in Action::HOTBAR.into_iter().zip(Action::HOTKEYS) {
            map.bind(Action::Select(kind), key);
        }
        map.bind(Action::ReleasePointer, KeyCode::Escape);
        map
    }
}

impl ActionMap {
    /// A map with no bindings at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Add a binding. Binding the same input twice is a no-op.
    pub fn bind(&mut self, action: Action, binding: impl Into<InputBinding>) {
        let binding = binding.into();
        let list = self.bindings.entry(action).or_default();
        if !list.contains(&binding) {
            list.push(binding);
        }
    }

    pub fn unbind(&mut self, action: Action, binding: InputBinding) {
        if let Some(list) = self.bindings.get_mut(&action) {
            list.retain(|b| *b != binding);
        }
    }

    #[must_use]
    pub fn bindings(&self, action: Action) -> &[InputBinding] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or_default()
    }

    /// Any binding of `action` is held.
    #[must_use]
    pub fn is_active(&self, action: Action, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        self.bindings(action)
            .iter()
            .any(|b| b.is_pressed(keyboard, mouse))
    }

    /// Any binding of `action` went down this frame.
    #[must_use]
    pub fn is_triggered(&self, action: Action, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        self.bindings(action)
            .iter()
            .any(|b| b.is_just_pressed(keyboard, mouse))
    }

    /// Every bound action whose binding went down this frame.
    pub fn triggered<'a>(
        &'a self,
        keyboard: &'a KeyboardState,
        mouse: &'a MouseState,
    ) -> impl Iterator<Item = Action> + 'a {
        self.bindings
            .iter()
            .filter(|(_, list)| list.iter().any(|b| b.is_just_pressed(keyboard, mouse)))
            .map(|(action, _)| *action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkeys_select_in_order() {
        let map = ActionMap::default();
        assert_eq!(
            map.bindings(Action::Select(BlockKind::Dirt)),
            &[InputBinding::Key(KeyCode::Digit1)]
        );
        assert_eq!(
            map.bindings(Action::Select(BlockKind::Water)),
            &[InputBinding::Key(KeyCode::Digit6)]
        );
        assert!(map.bindings(Action::Select(BlockKind::Air)).is_empty());
    }

    #[test]
    fn every_digit_triggers_its_kind() {
        let map = ActionMap::default();
        for (digit, kind) in Action::HOTKEYS.into_iter().zip(Action::HOTBAR) {
            let mut keyboard = KeyboardState::new();
            keyboard.press(digit);
            let triggered: Vec<_> = map.triggered(&keyboard, &MouseState::new()).collect();
            assert_eq!(triggered, vec![Action::Select(kind)]);
        }
    }

    #[test]
    fn bind_and_unbind() {
        let mut map = ActionMap::empty();
        map.bind(Action::Jump, KeyCode::Space);
        map.bind(Action::Jump, KeyCode::Space);
        map.bind(Action::Jump, MouseButton::Middle);
        assert_eq!(map.bindings(Action::Jump).len(), 2);

        map.unbind(Action::Jump, InputBinding::Key(KeyCode::Space));
        assert_eq!(map.bindings(Action::Jump), &[InputBinding::Mouse(MouseButton::Middle)]);
    }

    #[test]
    fn held_versus_triggered() {
        let map = ActionMap::default();
        let mut keyboard = KeyboardState::new();
        let mouse = MouseState::new();

        keyboard.press(KeyCode::KeyW);
        assert!(map.is_active(Action::MoveForward, &keyboard, &mouse));
        assert!(map.is_triggered(Action::MoveForward, &keyboard, &mouse));

        keyboard.end_frame();
        assert!(map.is_active(Action::MoveForward, &keyboard, &mouse));
        assert!(!map.is_triggered(Action::MoveForward, &keyboard, &mouse));
    }
}
