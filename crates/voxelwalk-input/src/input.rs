//! Input manager: device state, action bindings and pointer lock.

use glam::Vec2;
use tracing::debug;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::KeyCode;

use crate::action::{Action, ActionMap};
use crate::keyboard::KeyboardState;
use crate::mouse::{MouseButton, MouseState};

/// A pointer-lock change the host should apply to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRequest {
    /// Capture and hide the cursor.
    Lock,
    /// Give the cursor back.
    Release,
}

/// Keyboard, mouse and action state for one window.
///
/// Feed it winit events (or drive it with [`InputManager::press_key`] and
/// friends when running headless), query it during the frame, then call
/// [`InputManager::end_frame`].
///
/// Pointer-lock rules:
/// - while unlocked, a left click only requests the lock
/// - pointer motion is recorded only while locked
/// - world-editing actions only fire while locked
#[derive(Debug, Default)]
pub struct InputManager {
    keyboard: KeyboardState,
    mouse: MouseState,
    actions: ActionMap,
    pointer_locked: bool,
    pointer_request: Option<PointerRequest>,
}

impl InputManager {
    /// Create an input manager with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_actions(actions: ActionMap) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    #[must_use]
    pub const fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Mutable bindings for runtime rebinding.
    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    /// Process a window event. Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_key_event(event);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Ok(button) = MouseButton::try_from(*button) {
                    self.set_mouse(button, *state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.keyboard.clear();
                self.mouse.clear();
                false
            }
            _ => false,
        }
    }

    /// Process a device event; raw mouse motion drives the camera.
    #[allow(clippy::cast_possible_truncation)]
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.add_mouse_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keyboard.press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keyboard.release(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        self.set_mouse(button, true);
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.set_mouse(button, false);
    }

    fn set_mouse(&mut self, button: MouseButton, pressed: bool) {
        if pressed && button == MouseButton::Left && !self.pointer_locked {
            self.request_pointer_lock();
            return;
        }
        self.mouse.set(button, pressed);
    }

    /// Add relative pointer motion. Ignored while the pointer is free.
    pub fn add_mouse_motion(&mut self, delta: Vec2) {
        if self.pointer_locked {
            self.mouse.add_motion(delta);
        }
    }

    /// Pointer motion to apply to the camera this frame.
    #[must_use]
    pub const fn look_delta(&self) -> Vec2 {
        self.mouse.motion()
    }

    #[must_use]
    pub const fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Record the platform's pointer-lock state.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer_locked != locked {
            debug!(locked, "pointer lock changed");
        }
        self.pointer_locked = locked;
    }

    /// Ask the host to lock the pointer. Ignored if already locked.
    pub fn request_pointer_lock(&mut self) {
        if !self.pointer_locked {
            self.pointer_request = Some(PointerRequest::Lock);
        }
    }

    /// Pending pointer-lock change, cleared by this call.
    pub fn take_pointer_request(&mut self) -> Option<PointerRequest> {
        self.pointer_request.take()
    }

    /// Whether `action` is held.
    #[must_use]
    pub fn is_active(&self, action: Action) -> bool {
        self.actions.is_active(action, &self.keyboard, &self.mouse)
    }

    /// Actions triggered this frame, in a stable order.
    ///
    /// Editing actions are dropped while the pointer is free. Triggering
    /// [`Action::ReleasePointer`] while locked queues a release request.
    pub fn poll_actions(&mut self) -> Vec<Action> {
        let locked = self.pointer_locked;
        let mut triggered: Vec<Action> = self
            .actions
            .triggered(&self.keyboard, &self.mouse)
            .filter(|action| locked || !action.edits_world())
            .collect();
        triggered.sort_unstable();

        if locked && triggered.contains(&Action::ReleasePointer) {
            self.pointer_request = Some(PointerRequest::Release);
        }
        triggered
    }

    /// Settle button edges and reset motion. Call once per frame after input is consumed.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }
}
