//! Keyboard and mouse input for voxelwalk.
//!
//! Device state is tracked per frame with press/release edges, mapped to
//! typed [`Action`]s through an [`ActionMap`], and gated by pointer lock
//! the way a first-person game expects.
//!
//! ```ignore
//! fn on_event(input: &mut InputManager, event: &WindowEvent) -> bool {
//!     input.process_window_event(event)
//! }
//!
//! fn update(input: &mut InputManager) {
//!     let walking = input.is_active(Action::Walk);
//!     for action in input.poll_actions() {
//!         // react to clicks and hotkeys
//!     }
//!     input.end_frame();
//! }
//! ```

mod action;
mod button_state;
mod input;
mod keyboard;
mod mouse;

pub use action::{Action, ActionMap, InputBinding};
pub use button_state::ButtonState;
pub use input::{InputManager, PointerRequest};
pub use keyboard::KeyboardState;
pub use mouse::{MouseButton, MouseState};

pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;
