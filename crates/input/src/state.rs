use crate::event::{InputEvent, Key, MouseButton};
use std::collections::HashSet;

/// Read side of the input collaborator, as seen by per-frame consumers.
pub trait InputState {
    fn is_key_pressed(&self, key: Key) -> bool;
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;
    /// Relative motion accumulated since the last `begin_frame`.
    fn mouse_motion(&self) -> (i32, i32);
    /// Net wheel steps since the last `begin_frame`.
    fn mouse_wheel_y(&self) -> i32;
}

/// Held-key/button sets plus per-frame motion and wheel accumulators.
#[derive(Debug, Default, Clone)]
pub struct Input {
    keys_held: HashSet<Key>,
    buttons_held: HashSet<MouseButton>,
    mouse_rel: (i32, i32),
    wheel_y: i32,
    quit_requested: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame values. Held keys and buttons carry over.
    pub fn begin_frame(&mut self) {
        self.mouse_rel = (0, 0);
        self.wheel_y = 0;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys_held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys_held.remove(&key);
            }
            InputEvent::MouseButtonDown(button) => {
                self.buttons_held.insert(button);
            }
            InputEvent::MouseButtonUp(button) => {
                self.buttons_held.remove(&button);
            }
            InputEvent::MouseMotion { dx, dy } => {
                self.mouse_rel.0 = self.mouse_rel.0.saturating_add(dx);
                self.mouse_rel.1 = self.mouse_rel.1.saturating_add(dy);
            }
            InputEvent::MouseWheel { y } => {
                self.wheel_y = self.wheel_y.saturating_add(y);
            }
            InputEvent::Quit => {
                tracing::debug!("quit requested");
                self.quit_requested = true;
            }
        }
    }

    /// Latched once a `Quit` event arrives; never cleared.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl InputState for Input {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }

    fn mouse_motion(&self) -> (i32, i32) {
        self.mouse_rel
    }

    fn mouse_wheel_y(&self) -> i32 {
        self.wheel_y
    }
}
