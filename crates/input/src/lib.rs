//! Input state for one frame.
//!
//! The host pumps platform events into [`Input`] and calls
//! [`Input::begin_frame`] once per frame. Consumers such as the camera only
//! see the [`InputState`] trait.
//!
//! # Invariants
//! - Held keys and buttons persist across frames until released.
//! - Mouse motion and wheel are per-frame: they accumulate between
//!   `begin_frame` calls and reset at the start of each frame.

pub mod event;
pub mod state;

pub use event::{InputEvent, Key, MouseButton};
pub use state::{Input, InputState};
