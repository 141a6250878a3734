//! Camera and per-frame scene rendering.
//!
//! The traversal is backend-agnostic: it talks to a [`Shader`] and a
//! [`RenderDevice`]. The recording backends in [`recording`] stand in for a
//! GPU in headless runs and tests.
//!
//! # Invariants
//! - Rendering never mutates the scene.
//! - The camera basis stays orthonormal; pitch stays within ±89° and the
//!   field of view within [1°, 45°].
//! - A failed draw affects only the entity being drawn.

mod camera;
mod config;
mod device;
pub mod recording;
mod renderer;
mod shader;

pub use camera::{Camera, MAX_FOV_DEGREES, MIN_FOV_DEGREES, PITCH_LIMIT_DEGREES};
pub use config::{CameraSettings, ConfigError, EngineConfig, RenderSettings};
pub use device::{DrawError, RenderDevice};
pub use renderer::{FrameStats, SceneRenderer, draw_model};
pub use shader::{PHONG_FRAGMENT_SRC, PHONG_VERTEX_SRC, Shader, uniforms};
