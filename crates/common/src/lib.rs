//! Shared identifier types used across the plume crates.

mod types;

pub use types::{EntityId, SceneId};
