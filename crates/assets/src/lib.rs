//! Asset data consumed by the scene and the renderer.
//!
//! A [`Model`] is a list of sub-meshes, each with its own vertex/index data
//! and texture references. Models and textures are shared through `Arc` so an
//! entity component and the [`AssetCache`] can hold the same instance.
//!
//! # Invariants
//! - A model with no meshes means "failed to load"; the cache never hands one
//!   out and the scene refuses to attach one.
//! - A cached asset lives as long as any holder keeps its `Arc`.

mod cache;
mod model;

pub use cache::{AssetCache, ModelLoader, TextureCache};
pub use model::{Mesh, Model, Texture, TextureKind, Vertex};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load model '{path}': {reason}")]
    Load { path: String, reason: String },
    #[error("model '{0}' contains no meshes")]
    EmptyModel(String),
    #[error("mesh '{mesh}' index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },
}
