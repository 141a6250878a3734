//! Scene model: entities, their components, and typed views.
//!
//! # Invariants
//! - Every entity carries a `TagComponent` and a `TransformComponent` from
//!   creation until it is destroyed; neither can be removed on its own.
//! - Entity ids are never reused within a scene; handles from one scene are
//!   rejected by every other scene.
//! - All structural mutation goes through `&mut Scene`, so no entity or
//!   component can be created while a view is being iterated.

mod components;
mod entity;
mod scene;

pub use components::{LightComponent, ModelComponent, TagComponent, TransformComponent};
pub use entity::Entity;
pub use plume_ecs::{Component, ComponentError, Query};
pub use scene::{Scene, SceneEvent};

use plume_common::EntityId;

/// Errors from scene operations. All of them indicate a bug in the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("invalid or destroyed entity {0}")]
    InvalidEntity(EntityId),
    #[error("entity {0} belongs to a different scene")]
    ForeignEntity(EntityId),
    #[error(transparent)]
    Component(#[from] ComponentError),
    #[error("{component} is required on every entity and cannot be removed from {entity}")]
    RequiredComponent {
        entity: EntityId,
        component: &'static str,
    },
    #[error("model '{0}' has no meshes and cannot be attached")]
    EmptyModel(String),
}
