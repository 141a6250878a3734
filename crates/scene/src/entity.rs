use crate::{Component, Scene, SceneError};
use plume_common::{EntityId, SceneId};
use std::fmt;

/// Handle to an entity in a particular [`Scene`].
///
/// The handle owns no data; every accessor takes the scene it belongs to and
/// forwards to it. A default handle is invalid and every access through it
/// fails with [`SceneError::InvalidEntity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
    scene: SceneId,
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl Entity {
    pub const NULL: Self = Self {
        id: EntityId::NULL,
        scene: SceneId::nil(),
    };

    pub(crate) fn new(id: EntityId, scene: SceneId) -> Self {
        Self { id, scene }
    }

    pub fn id(self) -> EntityId {
        self.id
    }

    pub fn scene_id(self) -> SceneId {
        self.scene
    }

    /// False only for the null handle. A destroyed entity's handle stays
    /// "valid" here; the scene rejects it on access.
    pub fn is_valid(self) -> bool {
        !self.id.is_null()
    }

    pub fn add_component<T: Component>(
        self,
        scene: &mut Scene,
        component: T,
    ) -> Result<&mut T, SceneError> {
        scene.add_component(self, component)
    }

    pub fn get_component<T: Component>(self, scene: &Scene) -> Result<&T, SceneError> {
        scene.get_component(self)
    }

    pub fn get_component_mut<T: Component>(self, scene: &mut Scene) -> Result<&mut T, SceneError> {
        scene.get_component_mut(self)
    }

    pub fn has_component<T: Component>(self, scene: &Scene) -> bool {
        scene.has_component::<T>(self)
    }

    pub fn remove_component<T: Component>(self, scene: &mut Scene) -> Result<T, SceneError> {
        scene.remove_component(self)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}
