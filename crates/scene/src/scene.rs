use crate::components::{TagComponent, TransformComponent};
use crate::{Component, ComponentError, Entity, Query, SceneError};
use plume_common::{EntityId, SceneId};
use plume_ecs::ComponentStore;
use std::any::TypeId;
use std::collections::BTreeSet;

/// Record of a structural change to the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// Entity created with its default Tag and Transform.
    EntityCreated { entity: EntityId, tag: String },
    ComponentAdded {
        entity: EntityId,
        component: &'static str,
    },
    ComponentRemoved {
        entity: EntityId,
        component: &'static str,
    },
    /// Entity destroyed along with the listed components.
    EntityDestroyed {
        entity: EntityId,
        components: Vec<&'static str>,
    },
}

/// Owner of every entity and component.
///
/// Handles returned by [`create_entity`](Self::create_entity) stay usable until
/// the entity is destroyed. Iteration order of views is creation order.
pub struct Scene {
    id: SceneId,
    store: ComponentStore,
    alive: BTreeSet<EntityId>,
    next_id: u64,
    events: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            id: SceneId::new(),
            store: ComponentStore::new(),
            alive: BTreeSet::new(),
            next_id: 0,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn entity_count(&self) -> usize {
        self.alive.len()
    }

    /// Handles of all live entities, ascending by id.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive.iter().map(|id| Entity::new(*id, self.id))
    }

    /// Rebuild a handle from a raw id, if that entity is alive here.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        self.alive.contains(&id).then(|| Entity::new(id, self.id))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.resolve(entity).is_ok()
    }

    /// Create an entity with a default transform and the given tag
    /// (`"Entity"` when `name` is empty).
    pub fn create_entity(&mut self, name: &str) -> Entity {
        let id = EntityId(self.next_id);
        // The 64-bit id space cannot be exhausted in practice, so the counter
        // never reaches the NULL sentinel.
        debug_assert!(!id.is_null(), "entity id space exhausted");
        self.next_id += 1;
        self.alive.insert(id);

        let tag = TagComponent::new(name);
        let tag_name = tag.tag.clone();
        let attached = self.store.insert(id, TransformComponent::default()).is_ok()
            && self.store.insert(id, tag).is_ok();
        debug_assert!(attached, "fresh entity {id} already had components");

        tracing::debug!(entity = %id, tag = %tag_name, "entity created");
        self.events.push(SceneEvent::EntityCreated {
            entity: id,
            tag: tag_name,
        });
        Entity::new(id, self.id)
    }

    /// Destroy `entity` and drop all of its components.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), SceneError> {
        let id = self.resolve(entity)?;
        self.alive.remove(&id);
        let components = self.store.remove_entity(id);
        tracing::debug!(entity = %id, ?components, "entity destroyed");
        self.events.push(SceneEvent::EntityDestroyed {
            entity: id,
            components,
        });
        Ok(())
    }

    /// Attach `component`. Fails if the entity already has a `T`.
    ///
    /// The returned reference borrows the scene; it cannot be kept across
    /// frames or across any other structural change.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, SceneError> {
        let id = self.resolve(entity)?;
        let value = self.store.insert(id, component)?;
        tracing::trace!(entity = %id, component = T::NAME, "component added");
        self.events.push(SceneEvent::ComponentAdded {
            entity: id,
            component: T::NAME,
        });
        Ok(value)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, SceneError> {
        let id = self.resolve(entity)?;
        Ok(self.store.try_get::<T>(id)?)
    }

    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, SceneError> {
        let id = self.resolve(entity)?;
        Ok(self.store.try_get_mut::<T>(id)?)
    }

    /// Never fails: invalid, foreign and destroyed handles have nothing.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.resolve(entity)
            .is_ok_and(|id| self.store.contains::<T>(id))
    }

    /// Detach and return the `T` of `entity`.
    ///
    /// Tag and Transform live as long as the entity and cannot be removed.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, SceneError> {
        let id = self.resolve(entity)?;
        let required = [TypeId::of::<TagComponent>(), TypeId::of::<TransformComponent>()];
        if required.contains(&TypeId::of::<T>()) {
            return Err(SceneError::RequiredComponent {
                entity: id,
                component: T::NAME,
            });
        }
        let removed = self.store.remove::<T>(id).ok_or(ComponentError::Missing {
            entity: id,
            component: T::NAME,
        })?;
        tracing::trace!(entity = %id, component = T::NAME, "component removed");
        self.events.push(SceneEvent::ComponentRemoved {
            entity: id,
            component: T::NAME,
        });
        Ok(removed)
    }

    /// Names of the components attached to `entity`, sorted.
    pub fn component_names(&self, entity: Entity) -> Result<Vec<&'static str>, SceneError> {
        let id = self.resolve(entity)?;
        Ok(self.store.component_names(id))
    }

    /// Entities holding every component of `Q`, with references to them.
    ///
    /// ```ignore
    /// for (entity, (transform, light)) in scene.view::<(TransformComponent, LightComponent)>() {
    ///     // ...
    /// }
    /// ```
    ///
    /// The iterator borrows the scene, so entities and components cannot be
    /// added or removed until it is dropped.
    pub fn view<Q: Query>(&self) -> impl Iterator<Item = (Entity, Q::Item<'_>)> + '_ {
        let scene = self.id;
        self.store
            .query::<Q>()
            .map(move |(id, item)| (Entity::new(id, scene), item))
    }

    /// In-place mutable walk over every `T`.
    pub fn view_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        let scene = self.id;
        self.store
            .iter_mut::<T>()
            .map(move |(id, value)| (Entity::new(id, scene), value))
    }

    /// First live entity whose tag equals `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Option<Entity> {
        self.view::<(TagComponent,)>()
            .find(|(_, (t,))| t.tag == tag)
            .map(|(entity, _)| entity)
    }

    /// Read-only access to pending events.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Drain and return all pending events.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn resolve(&self, entity: Entity) -> Result<EntityId, SceneError> {
        let id = entity.id();
        if id.is_null() {
            return Err(SceneError::InvalidEntity(id));
        }
        if entity.scene_id() != self.id {
            return Err(SceneError::ForeignEntity(id));
        }
        if !self.alive.contains(&id) {
            return Err(SceneError::InvalidEntity(id));
        }
        Ok(id)
    }
}
