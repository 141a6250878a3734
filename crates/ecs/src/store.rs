use crate::query::Query;
use crate::{Component, ComponentError};
use plume_common::EntityId;
use std::any::{Any, TypeId};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Object-safe face of a typed table, so the registry can remove an entity
/// from every table without knowing the concrete component types.
trait ErasedTable {
    fn remove_entity(&mut self, entity: EntityId) -> bool;
    fn contains(&self, entity: EntityId) -> bool;
    fn component_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Table<T: Component> {
    rows: BTreeMap<EntityId, T>,
}

impl<T: Component> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Component> ErasedTable for Table<T> {
    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.rows.remove(&entity).is_some()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.rows.contains_key(&entity)
    }

    fn component_name(&self) -> &'static str {
        T::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry of per-type component tables.
#[derive(Default)]
pub struct ComponentStore {
    tables: HashMap<TypeId, Box<dyn ErasedTable>>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table<T: Component>(&self) -> Option<&Table<T>> {
        self.tables
            .get(&TypeId::of::<T>())
            .and_then(|t| t.as_any().downcast_ref::<Table<T>>())
    }

    fn table_mut<T: Component>(&mut self) -> Option<&mut Table<T>> {
        self.tables
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.as_any_mut().downcast_mut::<Table<T>>())
    }

    fn table_or_insert<T: Component>(&mut self) -> &mut Table<T> {
        self.tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                tracing::trace!(component = T::NAME, "registering component table");
                Box::new(Table::<T>::default())
            })
            .as_any_mut()
            .downcast_mut::<Table<T>>()
            .expect("component table is keyed by its own TypeId")
    }

    /// Attach `value` to `entity`. Fails if the entity already has a `T`.
    pub fn insert<T: Component>(
        &mut self,
        entity: EntityId,
        value: T,
    ) -> Result<&mut T, ComponentError> {
        match self.table_or_insert::<T>().rows.entry(entity) {
            Entry::Occupied(_) => Err(ComponentError::Duplicate {
                entity,
                component: T::NAME,
            }),
            Entry::Vacant(slot) => Ok(slot.insert(value)),
        }
    }

    /// Detach and return the `T` of `entity`, if any.
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        self.table_mut::<T>()?.rows.remove(&entity)
    }

    /// Drop every component of `entity`. Returns the names of the removed types.
    pub fn remove_entity(&mut self, entity: EntityId) -> Vec<&'static str> {
        let mut removed: Vec<&'static str> = self
            .tables
            .values_mut()
            .filter_map(|t| t.remove_entity(entity).then(|| t.component_name()))
            .collect();
        removed.sort_unstable();
        removed
    }

    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.table::<T>()?.rows.get(&entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.table_mut::<T>()?.rows.get_mut(&entity)
    }

    /// Like [`get`](Self::get) but reports which component was missing.
    pub fn try_get<T: Component>(&self, entity: EntityId) -> Result<&T, ComponentError> {
        self.get::<T>(entity).ok_or(ComponentError::Missing {
            entity,
            component: T::NAME,
        })
    }

    pub fn try_get_mut<T: Component>(
        &mut self,
        entity: EntityId,
    ) -> Result<&mut T, ComponentError> {
        self.get_mut::<T>(entity).ok_or(ComponentError::Missing {
            entity,
            component: T::NAME,
        })
    }

    pub fn contains<T: Component>(&self, entity: EntityId) -> bool {
        self.table::<T>().is_some_and(|t| t.rows.contains_key(&entity))
    }

    /// Number of entities holding a `T`.
    pub fn count<T: Component>(&self) -> usize {
        self.table::<T>().map_or(0, |t| t.rows.len())
    }

    /// Ids of every entity holding a `T`, ascending.
    pub fn entity_ids<T: Component>(&self) -> Box<dyn Iterator<Item = EntityId> + '_> {
        match self.table::<T>() {
            Some(t) => Box::new(t.rows.keys().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Names of the component types attached to `entity`, sorted.
    pub fn component_names(&self, entity: EntityId) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .tables
            .values()
            .filter(|t| t.contains(entity))
            .map(|t| t.component_name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Every entity holding all components of `Q`, ascending by id.
    pub fn query<Q: Query>(&self) -> impl Iterator<Item = (EntityId, Q::Item<'_>)> + '_ {
        Q::candidates(self)
            .filter_map(move |entity| Q::fetch(self, entity).map(|item| (entity, item)))
    }

    /// Mutable walk over a single component table.
    pub fn iter_mut<T: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> + '_ {
        self.table_mut::<T>()
            .into_iter()
            .flat_map(|t| t.rows.iter_mut().map(|(id, value)| (*id, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Label(&'static str);
    impl Component for Label {
        const NAME: &'static str = "Label";
    }

    #[derive(Debug, PartialEq)]
    struct Weight(f32);
    impl Component for Weight {
        const NAME: &'static str = "Weight";
    }

    #[test]
    fn insert_get_remove() {
        let mut store = ComponentStore::new();
        let e = EntityId(0);
        store.insert(e, Label("a")).unwrap();
        assert_eq!(store.get::<Label>(e), Some(&Label("a")));
        assert!(store.contains::<Label>(e));
        assert!(!store.contains::<Weight>(e));

        assert_eq!(store.remove::<Label>(e), Some(Label("a")));
        assert!(store.get::<Label>(e).is_none());
    }

    #[test]
    fn duplicate_insert_fails_and_keeps_original() {
        let mut store = ComponentStore::new();
        let e = EntityId(3);
        store.insert(e, Weight(1.0)).unwrap();
        let err = store.insert(e, Weight(2.0)).unwrap_err();
        assert_eq!(
            err,
            ComponentError::Duplicate {
                entity: e,
                component: "Weight"
            }
        );
        assert_eq!(store.get::<Weight>(e), Some(&Weight(1.0)));
    }

    #[test]
    fn try_get_reports_missing_component() {
        let store = ComponentStore::new();
        let err = store.try_get::<Label>(EntityId(1)).unwrap_err();
        assert!(matches!(err, ComponentError::Missing { component: "Label", .. }));
    }

    #[test]
    fn insert_returns_mutable_reference() {
        let mut store = ComponentStore::new();
        let e = EntityId(0);
        store.insert(e, Weight(1.0)).unwrap().0 = 4.0;
        assert_eq!(store.get::<Weight>(e), Some(&Weight(4.0)));
    }

    #[test]
    fn remove_entity_clears_every_table() {
        let mut store = ComponentStore::new();
        let e = EntityId(1);
        store.insert(e, Label("x")).unwrap();
        store.insert(e, Weight(2.0)).unwrap();
        store.insert(EntityId(2), Weight(5.0)).unwrap();

        assert_eq!(store.remove_entity(e), vec!["Label", "Weight"]);
        assert!(store.component_names(e).is_empty());
        assert_eq!(store.count::<Weight>(), 1);
    }

    #[test]
    fn query_matches_only_entities_with_all_components() {
        let mut store = ComponentStore::new();
        store.insert(EntityId(0), Label("only label")).unwrap();
        store.insert(EntityId(1), Label("both")).unwrap();
        store.insert(EntityId(1), Weight(1.5)).unwrap();
        store.insert(EntityId(2), Weight(9.0)).unwrap();

        let rows: Vec<_> = store
            .query::<(Label, Weight)>()
            .map(|(id, (label, weight))| (id, label.0, weight.0))
            .collect();
        assert_eq!(rows, vec![(EntityId(1), "both", 1.5)]);
    }

    #[test]
    fn query_order_is_ascending_id() {
        let mut store = ComponentStore::new();
        for id in [5, 1, 3] {
            store.insert(EntityId(id), Weight(id as f32)).unwrap();
        }
        let ids: Vec<EntityId> = store.query::<(Weight,)>().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(3), EntityId(5)]);
    }

    #[test]
    fn query_on_unregistered_type_is_empty() {
        let store = ComponentStore::new();
        assert_eq!(store.query::<(Label, Weight)>().count(), 0);
    }

    #[test]
    fn iter_mut_edits_in_place() {
        let mut store = ComponentStore::new();
        store.insert(EntityId(0), Weight(1.0)).unwrap();
        store.insert(EntityId(1), Weight(2.0)).unwrap();
        for (_, w) in store.iter_mut::<Weight>() {
            w.0 *= 10.0;
        }
        assert_eq!(store.get::<Weight>(EntityId(1)), Some(&Weight(20.0)));
    }
}
