use crate::{Component, ComponentStore};
use plume_common::EntityId;

/// A tuple of component types fetched together by [`ComponentStore::query`].
///
/// Implemented for tuples of one to four components. The first element
/// drives iteration, so put the rarest component first when it matters.
pub trait Query: 'static {
    type Item<'a>;

    /// Entities that might match: every holder of the first component.
    fn candidates(store: &ComponentStore) -> Box<dyn Iterator<Item = EntityId> + '_>;

    /// All components of the tuple for `entity`, or `None` if any is absent.
    fn fetch(store: &ComponentStore, entity: EntityId) -> Option<Self::Item<'_>>;
}

macro_rules! impl_query {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Component $(, $rest: Component)*> Query for ($first, $($rest,)*) {
            type Item<'a> = (&'a $first, $(&'a $rest,)*);

            fn candidates(store: &ComponentStore) -> Box<dyn Iterator<Item = EntityId> + '_> {
                store.entity_ids::<$first>()
            }

            fn fetch(store: &ComponentStore, entity: EntityId) -> Option<Self::Item<'_>> {
                Some((store.get::<$first>(entity)?, $(store.get::<$rest>(entity)?,)*))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
