//! Minimal component storage: one table per component type.
//!
//! Each component type gets its own `BTreeMap` keyed by `EntityId`, held in a
//! type-erased registry. Queries walk the table of the first listed type and
//! keep the rows that also appear in every other listed table.
//!
//! # Invariants
//! - An entity holds at most one value per component type.
//! - Iteration order is ascending `EntityId`, which is creation order.
//! - Query iterators borrow the store immutably; structural mutation while a
//!   query is alive does not compile.

mod query;
mod store;

pub use query::Query;
pub use store::ComponentStore;

use plume_common::EntityId;

/// A typed attribute bag that can be attached to an entity.
pub trait Component: 'static {
    /// Name used in errors, logs and the inspector.
    const NAME: &'static str;
}

/// Errors from component table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error("entity {entity} already has a {component} component")]
    Duplicate {
        entity: EntityId,
        component: &'static str,
    },
    #[error("entity {entity} has no {component} component")]
    Missing {
        entity: EntityId,
        component: &'static str,
    },
}
