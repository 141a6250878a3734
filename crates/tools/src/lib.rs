//! Editor tooling: the data side of the outliner and properties panels.
//!
//! Everything here works on a [`Scene`](plume_scene::Scene) without a UI, so
//! panels can be driven from a GUI, a CLI, or tests.
//!
//! # Invariants
//! - Inspection never mutates the scene; edits go through `&mut Scene` and
//!   only touch the selected entity.
//! - A selection that points at a destroyed entity reads as no selection.

mod inspector;

pub use inspector::{
    EntityProperties, InspectorError, LightProperties, MAX_EDITOR_INTENSITY, MAX_TAG_LEN,
    OutlinerRow, SceneInspector, SceneSummary,
};
