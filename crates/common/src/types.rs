use std::fmt;
use uuid::Uuid;

/// Identifier of an entity inside a single scene.
///
/// Ids are handed out by a monotonic counter and are never reused for the
/// lifetime of the owning scene. `EntityId::NULL` never names a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Sentinel for "no entity".
    pub const NULL: Self = Self(u64::MAX);

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("#null")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Unique identifier of a scene instance.
///
/// Every scene draws a fresh random id, so handles minted by one scene are
/// never accepted by another one, even after the first is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub Uuid);

impl SceneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id carried by default-constructed (invalid) entity handles.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_id_uniqueness() {
        let a = SceneId::new();
        let b = SceneId::new();
        assert_ne!(a, b);
        assert_ne!(a, SceneId::nil());
    }

    #[test]
    fn default_entity_id_is_null() {
        assert!(EntityId::default().is_null());
        assert!(!EntityId(0).is_null());
    }

    #[test]
    fn entity_id_display() {
        assert_eq!(EntityId(7).to_string(), "#7");
        assert_eq!(EntityId::NULL.to_string(), "#null");
    }
}
