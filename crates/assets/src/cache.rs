use crate::{AssetError, Model, Texture, TextureKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Source of model data. File formats live behind this trait.
pub trait ModelLoader {
    /// Load the model at `path`. Textures should be obtained through
    /// `textures` so models that share an image share one instance.
    fn load(&self, path: &str, textures: &mut TextureCache) -> Result<Model, AssetError>;
}

/// Path-keyed store of shared textures.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: BTreeMap<String, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached texture for `path`, building it with `make` on first use.
    pub fn get_or_insert_with(
        &mut self,
        path: &str,
        make: impl FnOnce() -> Texture,
    ) -> Arc<Texture> {
        if let Some(texture) = self.textures.get(path) {
            return Arc::clone(texture);
        }
        let texture = Arc::new(make());
        tracing::debug!(path, kind = ?texture.kind, "texture cached");
        self.textures.insert(path.to_owned(), Arc::clone(&texture));
        texture
    }

    /// Convenience for placeholder textures with known dimensions.
    pub fn placeholder(&mut self, path: &str, kind: TextureKind) -> Arc<Texture> {
        self.get_or_insert_with(path, || Texture {
            path: path.to_owned(),
            kind,
            width: 1,
            height: 1,
        })
    }

    pub fn get(&self, path: &str) -> Option<&Arc<Texture>> {
        self.textures.get(path)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn purge_unused(&mut self) -> usize {
        let before = self.textures.len();
        self.textures.retain(|_, t| Arc::strong_count(t) > 1);
        before - self.textures.len()
    }
}

/// Shared model and texture cache.
///
/// Entries are reference counted: a model stays alive while any component
/// or this cache holds it. Failed and empty loads are never cached.
#[derive(Debug, Default)]
pub struct AssetCache {
    models: BTreeMap<String, Arc<Model>>,
    textures: TextureCache,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reuse) the model at `path`.
    ///
    /// Returns [`AssetError::EmptyModel`] when the loader produced no meshes,
    /// so callers can skip attaching a model component.
    pub fn load_model(
        &mut self,
        loader: &dyn ModelLoader,
        path: &str,
    ) -> Result<Arc<Model>, AssetError> {
        if let Some(model) = self.models.get(path) {
            return Ok(Arc::clone(model));
        }

        let model = loader.load(path, &mut self.textures)?;
        if model.is_empty() {
            tracing::warn!(path, "model loaded without meshes, not caching");
            return Err(AssetError::EmptyModel(path.to_owned()));
        }

        tracing::debug!(path, meshes = model.mesh_count(), "model cached");
        let model = Arc::new(model);
        self.models.insert(path.to_owned(), Arc::clone(&model));
        Ok(model)
    }

    pub fn model(&self, path: &str) -> Option<&Arc<Model>> {
        self.models.get(path)
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Drop models, then textures, that nothing outside the cache references.
    /// Returns how many entries were released.
    pub fn purge_unused(&mut self) -> usize {
        let before = self.models.len();
        self.models.retain(|_, m| Arc::strong_count(m) > 1);
        let released = before - self.models.len() + self.textures.purge_unused();
        if released > 0 {
            tracing::debug!(released, "purged unused assets");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mesh;
    use std::cell::Cell;

    /// Loader that serves "cube" and "pair" and fails everything else.
    struct FakeLoader {
        calls: Cell<usize>,
    }

    impl FakeLoader {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl ModelLoader for FakeLoader {
        fn load(&self, path: &str, textures: &mut TextureCache) -> Result<Model, AssetError> {
            self.calls.set(self.calls.get() + 1);
            match path {
                "cube" => {
                    let tex = textures.placeholder("shared.png", TextureKind::Diffuse);
                    Ok(Model::new(path, vec![Mesh::cube("cube").with_texture(tex)]))
                }
                "pair" => {
                    let tex = textures.placeholder("shared.png", TextureKind::Diffuse);
                    Ok(Model::new(
                        path,
                        vec![
                            Mesh::cube("a").with_texture(Arc::clone(&tex)),
                            Mesh::cube("b").with_texture(tex),
                        ],
                    ))
                }
                "hollow" => Ok(Model::empty(path)),
                _ => Err(AssetError::Load {
                    path: path.to_owned(),
                    reason: "unknown".into(),
                }),
            }
        }
    }

    #[test]
    fn model_is_loaded_once_and_shared() {
        let loader = FakeLoader::new();
        let mut cache = AssetCache::new();
        let a = cache.load_model(&loader, "cube").unwrap();
        let b = cache.load_model(&loader, "cube").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loader.calls.get(), 1);
        assert_eq!(cache.model_count(), 1);
    }

    #[test]
    fn textures_are_shared_between_models() {
        let loader = FakeLoader::new();
        let mut cache = AssetCache::new();
        let cube = cache.load_model(&loader, "cube").unwrap();
        let pair = cache.load_model(&loader, "pair").unwrap();
        assert!(Arc::ptr_eq(
            &cube.meshes()[0].textures[0],
            &pair.meshes()[1].textures[0]
        ));
        assert_eq!(cache.textures().len(), 1);
    }

    #[test]
    fn empty_model_is_rejected_and_not_cached() {
        let loader = FakeLoader::new();
        let mut cache = AssetCache::new();
        let err = cache.load_model(&loader, "hollow").unwrap_err();
        assert!(matches!(err, AssetError::EmptyModel(_)));
        assert!(cache.model("hollow").is_none());
    }

    #[test]
    fn failed_load_propagates() {
        let loader = FakeLoader::new();
        let mut cache = AssetCache::new();
        let err = cache.load_model(&loader, "missing.obj").unwrap_err();
        assert!(matches!(err, AssetError::Load { .. }));
        assert_eq!(cache.model_count(), 0);
    }

    #[test]
    fn purge_keeps_referenced_assets() {
        let loader = FakeLoader::new();
        let mut cache = AssetCache::new();
        let held = cache.load_model(&loader, "cube").unwrap();
        drop(cache.load_model(&loader, "pair").unwrap());

        // "pair" goes; its texture is still used by the held cube.
        assert_eq!(cache.purge_unused(), 1);
        assert!(cache.model("cube").is_some());
        assert_eq!(cache.textures().len(), 1);

        drop(held);
        // Cube model, then its texture, now only live in the cache.
        assert_eq!(cache.purge_unused(), 2);
        assert!(cache.textures().is_empty());
    }
}
