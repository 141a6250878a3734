use crate::SceneError;
use glam::{Mat4, Vec3};
use plume_assets::Model;
use plume_ecs::Component;
use std::sync::Arc;

/// Display name of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComponent {
    pub tag: String,
}

impl TagComponent {
    /// Name given to entities created without one.
    pub const DEFAULT_TAG: &'static str = "Entity";

    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            tag: if tag.is_empty() {
                Self::DEFAULT_TAG.to_owned()
            } else {
                tag
            },
        }
    }
}

impl Component for TagComponent {
    const NAME: &'static str = "Tag";
}

/// Local-to-world placement. Rotation is Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TransformComponent {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// `T * Rx * Ry * Rz * S`. Shaders and saved poses depend on this order.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z);
        Mat4::from_translation(self.translation) * rotation * Mat4::from_scale(self.scale)
    }
}

impl Component for TransformComponent {
    const NAME: &'static str = "Transform";
}

/// Point light color and strength. Position comes from the entity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightComponent {
    pub color: Vec3,
    intensity: f32,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl LightComponent {
    pub fn new(color: Vec3, intensity: f32) -> Self {
        let mut light = Self {
            color,
            intensity: 0.0,
        };
        light.set_intensity(intensity);
        light
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Negative values clamp to zero; non-finite values are ignored.
    pub fn set_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.intensity = intensity.max(0.0);
        }
    }

    /// Color scaled by intensity, as uploaded to shaders.
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}

impl Component for LightComponent {
    const NAME: &'static str = "Light";
}

/// Shared reference to a loaded model. Never wraps an empty model.
#[derive(Debug, Clone)]
pub struct ModelComponent {
    model: Arc<Model>,
}

impl ModelComponent {
    /// Wrap `model`, refusing one whose mesh list is empty (a failed load).
    pub fn new(model: Arc<Model>) -> Result<Self, SceneError> {
        if model.is_empty() {
            tracing::warn!(model = %model.name, "refusing to attach model without meshes");
            return Err(SceneError::EmptyModel(model.name.clone()));
        }
        Ok(Self { model })
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn mesh_count(&self) -> usize {
        self.model.mesh_count()
    }
}

impl Component for ModelComponent {
    const NAME: &'static str = "Model";
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_assets::Mesh;

    #[test]
    fn empty_tag_falls_back_to_default() {
        assert_eq!(TagComponent::new("").tag, "Entity");
        assert_eq!(TagComponent::new("Cube").tag, "Cube");
    }

    #[test]
    fn transform_default_is_identity() {
        let t = TransformComponent::default();
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_only_matrix_is_pure_translate() {
        let t = TransformComponent::from_translation(Vec3::new(1.0, -2.0, 3.5));
        assert!(
            t.matrix()
                .abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, -2.0, 3.5)), 1e-6)
        );
    }

    #[test]
    fn composition_order_is_translate_rotate_xyz_scale() {
        let t = TransformComponent {
            translation: Vec3::new(4.0, 5.0, 6.0),
            rotation: Vec3::new(0.3, -1.1, 2.0),
            scale: Vec3::new(2.0, 0.5, 1.5),
        };
        let expected = Mat4::from_translation(t.translation)
            * Mat4::from_rotation_x(0.3)
            * Mat4::from_rotation_y(-1.1)
            * Mat4::from_rotation_z(2.0)
            * Mat4::from_scale(t.scale);
        assert!(t.matrix().abs_diff_eq(expected, 1e-6));

        // A different Euler order gives a different pose.
        let zyx = Mat4::from_translation(t.translation)
            * Mat4::from_rotation_z(2.0)
            * Mat4::from_rotation_y(-1.1)
            * Mat4::from_rotation_x(0.3)
            * Mat4::from_scale(t.scale);
        assert!(!t.matrix().abs_diff_eq(zyx, 1e-3));
    }

    #[test]
    fn light_radiance_and_intensity_clamp() {
        let light = LightComponent::new(Vec3::ONE, 2.0);
        assert_eq!(light.radiance(), Vec3::splat(2.0));

        let mut light = LightComponent::new(Vec3::new(1.0, 0.5, 0.0), -3.0);
        assert_eq!(light.intensity(), 0.0);
        light.set_intensity(f32::NAN);
        assert_eq!(light.intensity(), 0.0);
        light.set_intensity(4.0);
        assert_eq!(light.radiance(), Vec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn model_component_rejects_empty_model() {
        let err = ModelComponent::new(Arc::new(Model::empty("broken.fbx"))).unwrap_err();
        assert_eq!(err, SceneError::EmptyModel("broken.fbx".into()));

        let mc = ModelComponent::new(Arc::new(Model::new("cube", vec![Mesh::cube("c")]))).unwrap();
        assert_eq!(mc.mesh_count(), 1);
    }
}
