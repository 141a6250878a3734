use glam::Vec3;
use plume_common::EntityId;
use plume_render::FrameStats;
use plume_scene::{
    Entity, LightComponent, ModelComponent, Scene, SceneError, TagComponent, TransformComponent,
};
use std::fmt;

/// Upper bound of the intensity editor. The component itself accepts more.
pub const MAX_EDITOR_INTENSITY: f32 = 10.0;
/// Longest tag the name field accepts, in bytes.
pub const MAX_TAG_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectorError {
    #[error("no entity selected")]
    NoSelection,
    #[error("selected entity has no {0} component")]
    MissingComponent(&'static str),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Scene-level counters shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub entity_count: usize,
    pub model_count: usize,
    pub light_count: usize,
    pub pending_events: usize,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: entities={} models={} lights={} pending_events={}",
            self.entity_count, self.model_count, self.light_count, self.pending_events
        )
    }
}

/// One line of the outliner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlinerRow {
    pub entity: Entity,
    pub tag: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProperties {
    pub color: Vec3,
    pub intensity: f32,
}

/// Snapshot of what the properties panel shows for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperties {
    pub id: EntityId,
    pub tag: String,
    pub transform: TransformComponent,
    pub light: Option<LightProperties>,
    /// Mesh count of the attached model, if any.
    pub model_meshes: Option<usize>,
}

impl fmt::Display for EntityProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.transform;
        writeln!(f, "{} '{}'", self.id, self.tag)?;
        let (p, r, s) = (t.translation, t.rotation, t.scale);
        writeln!(f, "  translation=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        writeln!(f, "  rotation=({:.2}, {:.2}, {:.2})", r.x, r.y, r.z)?;
        writeln!(f, "  scale=({:.2}, {:.2}, {:.2})", s.x, s.y, s.z)?;
        if let Some(light) = self.light {
            writeln!(
                f,
                "  light color=({:.2}, {:.2}, {:.2}) intensity={:.2}",
                light.color.x, light.color.y, light.color.z, light.intensity
            )?;
        }
        if let Some(meshes) = self.model_meshes {
            writeln!(f, "  model meshes={meshes}")?;
        }
        Ok(())
    }
}

/// Editor state over a scene: selection plus the last frame's statistics.
#[derive(Debug, Default)]
pub struct SceneInspector {
    selected: Option<Entity>,
    last_frame: FrameStats,
}

impl SceneInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            entity_count: scene.entity_count(),
            model_count: scene.view::<(ModelComponent,)>().count(),
            light_count: scene.view::<(LightComponent,)>().count(),
            pending_events: scene.events().len(),
        }
    }

    /// Every tagged entity in creation order.
    pub fn outliner(&self, scene: &Scene) -> Vec<OutlinerRow> {
        let selected = self.selected(scene);
        scene
            .view::<(TagComponent,)>()
            .map(|(entity, (tag,))| OutlinerRow {
                entity,
                tag: tag.tag.clone(),
                selected: selected == Some(entity),
            })
            .collect()
    }

    pub fn select(&mut self, scene: &Scene, entity: Entity) -> Result<(), InspectorError> {
        scene.get_component::<TagComponent>(entity)?;
        tracing::debug!(%entity, "selected");
        self.selected = Some(entity);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self, scene: &Scene) -> Option<Entity> {
        self.selected.filter(|e| scene.contains(*e))
    }

    pub fn properties(&self, scene: &Scene) -> Option<EntityProperties> {
        let entity = self.selected(scene)?;
        Self::inspect(scene, entity).ok()
    }

    /// Properties of any live entity, selected or not.
    pub fn inspect(scene: &Scene, entity: Entity) -> Result<EntityProperties, InspectorError> {
        let tag = scene.get_component::<TagComponent>(entity)?.tag.clone();
        let transform = *scene.get_component::<TransformComponent>(entity)?;
        let light = scene
            .get_component::<LightComponent>(entity)
            .ok()
            .map(|l| LightProperties {
                color: l.color,
                intensity: l.intensity(),
            });
        let model_meshes = scene
            .get_component::<ModelComponent>(entity)
            .ok()
            .map(ModelComponent::mesh_count);
        Ok(EntityProperties {
            id: entity.id(),
            tag,
            transform,
            light,
            model_meshes,
        })
    }

    /// Rename the selection. Empty names fall back to the default tag and
    /// long names are cut at [`MAX_TAG_LEN`] bytes on a char boundary.
    pub fn rename(&self, scene: &mut Scene, name: &str) -> Result<(), InspectorError> {
        let entity = self.require_selection(scene)?;
        let mut end = name.len().min(MAX_TAG_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        let tag = TagComponent::new(&name[..end]);
        tracing::debug!(%entity, tag = %tag.tag, "renamed");
        *scene.get_component_mut::<TagComponent>(entity)? = tag;
        Ok(())
    }

    pub fn edit_transform(
        &self,
        scene: &mut Scene,
        edit: impl FnOnce(&mut TransformComponent),
    ) -> Result<TransformComponent, InspectorError> {
        let entity = self.require_selection(scene)?;
        let transform = scene.get_component_mut::<TransformComponent>(entity)?;
        edit(transform);
        Ok(*transform)
    }

    pub fn set_light_color(&self, scene: &mut Scene, color: Vec3) -> Result<(), InspectorError> {
        let light = self.selected_light(scene)?;
        light.color = color.clamp(Vec3::ZERO, Vec3::ONE);
        Ok(())
    }

    /// Set intensity within the editor range `[0, MAX_EDITOR_INTENSITY]`.
    /// Returns the stored value.
    pub fn set_light_intensity(
        &self,
        scene: &mut Scene,
        intensity: f32,
    ) -> Result<f32, InspectorError> {
        let light = self.selected_light(scene)?;
        if intensity.is_finite() {
            light.set_intensity(intensity.clamp(0.0, MAX_EDITOR_INTENSITY));
        }
        Ok(light.intensity())
    }

    pub fn record_frame(&mut self, stats: FrameStats) {
        self.last_frame = stats;
    }

    /// Meshes drawn in the last recorded frame.
    pub fn meshes_drawn(&self) -> u32 {
        self.last_frame.meshes_drawn
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    fn require_selection(&self, scene: &Scene) -> Result<Entity, InspectorError> {
        self.selected(scene).ok_or(InspectorError::NoSelection)
    }

    fn selected_light<'s>(
        &self,
        scene: &'s mut Scene,
    ) -> Result<&'s mut LightComponent, InspectorError> {
        let entity = self.require_selection(scene)?;
        scene
            .get_component_mut::<LightComponent>(entity)
            .map_err(|_| InspectorError::MissingComponent("Light"))
    }
}
