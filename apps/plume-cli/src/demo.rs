//! Built-in demo content: a procedural model loader, the demo scene and a
//! scripted input session.

use glam::Vec3;
use plume_assets::{AssetCache, AssetError, Mesh, Model, ModelLoader, TextureCache, TextureKind};
use plume_input::{InputEvent, Key, MouseButton};
use plume_scene::{Entity, LightComponent, ModelComponent, Scene, TransformComponent};

pub const CUBE_PATH: &str = "models/cube.obj";
pub const PILLARS_PATH: &str = "models/pillars.obj";
pub const EMPTY_PATH: &str = "models/empty.obj";

/// Builds models procedurally instead of reading files.
#[derive(Debug, Default)]
pub struct DemoLoader;

impl ModelLoader for DemoLoader {
    fn load(&self, path: &str, textures: &mut TextureCache) -> Result<Model, AssetError> {
        let diffuse = textures.placeholder("textures/crate_diffuse.png", TextureKind::Diffuse);
        let specular = textures.placeholder("textures/crate_specular.png", TextureKind::Specular);
        let model = match path {
            CUBE_PATH => Model::new(
                "cube",
                vec![Mesh::cube("cube").with_texture(diffuse).with_texture(specular)],
            ),
            PILLARS_PATH => Model::new(
                "pillars",
                vec![
                    Mesh::cube("pillar_left").with_texture(diffuse.clone()),
                    Mesh::cube("pillar_right").with_texture(diffuse),
                ],
            ),
            EMPTY_PATH => Model::empty("empty"),
            other => {
                return Err(AssetError::Load {
                    path: other.to_owned(),
                    reason: "no such demo model".into(),
                });
            }
        };
        Ok(model)
    }
}

/// Attach the model at `path` to `entity`. Load failures and empty models are
/// logged and leave the entity without a model.
pub fn attach_model(
    scene: &mut Scene,
    assets: &mut AssetCache,
    loader: &dyn ModelLoader,
    entity: Entity,
    path: &str,
) -> anyhow::Result<bool> {
    let model = match assets.load_model(loader, path) {
        Ok(model) => model,
        Err(error) => {
            tracing::warn!(%entity, path, %error, "model not attached");
            return Ok(false);
        }
    };
    scene.add_component(entity, ModelComponent::new(model)?)?;
    Ok(true)
}

/// Two model entities, one light, and one entity whose model fails to load.
pub fn build_scene(scene: &mut Scene, assets: &mut AssetCache) -> anyhow::Result<()> {
    let loader = DemoLoader;

    let crate_entity = scene.create_entity("Crate");
    attach_model(scene, assets, &loader, crate_entity, CUBE_PATH)?;

    let pillars = scene.create_entity("Pillars");
    attach_model(scene, assets, &loader, pillars, PILLARS_PATH)?;
    *scene.get_component_mut::<TransformComponent>(pillars)? = TransformComponent {
        translation: Vec3::new(3.0, 0.0, -2.0),
        rotation: Vec3::new(0.0, 45_f32.to_radians(), 0.0),
        scale: Vec3::new(0.5, 2.0, 0.5),
    };

    let lamp = scene.create_entity("Lamp");
    scene.add_component(lamp, LightComponent::new(Vec3::new(1.0, 0.95, 0.8), 1.5))?;
    scene
        .get_component_mut::<TransformComponent>(lamp)?
        .translation = Vec3::new(1.2, 1.0, 2.0);

    let placeholder = scene.create_entity("");
    attach_model(scene, assets, &loader, placeholder, EMPTY_PATH)?;

    tracing::info!(
        entities = scene.entity_count(),
        models = assets.model_count(),
        "demo scene ready"
    );
    Ok(())
}

/// Input events for `frame` of the scripted session: fly forward while
/// looking around, roll, zoom, then release everything.
pub fn scripted_events(frame: u32) -> Vec<InputEvent> {
    let mut events = Vec::new();
    match frame {
        0 => {
            events.push(InputEvent::KeyDown(Key::W));
            events.push(InputEvent::MouseButtonDown(MouseButton::Right));
        }
        30 => {
            events.push(InputEvent::KeyUp(Key::W));
            events.push(InputEvent::KeyDown(Key::E));
        }
        45 => {
            events.push(InputEvent::KeyUp(Key::E));
            events.push(InputEvent::MouseWheel { y: 5 });
        }
        60 => events.push(InputEvent::MouseButtonUp(MouseButton::Right)),
        _ => {}
    }
    if frame < 60 {
        events.push(InputEvent::MouseMotion { dx: 4, dy: -2 });
    }
    events
}
