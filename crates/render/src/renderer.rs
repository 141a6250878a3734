use crate::camera::Camera;
use crate::config::RenderSettings;
use crate::device::{DrawError, RenderDevice};
use crate::shader::{Shader, uniforms};
use plume_assets::{Mesh, Model, TextureKind};
use plume_scene::{LightComponent, ModelComponent, Scene, TransformComponent};

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// `draw_indexed` calls issued, successful or not.
    pub draw_calls: u32,
    pub meshes_drawn: u32,
    /// Model entities whose every mesh drew.
    pub entities_drawn: u32,
    /// Model entities abandoned after a bind or draw error.
    pub failed_draws: u32,
    pub light_bound: bool,
}

/// Walks a scene once per frame and issues shader uploads and draw calls.
///
/// Reads the scene only. The first (Transform, Light) entity feeds the light
/// uniforms; when there is none they keep whatever the shader last held.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    clear_color: [f32; 4],
    last_frame: FrameStats,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}

impl SceneRenderer {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            clear_color: settings.clear_color,
            last_frame: FrameStats::default(),
        }
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    pub fn render_frame<S, D>(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        shader: &mut S,
        device: &mut D,
    ) -> FrameStats
    where
        S: Shader + ?Sized,
        D: RenderDevice + ?Sized,
    {
        let mut stats = FrameStats::default();

        device.clear(self.clear_color);
        shader.bind();
        shader.upload_mat4(uniforms::VIEW, &camera.view_matrix());
        shader.upload_mat4(uniforms::PROJECTION, &camera.projection_matrix());
        shader.upload_vec3(uniforms::VIEW_POS, camera.position());

        let light = scene
            .view::<(TransformComponent, LightComponent)>()
            .next();
        match light {
            Some((entity, (transform, light))) => {
                shader.upload_vec3(uniforms::LIGHT_POS, transform.translation);
                shader.upload_vec3(uniforms::LIGHT_COLOR, light.radiance());
                stats.light_bound = true;
                tracing::trace!(%entity, "light bound");
            }
            None => tracing::trace!("no light in scene"),
        }

        for (entity, (transform, model)) in scene.view::<(TransformComponent, ModelComponent)>() {
            shader.upload_mat4(uniforms::MODEL, &transform.matrix());
            match draw_model(model.model(), shader, device, &mut stats) {
                Ok(()) => stats.entities_drawn += 1,
                Err(error) => {
                    stats.failed_draws += 1;
                    tracing::warn!(%entity, %error, "draw failed, skipping entity");
                }
            }
        }

        tracing::trace!(
            draw_calls = stats.draw_calls,
            entities = stats.entities_drawn,
            "frame rendered"
        );
        self.last_frame = stats;
        stats
    }
}

/// Draw every sub-mesh of `model`, stopping at the first failure.
pub fn draw_model<S, D>(
    model: &Model,
    shader: &mut S,
    device: &mut D,
    stats: &mut FrameStats,
) -> Result<(), DrawError>
where
    S: Shader + ?Sized,
    D: RenderDevice + ?Sized,
{
    for mesh in model.meshes() {
        bind_textures(mesh, shader, device)?;
        stats.draw_calls += 1;
        device.draw_indexed(mesh)?;
        stats.meshes_drawn += 1;
    }
    Ok(())
}

/// Bind textures to consecutive slots and point the sampler uniforms at them.
/// Samplers are numbered from 1 per kind: `texture_diffuse1`, `texture_diffuse2`,
/// `texture_specular1`.
fn bind_textures<S, D>(mesh: &Mesh, shader: &mut S, device: &mut D) -> Result<(), DrawError>
where
    S: Shader + ?Sized,
    D: RenderDevice + ?Sized,
{
    let (mut diffuse, mut specular) = (0u32, 0u32);
    for (slot, texture) in mesh.textures.iter().enumerate() {
        let number = match texture.kind {
            TextureKind::Diffuse => {
                diffuse += 1;
                diffuse
            }
            TextureKind::Specular => {
                specular += 1;
                specular
            }
        };
        let slot = slot as u32;
        device.bind_texture(slot, texture)?;
        shader.set_int(
            &format!("{}{number}", texture.kind.uniform_prefix()),
            slot as i32,
        );
    }
    Ok(())
}
