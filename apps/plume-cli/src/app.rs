use crate::demo;
use plume_assets::AssetCache;
use plume_input::{Input, InputEvent, InputState, Key};
use plume_render::recording::{RecordingDevice, RecordingShader};
use plume_render::{Camera, EngineConfig, FrameStats, SceneRenderer};
use plume_scene::Scene;
use plume_tools::SceneInspector;

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub frames: u32,
    pub draw_calls: u64,
    pub failed_draws: u64,
    pub quit_requested: bool,
}

/// Host application: owns the scene, camera and input, and drives frames
/// through the recording backends.
pub struct App {
    scene: Scene,
    assets: AssetCache,
    camera: Camera,
    input: Input,
    renderer: SceneRenderer,
    inspector: SceneInspector,
    shader: RecordingShader,
    device: RecordingDevice,
}

impl App {
    pub fn new(config: &EngineConfig) -> anyhow::Result<Self> {
        let mut scene = Scene::new();
        let mut assets = AssetCache::new();
        demo::build_scene(&mut scene, &mut assets)?;

        Ok(Self {
            scene,
            assets,
            camera: Camera::new(&config.camera),
            input: Input::new(),
            renderer: SceneRenderer::new(&config.renderer),
            inspector: SceneInspector::new(),
            shader: RecordingShader::new(),
            device: RecordingDevice::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn inspector(&self) -> &SceneInspector {
        &self.inspector
    }

    /// Split borrow for editor panels that read the scene while updating
    /// the selection.
    pub fn scene_and_inspector(&mut self) -> (&Scene, &mut SceneInspector) {
        (&self.scene, &mut self.inspector)
    }

    pub fn device(&self) -> &RecordingDevice {
        &self.device
    }

    /// One frame: scene events, input, camera, render.
    pub fn frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        dt: f32,
    ) -> FrameStats {
        for event in self.scene.drain_events() {
            tracing::debug!(?event, "scene event");
        }

        self.input.begin_frame();
        for event in events {
            self.input.handle_event(event);
        }

        self.camera.update(&self.input, dt);

        self.device.reset();
        self.shader.clear_log();
        let stats = self.renderer.render_frame(
            &self.scene,
            &self.camera,
            &mut self.shader,
            &mut self.device,
        );
        self.inspector.record_frame(stats);
        stats
    }

    pub fn should_quit(&self) -> bool {
        self.input.quit_requested() || self.input.is_key_pressed(Key::Escape)
    }

    /// Run up to `frames` frames, pulling events from `script`, stopping
    /// early on a quit request.
    pub fn run<F, I>(&mut self, frames: u32, dt: f32, mut script: F) -> SessionReport
    where
        F: FnMut(u32) -> I,
        I: IntoIterator<Item = InputEvent>,
    {
        let mut report = SessionReport::default();
        for frame in 0..frames {
            let stats = self.frame(script(frame), dt);
            report.frames += 1;
            report.draw_calls += u64::from(stats.draw_calls);
            report.failed_draws += u64::from(stats.failed_draws);
            tracing::debug!(
                frame,
                draw_calls = stats.draw_calls,
                meshes = stats.meshes_drawn,
                light = stats.light_bound,
                "frame"
            );
            if self.should_quit() {
                report.quit_requested = true;
                tracing::info!(frame, "quit requested");
                break;
            }
        }
        tracing::info!(
            frames = report.frames,
            draw_calls = report.draw_calls,
            cached_models = self.assets.model_count(),
            "session finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_input::MouseButton;

    fn app() -> App {
        App::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn every_frame_draws_the_demo_meshes() {
        let mut app = app();
        let stats = app.frame(Vec::new(), 0.016);
        // cube (1 mesh) + pillars (2 meshes)
        assert_eq!(stats.draw_calls, 3);
        assert_eq!(stats.entities_drawn, 2);
        assert!(stats.light_bound);
        assert_eq!(app.inspector().meshes_drawn(), 3);
        assert_eq!(app.device().draw_count(), 3);
    }

    #[test]
    fn scene_events_are_drained_each_frame() {
        let mut app = app();
        assert!(!app.scene().events().is_empty());
        app.frame(Vec::new(), 0.016);
        assert!(app.scene().events().is_empty());
        app.run(5, 0.016, demo::scripted_events);
        assert_eq!(SceneInspector::summary(app.scene()).pending_events, 0);
    }

    #[test]
    fn run_stops_at_frame_count() {
        let mut app = app();
        let report = app.run(10, 0.016, demo::scripted_events);
        assert_eq!(report.frames, 10);
        assert_eq!(report.draw_calls, 30);
        assert!(!report.quit_requested);
        assert!(app.camera().position().z < 3.0);
    }

    #[test]
    fn quit_event_ends_session_early() {
        let mut app = app();
        let report = app.run(100, 0.016, |frame| {
            if frame == 4 {
                vec![InputEvent::Quit]
            } else {
                vec![]
            }
        });
        assert_eq!(report.frames, 5);
        assert!(report.quit_requested);
    }

    #[test]
    fn escape_key_quits() {
        let mut app = app();
        let report = app.run(100, 0.016, |frame| {
            if frame == 2 {
                vec![InputEvent::KeyDown(Key::Escape)]
            } else {
                vec![]
            }
        });
        assert_eq!(report.frames, 3);
    }

    #[test]
    fn scripted_session_keeps_camera_in_range() {
        let mut app = app();
        app.run(90, 0.016, demo::scripted_events);
        let camera = app.camera();
        assert!(camera.pitch().abs() <= 89.0);
        assert_eq!(camera.fov(), 40.0);
        assert!(camera.roll() > 0.0);
    }

    #[test]
    fn look_is_inactive_without_right_button() {
        let mut app = app();
        app.frame([InputEvent::MouseMotion { dx: 50, dy: 50 }], 0.016);
        assert_eq!(app.camera().yaw(), -90.0);
        app.frame(
            [
                InputEvent::MouseButtonDown(MouseButton::Right),
                InputEvent::MouseMotion { dx: 50, dy: 0 },
            ],
            0.016,
        );
        assert!((app.camera().yaw() + 85.0).abs() < 1e-4);
    }
}
