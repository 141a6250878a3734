//! Headless backends that record what the traversal asked for.

use crate::device::{DrawError, RenderDevice};
use crate::shader::Shader;
use glam::{Mat4, Vec3};
use plume_assets::{Mesh, Texture};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec3(Vec3),
    Int(i32),
}

/// Shader that stores the latest value of every uniform and keeps an upload log.
#[derive(Debug, Default)]
pub struct RecordingShader {
    binds: u32,
    current: BTreeMap<String, UniformValue>,
    uploads: Vec<(String, UniformValue)>,
}

impl RecordingShader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_count(&self) -> u32 {
        self.binds
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.current.get(name).copied()
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.uniform(name)? {
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.uniform(name)? {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.uniform(name)? {
            UniformValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Every upload in call order since the last [`clear_log`](Self::clear_log).
    pub fn uploads(&self) -> &[(String, UniformValue)] {
        &self.uploads
    }

    /// Forget the upload log but keep current values, like a GPU program would.
    pub fn clear_log(&mut self) {
        self.uploads.clear();
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.current.insert(name.to_owned(), value);
        self.uploads.push((name.to_owned(), value));
    }
}

impl Shader for RecordingShader {
    fn bind(&mut self) {
        self.binds += 1;
    }

    fn upload_mat4(&mut self, name: &str, value: &Mat4) {
        self.record(name, UniformValue::Mat4(*value));
    }

    fn upload_vec3(&mut self, name: &str, value: Vec3) {
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    Clear([f32; 4]),
    BindTexture { slot: u32, path: String },
    DrawIndexed { mesh: String, index_count: u32 },
}

/// Device that logs commands instead of talking to a GPU.
///
/// Meshes registered with [`fail_on_mesh`](Self::fail_on_mesh) make
/// `draw_indexed` return an error; failed draws are not logged.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    commands: Vec<DeviceCommand>,
    failing: BTreeSet<String>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on_mesh(&mut self, mesh: impl Into<String>) {
        self.failing.insert(mesh.into());
    }

    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::DrawIndexed { .. }))
            .count()
    }

    pub fn drawn_meshes(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::DrawIndexed { mesh, .. } => Some(mesh.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Start a new frame's log.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl RenderDevice for RecordingDevice {
    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DeviceCommand::Clear(color));
    }

    fn bind_texture(&mut self, slot: u32, texture: &Texture) -> Result<(), DrawError> {
        self.commands.push(DeviceCommand::BindTexture {
            slot,
            path: texture.path.clone(),
        });
        Ok(())
    }

    fn draw_indexed(&mut self, mesh: &Mesh) -> Result<(), DrawError> {
        if self.failing.contains(&mesh.name) {
            return Err(DrawError::Mesh {
                mesh: mesh.name.clone(),
                reason: "injected failure".into(),
            });
        }
        self.commands.push(DeviceCommand::DrawIndexed {
            mesh: mesh.name.clone(),
            index_count: mesh.index_count(),
        });
        Ok(())
    }
}

impl fmt::Display for RecordingDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            match command {
                DeviceCommand::Clear([r, g, b, a]) => {
                    writeln!(f, "clear ({r:.2}, {g:.2}, {b:.2}, {a:.2})")?
                }
                DeviceCommand::BindTexture { slot, path } => {
                    writeln!(f, "  bind slot {slot} <- {path}")?
                }
                DeviceCommand::DrawIndexed { mesh, index_count } => {
                    writeln!(f, "  draw '{mesh}' ({index_count} indices)")?
                }
            }
        }
        Ok(())
    }
}
