use crate::AssetError;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::sync::Arc;

/// Interleaved vertex layout: position, normal, texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }
}

/// Which sampler family a texture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    /// Sampler uniform prefix, completed with a 1-based index per mesh
    /// (`texture_diffuse1`, `texture_specular1`, ...).
    pub fn uniform_prefix(self) -> &'static str {
        match self {
            Self::Diffuse => "texture_diffuse",
            Self::Specular => "texture_specular",
        }
    }
}

/// Decoded texture metadata. Pixel upload belongs to the render device.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub path: String,
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
}

/// One drawable sub-mesh of a model.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<Arc<Texture>>,
}

impl Mesh {
    /// Build a mesh, rejecting indices that point past the vertex list.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(AssetError::IndexOutOfRange {
                mesh: name,
                index,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self {
            name,
            vertices,
            indices,
            textures: Vec::new(),
        })
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Raw vertex bytes in upload layout.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Axis-aligned unit cube centered on the origin, 24 vertices and 36 indices.
    pub fn cube(name: impl Into<String>) -> Self {
        let p = 0.5_f32;
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
            for (su, sv) in corners {
                let position = (normal + u * su + v * sv) * p;
                let uv = Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5);
                vertices.push(Vertex::new(position, normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self {
            name: name.into(),
            vertices,
            indices,
            textures: Vec::new(),
        }
    }
}

/// A loaded model: an ordered list of sub-meshes.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    meshes: Vec<Mesh>,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
        }
    }

    /// The model a failed load produces.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }
}
