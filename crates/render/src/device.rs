use plume_assets::{Mesh, Texture};

/// Errors a backend reports for a single bind or draw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("mesh '{mesh}' could not be drawn: {reason}")]
    Mesh { mesh: String, reason: String },
    #[error("texture '{path}' could not be bound to slot {slot}: {reason}")]
    Texture {
        path: String,
        slot: u32,
        reason: String,
    },
}

/// Graphics backend the traversal issues commands to.
pub trait RenderDevice {
    fn clear(&mut self, color: [f32; 4]);
    fn bind_texture(&mut self, slot: u32, texture: &Texture) -> Result<(), DrawError>;
    /// One indexed draw call for the whole mesh.
    fn draw_indexed(&mut self, mesh: &Mesh) -> Result<(), DrawError>;
}
