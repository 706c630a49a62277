//! wgpu renderer.

pub mod graphics;
mod pipeline;
mod vertex;

pub use graphics::{create_graphics, Graphics, GraphicsResult};
pub use vertex::{Globals, InstanceRaw, Vertex};
