//! Rendering module
//!
//! `draw` turns game state into primitive draw commands, `shapes` turns those
//! into pixel-space triangles, and `pipeline` presents them through wgpu.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCommand, Span, build_frame, circle_spans};
pub use pipeline::{FrameStatus, RenderError, RenderState};
pub use shapes::frame_vertices;
pub use vertex::Vertex;
