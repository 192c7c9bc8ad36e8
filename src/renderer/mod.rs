//! WebGPU rendering module
//!
//! One triangle-list pipeline with per-vertex color. The scene is
//! tessellated on the CPU in field coordinates and mapped to NDC at
//! upload time.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
