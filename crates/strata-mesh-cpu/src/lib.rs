//! CPU chunk meshing: face culling against the halo and quad emission.
#![forbid(unsafe_code)]

mod buffer;
mod build;
mod face;

pub use buffer::{GeometryBuffer, Vertex};
pub use build::build_chunk_mesh;
pub use face::Face;
