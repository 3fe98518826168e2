//! Chunk cache, GPU device seam, and the per-frame streaming controller.
#![forbid(unsafe_code)]

mod cache;
mod gpu;
mod streaming;

pub use cache::{ChunkCache, ChunkEntry, MeshState, coords_within};
pub use gpu::{GpuDevice, HeadlessBuffer, HeadlessDevice};
pub use streaming::{DrawCall, Engine, Observer};
