//! Block type bytes, face roles, and the texture atlas lookup table.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod types;

pub use atlas::{ATLAS_DIM, AtlasCell, atlas_cell};
pub use types::{Block, FaceRole};
