//! Cell-type registry: blocks, sprites, tags, and bit-packed state.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod sprite;
pub mod types;

pub use registry::BlockRegistry;
pub use sprite::SpriteCatalog;
pub use types::{Block, BlockId, BlockState, FaceRole, Shape, SpriteId};
