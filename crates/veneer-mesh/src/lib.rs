//! Render-time geometry remap: rewrites a proxy cell's baked quads onto the
//! impersonated material's sprite, with the virtual-rotation face
//! permutation and the transparent-neighbor culling pass.
#![forbid(unsafe_code)]

pub mod cull;
pub mod face;
pub mod quad;
pub mod remap;
pub mod sprite;

pub use cull::{NeighborView, cull_mask};
pub use face::Face;
pub use quad::{BakedQuad, Vertex};
pub use remap::remap_block_quads;
pub use sprite::{BakedModels, SpriteAtlas, SpriteRect};
