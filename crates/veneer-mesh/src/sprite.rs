use veneer_blocks::SpriteId;
use veneer_blocks::types::Block;

use crate::face::Face;
use crate::quad::BakedQuad;

/// Normalized atlas rectangle for one sprite, `[u0,u1) x [v0,v1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl SpriteRect {
    pub const FULL: SpriteRect = SpriteRect {
        u0: 0.0,
        v0: 0.0,
        u1: 1.0,
        v1: 1.0,
    };

    #[inline]
    pub fn span_u(&self) -> f32 {
        self.u1 - self.u0
    }

    #[inline]
    pub fn span_v(&self) -> f32 {
        self.v1 - self.v0
    }
}

/// Resolves sprite ids into atlas rectangles.
pub trait SpriteAtlas {
    fn rect(&self, id: SpriteId) -> Option<SpriteRect>;
}

/// Source of baked block-model geometry, queried per face during the remap.
pub trait BakedModels {
    /// Quads of `block` attached to `face`, or the omnidirectional quads
    /// when `face` is `None`.
    fn quads(&self, block: Block, face: Option<Face>) -> Vec<BakedQuad>;

    /// Fallback sprite used when a block has no usable face quads
    /// (the same sprite its break particles sample).
    fn particle_sprite(&self, block: Block) -> SpriteId;
}
