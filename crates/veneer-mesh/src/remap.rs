//! UV remap of a proxy cell's own quads onto the impersonated material's
//! sprite. Geometry stays the proxy's; only texture coordinates, sprite id
//! and tint change, so slabs and stairs keep their silhouette while looking
//! like the copied block.

use veneer_blocks::types::Block;

use crate::face::Face;
use crate::quad::BakedQuad;
use crate::sprite::{SpriteAtlas, BakedModels, SpriteRect};

/// Rewrites `base` (the proxy's own quads for one cell side) to sample the
/// sprite `material` shows on the rotation-permuted face.
///
/// Each vertex keeps its relative position inside the sprite rect, so partial
/// quads (slab sides) sample the matching partial region of the new sprite.
/// If the atlas has no rect for the chosen sprite the quads are returned
/// untouched rather than dropped.
pub fn remap_block_quads(
    base: &[BakedQuad],
    side: Option<Face>,
    material: Block,
    rotation: u8,
    models: &dyn BakedModels,
    atlas: &dyn SpriteAtlas,
) -> Vec<BakedQuad> {
    let permuted = side.map(|f| f.permuted(rotation));
    let source = source_quad(material, permuted, models);
    let (sprite, tint) = match &source {
        Some(q) => (q.sprite, q.tint),
        None => (models.particle_sprite(material), None),
    };
    let Some(target) = atlas.rect(sprite) else {
        log::debug!(
            "sprite {:?} for block id {} has no atlas rect; quads left unmapped",
            sprite,
            material.id
        );
        return base.to_vec();
    };
    base.iter()
        .map(|q| match atlas.rect(q.sprite) {
            Some(src) => remap_quad(q, &src, &target, sprite, tint),
            None => q.clone(),
        })
        .collect()
}

/// Picks the quad whose sprite/tint the remap copies from: the material's
/// quads on the permuted face, else its omnidirectional quads.
fn source_quad(
    material: Block,
    face: Option<Face>,
    models: &dyn BakedModels,
) -> Option<BakedQuad> {
    if let Some(f) = face {
        if let Some(q) = models.quads(material, Some(f)).into_iter().next() {
            return Some(q);
        }
    }
    models.quads(material, None).into_iter().next()
}

fn remap_quad(
    q: &BakedQuad,
    src: &SpriteRect,
    dst: &SpriteRect,
    sprite: veneer_blocks::SpriteId,
    tint: Option<u8>,
) -> BakedQuad {
    let mut out = q.clone();
    out.sprite = sprite;
    out.tint = tint;
    for v in &mut out.verts {
        let rel_u = if src.span_u() != 0.0 {
            (v.uv[0] - src.u0) / src.span_u()
        } else {
            0.0
        };
        let rel_v = if src.span_v() != 0.0 {
            (v.uv[1] - src.v0) / src.span_v()
        } else {
            0.0
        };
        v.uv = [
            dst.u0 + rel_u * dst.span_u(),
            dst.v0 + rel_v * dst.span_v(),
        ];
    }
    out
}
