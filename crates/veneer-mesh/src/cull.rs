use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;

use crate::face::Face;

/// What a neighboring cell looks like to the culling pass: the block stored
/// in the grid plus the material it impersonates if it is a proxy cell.
#[derive(Copy, Clone, Debug)]
pub struct NeighborView {
    pub block: Block,
    pub copied: Option<Block>,
}

impl NeighborView {
    /// The block the neighbor actually renders as.
    #[inline]
    pub fn shown(&self) -> Block {
        self.copied.unwrap_or(self.block)
    }
}

/// Per-face hide mask for a proxy cell impersonating `material`. A `true`
/// entry means that face's quads can be skipped entirely.
///
/// Faces are only culled for materials that opt in with a `cull_class`
/// (glass and the like); opaque copies keep the regular mesher behavior.
/// A face hides when our own shape fully covers it, the neighbor's shape
/// fully covers the shared plane, and the neighbor renders as the same
/// material type, whether it is a plain block or another proxy copying it.
pub fn cull_mask(
    reg: &BlockRegistry,
    own: Block,
    material: Block,
    mut neighbor: impl FnMut(Face) -> Option<NeighborView>,
) -> [bool; 6] {
    let mut out = [false; 6];
    let opted_in = reg
        .get(material.id)
        .is_some_and(|ty| ty.cull_class.is_some());
    if !opted_in {
        return out;
    }
    let Some(own_ty) = reg.get(own.id) else {
        return out;
    };
    let own_mask = own_ty.occlusion_mask_cached(own.state);
    for f in Face::ALL {
        if own_mask & (1 << f.index()) == 0 {
            continue;
        }
        let Some(n) = neighbor(f) else {
            continue;
        };
        let covered = reg
            .get(n.block.id)
            .map(|t| t.occlusion_mask_cached(n.block.state) & (1 << f.opposite().index()) != 0)
            .unwrap_or(false);
        if !covered {
            continue;
        }
        if n.shown().same_type(material) {
            out[f.index()] = true;
        }
    }
    out
}
