use veneer_blocks::SpriteId;

use crate::face::Face;
use crate::sprite::SpriteRect;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
    pub rgba: [u8; 4],
}

/// One textured quad of a baked block model. `face` is `None` for geometry
/// that is not axis-aligned to a cell side (cross sprites, inner stair steps).
#[derive(Clone, Debug, PartialEq)]
pub struct BakedQuad {
    pub verts: [Vertex; 4],
    pub face: Option<Face>,
    pub sprite: SpriteId,
    /// Biome/tint channel index carried through to the shader, if any.
    pub tint: Option<u8>,
    pub normal: [f32; 3],
}

impl BakedQuad {
    /// Builds the full unit-cell quad for `face`, with UVs spanning `rect`.
    pub fn unit(face: Face, sprite: SpriteId, rect: SpriteRect) -> BakedQuad {
        let corners: [[f32; 3]; 4] = match face {
            Face::PosY => [
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
                [1.0, 1.0, 0.0],
            ],
            Face::NegY => [
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
            ],
            Face::PosX => [
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 1.0, 1.0],
                [1.0, 0.0, 1.0],
            ],
            Face::NegX => [
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
                [0.0, 1.0, 0.0],
            ],
            Face::PosZ => [
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
            Face::NegZ => [
                [0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
            ],
        };
        let uvs = [
            [rect.u0, rect.v1],
            [rect.u0, rect.v0],
            [rect.u1, rect.v0],
            [rect.u1, rect.v1],
        ];
        let mut verts = [Vertex {
            pos: [0.0; 3],
            uv: [0.0; 2],
            rgba: [255; 4],
        }; 4];
        for i in 0..4 {
            verts[i].pos = corners[i];
            verts[i].uv = uvs[i];
        }
        BakedQuad {
            verts,
            face: Some(face),
            sprite,
            tint: None,
            normal: face.normal(),
        }
    }
}
