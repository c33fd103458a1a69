use proptest::prelude::*;
use veneer_blocks::SpriteId;
use veneer_blocks::types::Block;
use veneer_mesh::{BakedModels, BakedQuad, Face, SpriteAtlas, SpriteRect, remap_block_quads};

const STONE: Block = Block { id: 1, state: 0 };
const LOG: Block = Block { id: 2, state: 0 };
const BARE: Block = Block { id: 3, state: 0 };

const FRAME_SPRITE: SpriteId = SpriteId(1);
const STONE_SPRITE: SpriteId = SpriteId(2);
const LOG_TOP_SPRITE: SpriteId = SpriteId(3);
const LOG_SIDE_SPRITE: SpriteId = SpriteId(4);
const PARTICLE_SPRITE: SpriteId = SpriteId(5);
const UNMAPPED_SPRITE: SpriteId = SpriteId(9);

struct FixtureAtlas;

impl SpriteAtlas for FixtureAtlas {
    fn rect(&self, id: SpriteId) -> Option<SpriteRect> {
        let cell = |col: f32, row: f32| SpriteRect {
            u0: col * 0.25,
            v0: row * 0.25,
            u1: col * 0.25 + 0.25,
            v1: row * 0.25 + 0.25,
        };
        match id {
            FRAME_SPRITE => Some(cell(0.0, 0.0)),
            STONE_SPRITE => Some(cell(1.0, 0.0)),
            LOG_TOP_SPRITE => Some(cell(2.0, 0.0)),
            LOG_SIDE_SPRITE => Some(cell(3.0, 0.0)),
            PARTICLE_SPRITE => Some(cell(0.0, 1.0)),
            _ => None,
        }
    }
}

struct FixtureModels;

impl BakedModels for FixtureModels {
    fn quads(&self, block: Block, face: Option<Face>) -> Vec<BakedQuad> {
        let atlas = FixtureAtlas;
        let quad = |face: Face, sprite: SpriteId| {
            BakedQuad::unit(face, sprite, atlas.rect(sprite).unwrap())
        };
        match (block, face) {
            (STONE, Some(f)) => vec![quad(f, STONE_SPRITE)],
            (LOG, Some(Face::PosY | Face::NegY)) => {
                vec![quad(face.unwrap(), LOG_TOP_SPRITE)]
            }
            (LOG, Some(f)) => {
                let mut q = quad(f, LOG_SIDE_SPRITE);
                q.tint = Some(1);
                vec![q]
            }
            (STONE | LOG, None) => vec![quad(Face::PosY, STONE_SPRITE)],
            // BARE has no face quads and no omnidirectional quads at all.
            _ => Vec::new(),
        }
    }

    fn particle_sprite(&self, _block: Block) -> SpriteId {
        PARTICLE_SPRITE
    }
}

fn frame_face_quad(face: Face) -> BakedQuad {
    BakedQuad::unit(face, FRAME_SPRITE, FixtureAtlas.rect(FRAME_SPRITE).unwrap())
}

#[test]
fn full_span_quad_maps_to_full_target_rect() {
    let base = [frame_face_quad(Face::PosY)];
    let out = remap_block_quads(&base, Some(Face::PosY), STONE, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].sprite, STONE_SPRITE);
    let dst = FixtureAtlas.rect(STONE_SPRITE).unwrap();
    let mut us: Vec<f32> = out[0].verts.iter().map(|v| v.uv[0]).collect();
    let mut vs: Vec<f32> = out[0].verts.iter().map(|v| v.uv[1]).collect();
    us.sort_by(f32::total_cmp);
    vs.sort_by(f32::total_cmp);
    assert!((us[0] - dst.u0).abs() < 1e-6 && (us[3] - dst.u1).abs() < 1e-6);
    assert!((vs[0] - dst.v0).abs() < 1e-6 && (vs[3] - dst.v1).abs() < 1e-6);
    // Geometry is untouched.
    for (a, b) in out[0].verts.iter().zip(base[0].verts.iter()) {
        assert_eq!(a.pos, b.pos);
    }
}

#[test]
fn rotation_permutes_the_sampled_face() {
    // Rotation 1 swings PosY onto PosZ, so the top of a rotated log shows bark.
    let base = [frame_face_quad(Face::PosY)];
    let out = remap_block_quads(&base, Some(Face::PosY), LOG, 1, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].sprite, LOG_SIDE_SPRITE);

    let out = remap_block_quads(&base, Some(Face::PosY), LOG, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].sprite, LOG_TOP_SPRITE);
}

#[test]
fn tint_carries_over_from_the_source_quad() {
    let base = [frame_face_quad(Face::PosX)];
    let out = remap_block_quads(&base, Some(Face::PosX), LOG, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].tint, Some(1));

    let out = remap_block_quads(&base, Some(Face::PosY), LOG, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].tint, None);
}

#[test]
fn sideless_lookup_falls_back_to_omnidirectional_quads() {
    let base = [frame_face_quad(Face::PosY)];
    let out = remap_block_quads(&base, None, LOG, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].sprite, STONE_SPRITE);
}

#[test]
fn quadless_material_falls_back_to_particle_sprite() {
    let base = [frame_face_quad(Face::PosY)];
    let out = remap_block_quads(&base, Some(Face::PosY), BARE, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].sprite, PARTICLE_SPRITE);
    assert_eq!(out[0].tint, None);
}

#[test]
fn missing_atlas_rect_leaves_quads_unmapped() {
    struct NoRectModels;
    impl BakedModels for NoRectModels {
        fn quads(&self, _: Block, _: Option<Face>) -> Vec<BakedQuad> {
            Vec::new()
        }
        fn particle_sprite(&self, _: Block) -> SpriteId {
            UNMAPPED_SPRITE
        }
    }
    let base = [frame_face_quad(Face::PosY)];
    let out = remap_block_quads(&base, Some(Face::PosY), STONE, 0, &NoRectModels, &FixtureAtlas);
    assert_eq!(out, base.to_vec());
}

#[test]
fn base_quad_with_unknown_sprite_is_passed_through() {
    let mut odd = frame_face_quad(Face::PosY);
    odd.sprite = UNMAPPED_SPRITE;
    let base = [frame_face_quad(Face::PosY), odd.clone()];
    let out = remap_block_quads(&base, Some(Face::PosY), STONE, 0, &FixtureModels, &FixtureAtlas);
    assert_eq!(out[0].sprite, STONE_SPRITE);
    assert_eq!(out[1], odd);
}

proptest! {
    // A vertex keeps its relative position inside the sprite rect.
    #[test]
    fn remap_preserves_relative_uv(rel_u in 0.0f32..=1.0, rel_v in 0.0f32..=1.0) {
        let src = FixtureAtlas.rect(FRAME_SPRITE).unwrap();
        let mut quad = frame_face_quad(Face::PosY);
        quad.verts[0].uv = [
            src.u0 + rel_u * src.span_u(),
            src.v0 + rel_v * src.span_v(),
        ];
        let out = remap_block_quads(
            &[quad],
            Some(Face::PosY),
            STONE,
            0,
            &FixtureModels,
            &FixtureAtlas,
        );
        let dst = FixtureAtlas.rect(STONE_SPRITE).unwrap();
        let got = out[0].verts[0].uv;
        prop_assert!((got[0] - (dst.u0 + rel_u * dst.span_u())).abs() < 1e-5);
        prop_assert!((got[1] - (dst.v0 + rel_v * dst.span_v())).abs() < 1e-5);
    }
}
