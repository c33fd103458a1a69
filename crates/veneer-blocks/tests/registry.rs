use std::collections::HashMap;

use veneer_blocks::config::{BlockDef, BlocksConfig, ShapeConfig, SpriteSelector, SpritesDef};
use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::sprite::SpriteCatalog;
use veneer_blocks::types::{Block, FaceRole};

fn base_def(name: &str, id: u16) -> BlockDef {
    BlockDef {
        name: name.into(),
        id: Some(id),
        solid: Some(true),
        hardness: None,
        blast_resistance: None,
        tags: None,
        shape: None,
        sprites: None,
        state_schema: None,
        proxy: None,
        cull_class: None,
    }
}

#[test]
fn pack_state_roundtrip_fixed() {
    let schema: HashMap<String, Vec<String>> = HashMap::from([
        ("p0".into(), vec!["a".into(), "b".into()]),
        ("p1".into(), vec!["u".into()]),
        ("p2".into(), vec!["x".into(), "y".into(), "z".into()]),
    ]);
    let mut def = base_def("t", 0);
    def.state_schema = Some(schema);
    let cfg = BlocksConfig {
        blocks: vec![def],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    let ty = reg.get(0).unwrap();

    let props = HashMap::from([
        ("p0".into(), "b".into()),
        // omit p1 -> should default to first
        ("p2".into(), "z".into()),
    ]);
    let state = ty.pack_state(&props);
    assert_eq!(ty.state_prop_value(state, "p0"), Some("b"));
    assert_eq!(ty.state_prop_value(state, "p1"), Some("u"));
    assert_eq!(ty.state_prop_value(state, "p2"), Some("z"));

    let unpacked = ty.unpack_state(state);
    assert_eq!(unpacked.get("p0").map(String::as_str), Some("b"));
    assert_eq!(unpacked.get("p2").map(String::as_str), Some("z"));
}

#[test]
fn sprite_catalog_reserves_zero_id_for_sentinel() {
    let sprites = SpriteCatalog::from_toml_str(
        r#"
        [sprites]
        stone = ["assets/blocks/stone.png"]
        unknown = ["assets/blocks/unknown.png"]
    "#,
    )
    .unwrap();
    assert!(sprites.sprites[0].key.is_empty());
    let stone = sprites.get_id("stone").unwrap();
    let unknown = sprites.get_id("unknown").unwrap();
    assert!(stone.0 > 0);
    assert!(unknown.0 > 0);
}

#[test]
fn sprite_cache_matches_dynamic_lookup() {
    let sprites = SpriteCatalog::from_toml_str(
        r#"
        [sprites]
        log_side = ["assets/blocks/log.png"]
        log_top = ["assets/blocks/log_top.png"]
    "#,
    )
    .unwrap();
    let mut def = base_def("log", 1);
    def.state_schema = Some(HashMap::from([(
        "axis".to_string(),
        vec!["y".to_string(), "x".to_string(), "z".to_string()],
    )]));
    def.sprites = Some(SpritesDef {
        all: Some(SpriteSelector::Key("log_side".into())),
        top: Some(SpriteSelector::By {
            by: "axis".into(),
            map: HashMap::from([("y".into(), "log_top".into())]),
        }),
        bottom: None,
        side: None,
    });
    let cfg = BlocksConfig {
        blocks: vec![def],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(sprites, cfg).expect("registry");
    let ty = reg.get(1).expect("block type");
    let st_y = ty.pack_state(&HashMap::from([("axis".into(), "y".into())]));
    let st_x = ty.pack_state(&HashMap::from([("axis".into(), "x".into())]));
    for st in [st_y, st_x] {
        for role in [FaceRole::Top, FaceRole::Bottom, FaceRole::Side] {
            let dynamic = ty.sprites.sprite_for(role, st, ty);
            let cached = ty.sprite_for_cached(role, st);
            assert_eq!(dynamic.unwrap_or_default(), cached);
        }
    }
    assert_ne!(
        ty.sprite_for_cached(FaceRole::Top, st_y),
        ty.sprite_for_cached(FaceRole::Side, st_y)
    );
}

#[test]
fn slab_coverage_and_occupancy() {
    let mut def = base_def("slab", 2);
    def.shape = Some(ShapeConfig::Simple("slab".into()));
    def.state_schema = Some(HashMap::from([(
        "half".to_string(),
        vec!["bottom".to_string(), "top".to_string(), "double".to_string()],
    )]));
    let cfg = BlocksConfig {
        blocks: vec![def],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    let ty = reg.get(2).expect("block type");
    let st_bottom = ty.pack_state(&HashMap::from([("half".into(), "bottom".into())]));
    let st_top = ty.pack_state(&HashMap::from([("half".into(), "top".into())]));
    let st_double = ty.pack_state(&HashMap::from([("half".into(), "double".into())]));

    // Face order: PosY=0, NegY=1.
    assert_eq!(ty.occlusion_mask_cached(st_bottom), 1 << 1);
    assert_eq!(ty.occlusion_mask_cached(st_top), 1 << 0);
    assert_eq!(ty.occlusion_mask_cached(st_double), 0b11_1111);

    assert_eq!(ty.occupancy_count(st_bottom), 1);
    assert_eq!(ty.occupancy_count(st_double), 2);
}

#[test]
fn unknown_block_substitutes_unresolvable_names() {
    let cfg = BlocksConfig {
        blocks: vec![base_def("stone", 7)],
        unknown_block: Some("stone".into()),
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    assert_eq!(reg.unknown_block_id, Some(7));
    assert_eq!(
        reg.make_block_by_name("long_gone_block", None),
        Some(Block { id: 7, state: 0 })
    );
    assert_eq!(
        reg.make_block_by_name("stone", None),
        Some(Block { id: 7, state: 0 })
    );

    // Without the knob an unresolvable name stays unresolvable.
    let cfg = BlocksConfig {
        blocks: vec![base_def("stone", 7)],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    assert_eq!(reg.unknown_block_id, None);
    assert_eq!(reg.make_block_by_name("long_gone_block", None), None);
}

#[test]
fn layer_occupancy_and_occlusion() {
    let mut def = base_def("snow_pile", 8);
    def.shape = Some(ShapeConfig::Simple("layer".into()));
    def.state_schema = Some(HashMap::from([(
        "layers".to_string(),
        (1..=8).map(|n| n.to_string()).collect(),
    )]));
    let cfg = BlocksConfig {
        blocks: vec![def],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    let ty = reg.get(8).expect("block type");

    let at = |n: &str| ty.pack_state(&HashMap::from([("layers".into(), n.into())]));
    assert_eq!(ty.occupancy_count(at("1")), 1);
    assert_eq!(ty.occupancy_count(at("4")), 4);
    assert_eq!(ty.occupancy_count(at("8")), 8);

    // Partial piles only cover the bottom face; a full pile covers all six.
    assert_eq!(ty.occlusion_mask_cached(at("1")), 1 << 1);
    assert_eq!(ty.occlusion_mask_cached(at("7")), 1 << 1);
    assert_eq!(ty.occlusion_mask_cached(at("8")), 0b11_1111);
}

#[test]
fn proxy_class_defaults_to_shape_volume_factor() {
    use veneer_blocks::config::ProxyDef;
    let mut full = base_def("frame", 3);
    full.proxy = Some(ProxyDef {
        volume_factor: None,
    });
    let mut slab = base_def("frame_slab", 4);
    slab.shape = Some(ShapeConfig::Simple("slab".into()));
    slab.proxy = Some(ProxyDef {
        volume_factor: None,
    });
    let mut fence = base_def("frame_fence", 5);
    fence.shape = Some(ShapeConfig::Simple("fence".into()));
    fence.proxy = Some(ProxyDef {
        volume_factor: Some(0.4),
    });
    let cfg = BlocksConfig {
        blocks: vec![full, slab, fence],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    assert_eq!(reg.get(3).unwrap().proxy_class().unwrap().volume_factor, 1.0);
    assert_eq!(reg.get(4).unwrap().proxy_class().unwrap().volume_factor, 0.5);
    assert_eq!(reg.get(5).unwrap().proxy_class().unwrap().volume_factor, 0.4);
    assert!(reg.get(3).unwrap().is_full_cube());
}

#[test]
fn tags_are_per_type() {
    let mut def = base_def("ice", 6);
    def.tags = Some(vec!["slippery".into(), "mineable/pickaxe".into()]);
    def.cull_class = Some("ice".into());
    let cfg = BlocksConfig {
        blocks: vec![def],
        unknown_block: None,
    };
    let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).expect("registry");
    let ty = reg.get(6).unwrap();
    assert!(ty.has_tag("slippery"));
    assert!(!ty.has_tag("climbable"));
    assert_eq!(ty.cull_class.as_deref(), Some("ice"));
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pack_unpack_roundtrip(p0 in 0usize..2, p2 in 0usize..3) {
            let schema: HashMap<String, Vec<String>> = HashMap::from([
                ("p0".into(), vec!["a".into(), "b".into()]),
                ("p2".into(), vec!["x".into(), "y".into(), "z".into()]),
            ]);
            let mut def = base_def("t", 0);
            def.state_schema = Some(schema.clone());
            let cfg = BlocksConfig { blocks: vec![def], unknown_block: None };
            let reg = BlockRegistry::from_configs(SpriteCatalog::new(), cfg).unwrap();
            let ty = reg.get(0).unwrap();
            let props = HashMap::from([
                ("p0".to_string(), schema["p0"][p0].clone()),
                ("p2".to_string(), schema["p2"][p2].clone()),
            ]);
            let state = ty.pack_state(&props);
            prop_assert_eq!(ty.state_prop_value(state, "p0"), Some(schema["p0"][p0].as_str()));
            prop_assert_eq!(ty.state_prop_value(state, "p2"), Some(schema["p2"][p2].as_str()));
            prop_assert_eq!(ty.pack_state(&ty.unpack_state(state)), state);
        }
    }
}
