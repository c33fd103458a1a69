use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    pub unknown_block: Option<String>,
}

#[derive(Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub solid: Option<bool>,
    /// Destroy-speed seconds; negative means unbreakable.
    pub hardness: Option<f32>,
    pub blast_resistance: Option<f32>,
    pub tags: Option<Vec<String>>,
    pub shape: Option<ShapeConfig>,
    pub sprites: Option<SpritesDef>,
    pub state_schema: Option<HashMap<String, Vec<String>>>,
    pub proxy: Option<ProxyDef>,
    /// Opt-in class for transparent self-culling ("glass", "ice", "slime").
    pub cull_class: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum ShapeConfig {
    Simple(String),
    Detailed(ShapeDetailed),
}

#[derive(Deserialize)]
pub struct ShapeDetailed {
    pub kind: String,
    pub half: Option<PropertyFrom>,
    pub facing: Option<PropertyFrom>,
    pub count: Option<PropertyFrom>,
}

#[derive(Deserialize)]
pub struct PropertyFrom {
    pub from: String,
}

#[derive(Deserialize, Default)]
pub struct SpritesDef {
    pub all: Option<SpriteSelector>,
    pub top: Option<SpriteSelector>,
    pub bottom: Option<SpriteSelector>,
    pub side: Option<SpriteSelector>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum SpriteSelector {
    // Simple: side = "stone"
    Key(String),
    // Keyed by a state property: side = { by = "axis", map = { y = "log_top" } }
    By {
        by: String,
        map: HashMap<String, String>,
    },
}

/// Marks a block type proxy-capable. The volume factor defaults to the
/// shape's own factor when omitted.
#[derive(Deserialize)]
pub struct ProxyDef {
    pub volume_factor: Option<f64>,
}
