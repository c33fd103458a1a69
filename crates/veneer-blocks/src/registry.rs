use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{
    BlocksConfig, ProxyDef, PropertyFrom, ShapeConfig, ShapeDetailed, SpriteSelector, SpritesDef,
};
use super::sprite::SpriteCatalog;
use super::types::{Block, BlockId, BlockState, FaceRole, Shape, SpriteId};

// Minimal duplication of the mesher-facing face enum to avoid a dependency
// from blocks -> mesh.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}
impl Face {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Simple cardinal facing used by stairs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Facing {
    North,
    South,
    West,
    East,
}
impl Facing {
    #[inline]
    fn from_str(s: &str) -> Facing {
        match s {
            "north" => Facing::North,
            "south" => Facing::South,
            "west" => Facing::West,
            "east" => Facing::East,
            _ => Facing::North,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct CompiledSprites {
    pub all: Option<ResolvedSelector>,
    pub top: Option<ResolvedSelector>,
    pub bottom: Option<ResolvedSelector>,
    pub side: Option<ResolvedSelector>,
}

#[derive(Clone, Debug)]
pub enum ResolvedSelector {
    Fixed(SpriteId),
    By {
        by: String,
        map: HashMap<String, SpriteId>,
    },
}

impl CompiledSprites {
    pub fn sprite_for(
        &self,
        role: FaceRole,
        state: BlockState,
        ty: &BlockType,
    ) -> Option<SpriteId> {
        let pick = match role {
            FaceRole::Top => self.top.as_ref().or(self.all.as_ref()),
            FaceRole::Bottom => self.bottom.as_ref().or(self.all.as_ref()),
            FaceRole::Side => self.side.as_ref().or(self.all.as_ref()),
            FaceRole::All => self.all.as_ref(),
        }?;
        match pick {
            ResolvedSelector::Fixed(id) => Some(*id),
            ResolvedSelector::By { by, map } => {
                if let Some(val) = ty.state_prop_value(state, by) {
                    map.get(val).copied()
                } else {
                    None
                }
            }
        }
    }
}

/// Marks a block type proxy-capable and fixes its shape's volume factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyClass {
    pub volume_factor: f64,
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub sprites: SpriteCatalog,
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            sprites: SpriteCatalog::new(),
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_paths(
        sprites_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let sprites = SpriteCatalog::from_path(sprites_path)?;
        let blocks_toml = fs::read_to_string(blocks_path)?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(sprites, blocks_cfg)
    }

    pub fn from_configs(sprites: SpriteCatalog, cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry {
            sprites,
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        };
        let unknown_name = cfg.unknown_block.clone();
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let solid = def.solid.unwrap_or(true);
            let hardness = def.hardness.unwrap_or(2.0);
            let blast_resistance = def.blast_resistance.unwrap_or(6.0);
            let shape = compile_shape(def.shape);
            let compiled_sprites = compile_sprites(&reg.sprites, def.sprites);
            let state_schema = def.state_schema.unwrap_or_default();
            let (state_fields, prop_index) = compute_state_layout(&state_schema);
            let proxy = def.proxy.map(|p: ProxyDef| ProxyClass {
                volume_factor: p.volume_factor.unwrap_or_else(|| shape.volume_factor()),
            });

            let mut ty = BlockType {
                id,
                name: def.name,
                solid,
                hardness,
                blast_resistance,
                tags: def.tags.unwrap_or_default(),
                shape,
                sprites: compiled_sprites,
                pre_sprite_top: Vec::new(),
                pre_sprite_bottom: Vec::new(),
                pre_sprite_side: Vec::new(),
                pre_occ_mask: Vec::new(),
                proxy,
                cull_class: def.cull_class,
                state_schema,
                state_fields,
                prop_index,
            };

            let (pre_top, pre_bottom, pre_side, pre_occ) = {
                let total_bits: u32 = ty.state_fields.iter().map(|f| f.bits).sum();
                let states_len: usize = if total_bits == 0 {
                    1
                } else {
                    1usize << total_bits.min(16)
                };
                let fill_role = |role: FaceRole| -> Vec<SpriteId> {
                    let mut v = Vec::with_capacity(states_len);
                    for s in 0..states_len {
                        let state = s as BlockState;
                        let id = ty
                            .sprites
                            .sprite_for(role, state, &ty)
                            .unwrap_or(SpriteId::EMPTY);
                        v.push(id);
                    }
                    v
                };
                let mut occ = Vec::with_capacity(states_len);
                for s in 0..states_len {
                    occ.push(occlusion_mask(&ty, s as BlockState));
                }
                (
                    fill_role(FaceRole::Top),
                    fill_role(FaceRole::Bottom),
                    fill_role(FaceRole::Side),
                    occ,
                )
            };
            ty.pre_sprite_top = pre_top;
            ty.pre_sprite_bottom = pre_bottom;
            ty.pre_sprite_side = pre_side;
            ty.pre_occ_mask = pre_occ;
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }

        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        if let Some(name) = unknown_name {
            reg.unknown_block_id = reg.id_by_name(&name);
        }
        Ok(reg)
    }

    /// Resolves a name plus optional property map into a block value.
    /// Unresolvable names substitute the configured unknown block, if any.
    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&std::collections::HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name).or(self.unknown_block_id)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    /// Destroy-speed seconds; negative means unbreakable.
    pub hardness: f32,
    pub blast_resistance: f32,
    pub tags: Vec<String>,
    pub shape: Shape,
    pub sprites: CompiledSprites,
    // Precomputed role->sprite lookup per state (fast path for the remapper)
    pub pre_sprite_top: Vec<SpriteId>,
    pub pre_sprite_bottom: Vec<SpriteId>,
    pub pre_sprite_side: Vec<SpriteId>,
    // Precomputed full-face coverage mask per state (6 bits in Face order)
    pub pre_occ_mask: Vec<u8>,
    pub proxy: Option<ProxyClass>,
    pub cull_class: Option<String>,
    pub state_schema: HashMap<String, Vec<String>>, // property name -> allowed values
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            hardness: 0.0,
            blast_resistance: 0.0,
            tags: Vec::new(),
            shape: Shape::None,
            sprites: CompiledSprites::default(),
            pre_sprite_top: vec![SpriteId::EMPTY],
            pre_sprite_bottom: vec![SpriteId::EMPTY],
            pre_sprite_side: vec![SpriteId::EMPTY],
            pre_occ_mask: vec![0],
            proxy: None,
            cull_class: None,
            state_schema: HashMap::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

/// Per-state full-face coverage in Face bit order. A set bit means the shape
/// presents a complete 1x1 face on that side, so a neighbor face it touches
/// can be considered fully covered.
fn occlusion_mask(ty: &BlockType, state: BlockState) -> u8 {
    const ALL: u8 = 0b11_1111;
    match &ty.shape {
        Shape::Cube => {
            if ty.is_solid(state) {
                ALL
            } else {
                0
            }
        }
        Shape::Slab { half_from } => {
            if ty.state_prop_is_value(state, half_from, "double") {
                ALL
            } else if ty.state_prop_is_value(state, half_from, "top") {
                1 << Face::PosY.index()
            } else {
                1 << Face::NegY.index()
            }
        }
        Shape::Stairs {
            facing_from,
            half_from,
        } => {
            let y_face = if ty.state_prop_is_value(state, half_from, "top") {
                Face::PosY
            } else {
                Face::NegY
            };
            let back = match Facing::from_str(ty.state_prop_value(state, facing_from).unwrap_or("north"))
            {
                Facing::North => Face::NegZ,
                Facing::South => Face::PosZ,
                Facing::West => Face::NegX,
                Facing::East => Face::PosX,
            };
            (1 << y_face.index()) | (1 << back.index())
        }
        Shape::Layer { count_from } => {
            let n = ty.occupancy_count_prop(state, count_from);
            if n >= 8 {
                ALL
            } else {
                1 << Face::NegY.index()
            }
        }
        Shape::Fence | Shape::Wall | Shape::Ghost | Shape::None => 0,
    }
}

fn compile_shape(shape: Option<ShapeConfig>) -> Shape {
    match shape.unwrap_or(ShapeConfig::Simple("cube".into())) {
        ShapeConfig::Simple(k) => match k.as_str() {
            "cube" => Shape::Cube,
            "slab" => Shape::Slab {
                half_from: "half".into(),
            },
            "stairs" => Shape::Stairs {
                facing_from: "facing".into(),
                half_from: "half".into(),
            },
            "fence" => Shape::Fence,
            "wall" => Shape::Wall,
            "layer" => Shape::Layer {
                count_from: "layers".into(),
            },
            "ghost" => Shape::Ghost,
            _ => Shape::None,
        },
        ShapeConfig::Detailed(ShapeDetailed {
            kind,
            half,
            facing,
            count,
        }) => match kind.as_str() {
            "cube" => Shape::Cube,
            "slab" => Shape::Slab {
                half_from: half.map(|p: PropertyFrom| p.from).unwrap_or_else(|| "half".to_string()),
            },
            "stairs" => Shape::Stairs {
                facing_from: facing
                    .map(|p| p.from)
                    .unwrap_or_else(|| "facing".to_string()),
                half_from: half.map(|p| p.from).unwrap_or_else(|| "half".to_string()),
            },
            "fence" => Shape::Fence,
            "wall" => Shape::Wall,
            "layer" => Shape::Layer {
                count_from: count.map(|p| p.from).unwrap_or_else(|| "layers".to_string()),
            },
            "ghost" => Shape::Ghost,
            _ => Shape::None,
        },
    }
}

fn compile_sprites(catalog: &SpriteCatalog, sprites: Option<SpritesDef>) -> CompiledSprites {
    fn resolve_selector(catalog: &SpriteCatalog, sel: &SpriteSelector) -> Option<ResolvedSelector> {
        match sel {
            SpriteSelector::Key(k) => catalog.get_id(k).map(ResolvedSelector::Fixed),
            SpriteSelector::By { by, map } => {
                let mut out: HashMap<String, SpriteId> = HashMap::new();
                for (k, v) in map.iter() {
                    if let Some(id) = catalog.get_id(v) {
                        out.insert(k.clone(), id);
                    }
                }
                Some(ResolvedSelector::By {
                    by: by.clone(),
                    map: out,
                })
            }
        }
    }
    let mut out = CompiledSprites::default();
    if let Some(s) = sprites {
        if let Some(ref all) = s.all {
            out.all = resolve_selector(catalog, all);
        }
        if let Some(ref top) = s.top {
            out.top = resolve_selector(catalog, top);
        }
        if let Some(ref bottom) = s.bottom {
            out.bottom = resolve_selector(catalog, bottom);
        }
        if let Some(ref side) = s.side {
            out.side = resolve_selector(catalog, side);
        }
    }
    out
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}

impl BlockType {
    pub fn is_solid(&self, _state: BlockState) -> bool {
        self.solid
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when the type may be impersonated only as a full cube.
    pub fn is_full_cube(&self) -> bool {
        matches!(self.shape, Shape::Cube)
    }

    pub fn proxy_class(&self) -> Option<ProxyClass> {
        self.proxy
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask: u32 = if f.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << f.bits) - 1
        };
        let idx: usize = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &std::collections::HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & ((1u32 << f.bits) - 1)) << f.offset;
        }
        acc as BlockState
    }

    /// Unpacks the state back into a property map, for persistence.
    pub fn unpack_state(&self, state: BlockState) -> std::collections::HashMap<String, String> {
        let mut out = std::collections::HashMap::with_capacity(self.state_fields.len());
        for f in &self.state_fields {
            if let Some(v) = self.state_prop_value(state, &f.name) {
                out.insert(f.name.clone(), v.to_string());
            }
        }
        out
    }

    /// Number of occupied sub-units for shapes with stacking sub-states
    /// (double slabs, layered blocks). 1 for everything else.
    pub fn occupancy_count(&self, state: BlockState) -> u32 {
        match &self.shape {
            Shape::Slab { half_from } => {
                if self.state_prop_is_value(state, half_from, "double") {
                    2
                } else {
                    1
                }
            }
            Shape::Layer { count_from } => self.occupancy_count_prop(state, count_from),
            _ => 1,
        }
    }

    fn occupancy_count_prop(&self, state: BlockState, prop: &str) -> u32 {
        // Layer counts are stored as the property's value index + 1.
        match self.prop_index.get(prop) {
            Some(&i) => {
                let f = &self.state_fields[i];
                if f.bits == 0 {
                    return 1;
                }
                let mask: u32 = (1u32 << f.bits) - 1;
                (((state as u32) >> f.offset) & mask) + 1
            }
            None => 1,
        }
    }

    #[inline]
    pub fn sprite_for_cached(&self, role: FaceRole, state: BlockState) -> SpriteId {
        match role {
            FaceRole::Top => {
                let len = self.pre_sprite_top.len();
                self.pre_sprite_top[state as usize & (len - 1)]
            }
            FaceRole::Bottom => {
                let len = self.pre_sprite_bottom.len();
                self.pre_sprite_bottom[state as usize & (len - 1)]
            }
            FaceRole::Side | FaceRole::All => {
                let len = self.pre_sprite_side.len();
                self.pre_sprite_side[state as usize & (len - 1)]
            }
        }
    }

    #[inline]
    pub fn occlusion_mask_cached(&self, state: BlockState) -> u8 {
        let len = self.pre_occ_mask.len();
        self.pre_occ_mask[state as usize & (len - 1)]
    }
}
