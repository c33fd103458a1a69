use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;

use crate::mass;

/// Opaque descriptor of the resource spent to apply a material, retained so
/// it can be refunded on removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStack {
    pub item: String,
    pub count: u32,
}

impl ResourceStack {
    pub fn one(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            count: 1,
        }
    }
}

/// Physical properties captured when the material is set, so property
/// queries don't recompute them per call. The mass here is the estimator
/// value; a live physics backend takes precedence at query time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub hardness: f32,
    pub blast_resistance: f32,
    pub mass: f64,
}

/// Per-cell impersonation state. Mutated only through [`crate::ProxyEntity`];
/// readers on other threads always see a whole record (the entity replaces
/// the record wholesale on write).
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialRecord {
    material: Option<Block>,
    consumed: Option<ResourceStack>,
    volume_factor: f64,
    virtual_rotation: u8,
    removed_by_creative: bool,
    snapshot: Option<Snapshot>,
}

impl MaterialRecord {
    pub fn empty(volume_factor: f64) -> Self {
        Self {
            material: None,
            consumed: None,
            volume_factor,
            virtual_rotation: 0,
            removed_by_creative: false,
            snapshot: None,
        }
    }

    pub(crate) fn occupied(
        material: Block,
        consumed: ResourceStack,
        volume_factor: f64,
        registry: &BlockRegistry,
    ) -> Self {
        Self {
            material: Some(material),
            consumed: Some(consumed),
            volume_factor,
            virtual_rotation: 0,
            removed_by_creative: false,
            snapshot: Some(Self::capture(material, volume_factor, registry)),
        }
    }

    fn capture(material: Block, volume_factor: f64, registry: &BlockRegistry) -> Snapshot {
        let (hardness, blast_resistance) = registry
            .get(material.id)
            .map(|ty| (ty.hardness, ty.blast_resistance))
            .unwrap_or((2.0, 6.0));
        Snapshot {
            hardness,
            blast_resistance,
            mass: mass::estimate_base_mass(hardness) * volume_factor,
        }
    }

    #[inline]
    pub fn material(&self) -> Option<Block> {
        self.material
    }

    #[inline]
    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    #[inline]
    pub fn virtual_rotation(&self) -> u8 {
        self.virtual_rotation
    }

    #[inline]
    pub fn volume_factor(&self) -> f64 {
        self.volume_factor
    }

    #[inline]
    pub fn consumed(&self) -> Option<&ResourceStack> {
        self.consumed.as_ref()
    }

    #[inline]
    pub fn removed_by_creative(&self) -> bool {
        self.removed_by_creative
    }

    #[inline]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot
    }

    pub(crate) fn advance_rotation(&mut self) {
        self.virtual_rotation = (self.virtual_rotation + 1) % 3;
    }

    pub(crate) fn set_removed_by_creative(&mut self, flag: bool) {
        self.removed_by_creative = flag;
    }

    /// Serializes to the persisted layout. Material state is stored as a
    /// name plus property map so saves survive id renumbering.
    pub fn to_data(&self, registry: &BlockRegistry) -> RecordData {
        let (material_id, material_props) = match self.material {
            Some(b) => match registry.get(b.id) {
                Some(ty) => (Some(ty.name.clone()), ty.unpack_state(b.state)),
                None => (None, HashMap::new()),
            },
            None => (None, HashMap::new()),
        };
        RecordData {
            material_id,
            material_props,
            consumed: self.consumed.clone(),
            volume_factor: self.volume_factor,
            virtual_rotation: self.virtual_rotation,
            removed_by_creative: self.removed_by_creative,
        }
    }

    /// Restores a record from the persisted layout. A material reference
    /// that no longer resolves degrades to the empty record: cells must
    /// never fail to load.
    pub fn from_data(data: &RecordData, registry: &BlockRegistry) -> Self {
        let mut rec = Self::empty(data.volume_factor);
        rec.removed_by_creative = data.removed_by_creative;
        let Some(name) = data.material_id.as_deref() else {
            return rec;
        };
        // Legacy saves carry only the id; an empty props map resolves to the
        // material's default state.
        match registry.make_block_by_name(name, Some(&data.material_props)) {
            Some(material) => {
                rec.material = Some(material);
                rec.consumed = data.consumed.clone();
                rec.virtual_rotation = data.virtual_rotation % 3;
                rec.snapshot = Some(Self::capture(material, data.volume_factor, registry));
            }
            None => {
                log::warn!(
                    "dropping unresolvable copied material {:?}; cell loads empty",
                    name
                );
            }
        }
        rec
    }
}

fn default_volume_factor() -> f64 {
    1.0
}

/// Persisted per-cell layout. All fields except the material reference are
/// defaulted so legacy single-field saves still deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordData {
    pub material_id: Option<String>,
    #[serde(default)]
    pub material_props: HashMap<String, String>,
    #[serde(default)]
    pub consumed: Option<ResourceStack>,
    #[serde(default = "default_volume_factor")]
    pub volume_factor: f64,
    #[serde(default)]
    pub virtual_rotation: u8,
    #[serde(default)]
    pub removed_by_creative: bool,
}

impl Default for RecordData {
    fn default() -> Self {
        Self {
            material_id: None,
            material_props: HashMap::new(),
            consumed: None,
            volume_factor: 1.0,
            virtual_rotation: 0,
            removed_by_creative: false,
        }
    }
}
