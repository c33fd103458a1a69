use std::sync::Arc;

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;

use crate::error::Rejected;
use crate::record::{MaterialRecord, RecordData, ResourceStack};

/// World-space cell coordinate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Policy for applying a different material while one is already stored.
/// `Reject` is the primary behavior; `Replace` is the configurable variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum OverwritePolicy {
    #[default]
    Reject,
    Replace,
}

/// Successful outcomes of `set_material`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Applied {
    /// Material replaced (or first applied); rotation reset to 0.
    Copied,
    /// Same material re-applied; only the virtual rotation advanced.
    Rotated,
}

/// One actor interaction with the cell.
#[derive(Clone, Debug)]
pub enum HandAction {
    /// Empty-handed clear gesture (e.g. shift-use).
    Clear { creative: bool },
    /// A cell item held against the face.
    Place { block: Block, stack: ResourceStack },
}

/// Outcome of [`ProxyEntity::interact`]; rejections surface as no-ops.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    Cleared { refund: Option<ResourceStack> },
    Applied,
    Rotated,
    Rejected(Rejected),
    Ignored,
}

/// The cell entity owning one [`MaterialRecord`]. Mutations happen only on
/// the authoritative thread; the record is swapped wholesale so concurrent
/// readers see either the old or the new record, never a mix.
pub struct ProxyEntity {
    coord: CellCoord,
    own: Block,
    policy: OverwritePolicy,
    record: Arc<MaterialRecord>,
    dirty: bool,
}

impl ProxyEntity {
    /// Creates an empty entity for a proxy cell of type `own`. The volume
    /// factor is fixed here from the type's proxy class and never mutated.
    pub fn new(coord: CellCoord, own: Block, registry: &BlockRegistry) -> Self {
        let volume_factor = registry
            .get(own.id)
            .and_then(|ty| ty.proxy_class())
            .map(|p| p.volume_factor)
            .unwrap_or(1.0);
        Self {
            coord,
            own,
            policy: OverwritePolicy::default(),
            record: Arc::new(MaterialRecord::empty(volume_factor)),
            dirty: false,
        }
    }

    pub fn with_policy(mut self, policy: OverwritePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// The proxy's own cell value (its structural type for the simulation).
    #[inline]
    pub fn own(&self) -> Block {
        self.own
    }

    /// Point-in-time snapshot of the record for cross-thread readers.
    #[inline]
    pub fn record(&self) -> Arc<MaterialRecord> {
        Arc::clone(&self.record)
    }

    #[inline]
    pub fn material(&self) -> Option<Block> {
        self.record.material()
    }

    #[inline]
    pub fn has_material(&self) -> bool {
        self.record.has_material()
    }

    #[inline]
    pub fn virtual_rotation(&self) -> u8 {
        self.record.virtual_rotation()
    }

    #[inline]
    pub fn volume_factor(&self) -> f64 {
        self.record.volume_factor()
    }

    /// Volume factor scaled by the proxy's own occupancy sub-state
    /// (double slab, stacked layers). The stored factor never changes.
    pub fn effective_multiplier(&self, registry: &BlockRegistry) -> f64 {
        let occupancy = registry
            .get(self.own.id)
            .map(|ty| ty.occupancy_count(self.own.state))
            .unwrap_or(1);
        self.record.volume_factor() * occupancy as f64
    }

    /// Applies `candidate`: the same type rotates, a different type
    /// replaces or rejects per policy, proxies and non-full-cube shapes
    /// are refused outright.
    pub fn set_material(
        &mut self,
        candidate: Block,
        consumed: ResourceStack,
        registry: &BlockRegistry,
    ) -> Result<Applied, Rejected> {
        let Some(ty) = registry.get(candidate.id) else {
            return Err(Rejected::ShapeIncompatible);
        };
        if ty.proxy_class().is_some() {
            return Err(Rejected::RecursiveProxy);
        }
        if !ty.is_full_cube() {
            return Err(Rejected::ShapeIncompatible);
        }
        if let Some(current) = self.record.material() {
            if current.same_type(candidate) {
                let mut next = (*self.record).clone();
                next.advance_rotation();
                self.record = Arc::new(next);
                self.dirty = true;
                return Ok(Applied::Rotated);
            }
            if self.policy == OverwritePolicy::Reject {
                return Err(Rejected::AlreadyOccupied);
            }
        }
        self.record = Arc::new(MaterialRecord::occupied(
            candidate,
            consumed,
            self.record.volume_factor(),
            registry,
        ));
        self.dirty = true;
        Ok(Applied::Copied)
    }

    /// Resets to the empty record and returns the refund. The caller
    /// decides whether to spawn it, honoring the creative flag.
    pub fn clear_material(&mut self) -> Option<ResourceStack> {
        if !self.record.has_material() {
            return None;
        }
        let refund = self.record.consumed().cloned();
        self.record = Arc::new(MaterialRecord::empty(self.record.volume_factor()));
        self.dirty = true;
        refund
    }

    /// Records whether destruction began with an unlimited-resource actor,
    /// which suppresses the resource drop.
    pub fn begin_destroy(&mut self, creative: bool) {
        if self.record.removed_by_creative() == creative {
            return;
        }
        let mut next = (*self.record).clone();
        next.set_removed_by_creative(creative);
        self.record = Arc::new(next);
        self.dirty = true;
    }

    /// Last-chance refund when the cell itself is destroyed.
    pub fn drop_on_destroy(&self) -> Option<ResourceStack> {
        if self.record.removed_by_creative() {
            return None;
        }
        self.record.consumed().cloned()
    }

    /// Interaction state machine over the hand-action inputs.
    pub fn interact(&mut self, action: HandAction, registry: &BlockRegistry) -> Interaction {
        match action {
            HandAction::Clear { creative } => {
                if !self.record.has_material() {
                    return Interaction::Ignored;
                }
                let refund = self.clear_material();
                Interaction::Cleared {
                    refund: if creative { None } else { refund },
                }
            }
            HandAction::Place { block, stack } => match self.set_material(block, stack, registry) {
                Ok(Applied::Copied) => Interaction::Applied,
                Ok(Applied::Rotated) => Interaction::Rotated,
                Err(r) => Interaction::Rejected(r),
            },
        }
    }

    pub fn save(&self, registry: &BlockRegistry) -> RecordData {
        self.record.to_data(registry)
    }

    /// Restores persisted state. Corrupt references degrade to empty inside
    /// `MaterialRecord::from_data`; loading never dirties the entity.
    pub fn load(&mut self, data: &RecordData, registry: &BlockRegistry) {
        self.record = Arc::new(MaterialRecord::from_data(data, registry));
        self.dirty = false;
    }

    /// Consumes the dirty flag; the sync layer polls this once per tick.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
