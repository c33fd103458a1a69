use hashbrown::HashMap;

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::{Block, BlockId};
use veneer_proxy::entity::CellCoord;

use crate::grid::CellGrid;

/// Immutable closed-world snapshot of the proxy-capable type set. Built
/// once after registry load; registration never reopens at runtime, so
/// other subsystems may cache lookups freely.
pub struct ProxyTypes {
    factors: HashMap<BlockId, f64>,
}

impl ProxyTypes {
    pub fn from_registry(registry: &BlockRegistry) -> Self {
        let factors = registry
            .blocks
            .iter()
            .filter_map(|ty| ty.proxy_class().map(|p| (ty.id, p.volume_factor)))
            .collect();
        Self { factors }
    }

    #[inline]
    pub fn is_proxy(&self, id: BlockId) -> bool {
        self.factors.contains_key(&id)
    }

    #[inline]
    pub fn volume_factor(&self, id: BlockId) -> Option<f64> {
        self.factors.get(&id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// The material impersonated at `coord`, if the cell is an occupied proxy.
pub fn copied_material(grid: &impl CellGrid, coord: CellCoord) -> Option<Block> {
    grid.entity(coord).and_then(|e| e.material())
}

pub fn has_copied_material(grid: &impl CellGrid, coord: CellCoord) -> bool {
    copied_material(grid, coord).is_some()
}

/// Shape-scaled mass multiplier of the proxy at `coord`; `None` when the
/// cell is not a proxy.
pub fn effective_mass_multiplier(
    grid: &impl CellGrid,
    coord: CellCoord,
    registry: &BlockRegistry,
) -> Option<f64> {
    grid.entity(coord)
        .map(|e| e.effective_multiplier(registry))
}

/// Subscriber interface for material changes, e.g. a ship-mass tracker
/// applying deltas instead of rescanning.
pub trait MaterialChangeListener {
    fn notify_material_changed(&mut self, coord: CellCoord, old_material: Option<Block>);
}

/// Fan-out of material-change notifications. The caller invokes `notify`
/// after every successful set or clear on a proxy entity.
#[derive(Default)]
pub struct ChangeDispatcher {
    listeners: Vec<Box<dyn MaterialChangeListener>>,
}

impl ChangeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn MaterialChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn notify(&mut self, coord: CellCoord, old_material: Option<Block>) {
        for l in &mut self.listeners {
            l.notify_material_changed(coord, old_material);
        }
    }
}
