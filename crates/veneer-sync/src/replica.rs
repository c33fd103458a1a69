use std::sync::Arc;

use hashbrown::HashMap;

use veneer_blocks::registry::BlockRegistry;
use veneer_proxy::entity::CellCoord;
use veneer_proxy::MaterialRecord;

use crate::channel::RecordUpdate;
use crate::render::RenderQueue;

/// Client-side mirror of proxy cell records. Updates replace the stored
/// record wholesale; a re-render is queued only when the visible part of
/// the record (material or virtual rotation) actually changed.
#[derive(Default)]
pub struct ClientReplica {
    records: HashMap<CellCoord, Arc<MaterialRecord>>,
    renders: RenderQueue,
}

impl ClientReplica {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: &RecordUpdate, registry: &BlockRegistry) {
        let next = Arc::new(MaterialRecord::from_data(&update.data, registry));
        let visible_change = match self.records.get(&update.coord) {
            Some(prev) => {
                prev.material() != next.material()
                    || prev.virtual_rotation() != next.virtual_rotation()
            }
            // First sight of the cell; its geometry has never been built.
            None => true,
        };
        self.records.insert(update.coord, next);
        if visible_change {
            self.renders.mark(update.coord);
        }
    }

    pub fn apply_batch(&mut self, updates: &[RecordUpdate], registry: &BlockRegistry) {
        for u in updates {
            self.apply(u, registry);
        }
    }

    /// Drops the mirror for a removed cell and queues the hole for
    /// re-render.
    pub fn remove(&mut self, coord: CellCoord) {
        if self.records.remove(&coord).is_some() {
            self.renders.mark(coord);
        }
    }

    #[inline]
    pub fn record(&self, coord: CellCoord) -> Option<Arc<MaterialRecord>> {
        self.records.get(&coord).cloned()
    }

    #[inline]
    pub fn renders(&mut self) -> &mut RenderQueue {
        &mut self.renders
    }
}
