use hashbrown::HashMap;

use veneer_blocks::registry::BlockRegistry;
use veneer_proxy::entity::CellCoord;
use veneer_proxy::{ProxyEntity, RecordData};

/// One serialized record change headed for replicas.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordUpdate {
    pub coord: CellCoord,
    pub data: RecordData,
}

/// Server-side outbox for record changes. Updates are coalesced per cell
/// within a tick: re-queuing a coord overwrites its pending payload in
/// place, so a flush carries at most one update per cell, in first-queued
/// order.
#[derive(Default)]
pub struct SyncChannel {
    pending: Vec<RecordUpdate>,
    index: HashMap<CellCoord, usize>,
}

impl SyncChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `data` for `coord`, replacing any payload already pending
    /// for the same cell this tick.
    pub fn queue(&mut self, coord: CellCoord, data: RecordData) {
        match self.index.entry(coord) {
            hashbrown::hash_map::Entry::Occupied(e) => {
                self.pending[*e.get()].data = data;
            }
            hashbrown::hash_map::Entry::Vacant(v) => {
                v.insert(self.pending.len());
                self.pending.push(RecordUpdate { coord, data });
            }
        }
    }

    /// Polls the entity's dirty flag and queues a snapshot if it was set.
    pub fn collect(&mut self, entity: &mut ProxyEntity, registry: &BlockRegistry) {
        if entity.take_dirty() {
            self.queue(entity.coord(), entity.save(registry));
        }
    }

    /// Takes the tick's batch. Order is first-queued order per cell.
    pub fn flush(&mut self) -> Vec<RecordUpdate> {
        self.index.clear();
        let batch = std::mem::take(&mut self.pending);
        if !batch.is_empty() {
            log::trace!("sync flush: {} record update(s)", batch.len());
        }
        batch
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
