use hashbrown::HashSet;

use veneer_proxy::entity::CellCoord;

/// Sink for geometry invalidation; the renderer schedules a rebuild for
/// every cell marked here.
pub trait RenderInvalidator {
    fn mark_geometry_dirty(&mut self, coord: CellCoord);
}

/// Client-side coalescing queue of cells whose appearance changed. Draining
/// expands each cell to its full 3x3x3 neighborhood, since a face-culling
/// neighbor may need its shared face back (or newly hidden).
#[derive(Default)]
pub struct RenderQueue {
    pending: Vec<CellCoord>,
    seen: HashSet<CellCoord>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `coord` for re-render; duplicate marks within one drain
    /// cycle coalesce.
    pub fn mark(&mut self, coord: CellCoord) {
        if self.seen.insert(coord) {
            self.pending.push(coord);
        }
    }

    /// Invalidates geometry for every pending cell and its 26 neighbors,
    /// then clears. The batch is detached before any callback runs, so
    /// marks made while draining land in the next cycle.
    pub fn drain(&mut self, sink: &mut dyn RenderInvalidator) -> usize {
        let batch = std::mem::take(&mut self.pending);
        self.seen.clear();
        for c in &batch {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        sink.mark_geometry_dirty(c.offset(dx, dy, dz));
                    }
                }
            }
        }
        batch.len()
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
