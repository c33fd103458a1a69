use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;
use veneer_mesh::Face;
use veneer_proxy::ProxyEntity;
use veneer_proxy::context::TagDelegate;
use veneer_proxy::entity::CellCoord;

/// Host world interface the proxy layer reads and writes through. Cells
/// default to air; only proxy cells carry an entity.
pub trait CellGrid {
    fn cell(&self, coord: CellCoord) -> Block;
    fn set_cell(&mut self, coord: CellCoord, block: Block);
    fn entity(&self, coord: CellCoord) -> Option<&ProxyEntity>;
    fn entity_mut(&mut self, coord: CellCoord) -> Option<&mut ProxyEntity>;

    /// The six face-adjacent coordinates, in face-index order.
    fn neighbors(&self, coord: CellCoord) -> [CellCoord; 6] {
        Face::ALL.map(|f| {
            let (dx, dy, dz) = f.delta();
            coord.offset(dx, dy, dz)
        })
    }
}

/// Map-backed reference grid used by the demo and the integration tests.
#[derive(Default)]
pub struct MapGrid {
    cells: HashMap<CellCoord, Block>,
    entities: HashMap<CellCoord, ProxyEntity>,
}

impl MapGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a block, creating a fresh entity when the type is
    /// proxy-capable and dropping any stale entity when it is not.
    pub fn place(&mut self, coord: CellCoord, block: Block, registry: &BlockRegistry) {
        self.cells.insert(coord, block);
        let is_proxy = registry
            .get(block.id)
            .is_some_and(|ty| ty.proxy_class().is_some());
        if is_proxy {
            self.entities
                .insert(coord, ProxyEntity::new(coord, block, registry));
        } else {
            self.entities.remove(&coord);
        }
    }

    /// Removes the cell, handing back its entity for the destruction
    /// refund path.
    pub fn remove(&mut self, coord: CellCoord) -> Option<ProxyEntity> {
        self.cells.remove(&coord);
        self.entities.remove(&coord)
    }

    /// All proxy entities, for the per-tick sync sweep.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut ProxyEntity> {
        self.entities.values_mut()
    }
}

impl CellGrid for MapGrid {
    fn cell(&self, coord: CellCoord) -> Block {
        self.cells.get(&coord).copied().unwrap_or(Block::AIR)
    }

    fn set_cell(&mut self, coord: CellCoord, block: Block) {
        self.cells.insert(coord, block);
    }

    fn entity(&self, coord: CellCoord) -> Option<&ProxyEntity> {
        self.entities.get(&coord)
    }

    fn entity_mut(&mut self, coord: CellCoord) -> Option<&mut ProxyEntity> {
        self.entities.get_mut(&coord)
    }
}

/// Shared handle needed to hand the grid to the thread-local lookup slot.
pub type SharedGrid = Rc<RefCell<MapGrid>>;

/// [`TagDelegate`] over a shared grid, so host tag queries made inside a
/// `LookupScope` resolve through the proxy's copied material.
pub struct GridTagDelegate {
    grid: SharedGrid,
}

impl GridTagDelegate {
    pub fn new(grid: SharedGrid) -> Rc<Self> {
        Rc::new(Self { grid })
    }
}

impl TagDelegate for GridTagDelegate {
    fn copied_material(&self, coord: CellCoord) -> Option<Block> {
        self.grid.borrow().entity(coord).and_then(|e| e.material())
    }
}
