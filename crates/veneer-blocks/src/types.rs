pub type BlockId = u16;
pub type BlockState = u16;

/// A cell value in the grid: type id plus bit-packed property state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == 0
    }

    /// Same type, ignoring state. Used for "reapply same material" checks.
    #[inline]
    pub fn same_type(self, other: Block) -> bool {
        self.id == other.id
    }
}

/// Index into the sprite catalog. Id 0 is the reserved empty sentinel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct SpriteId(pub u16);

impl SpriteId {
    pub const EMPTY: SpriteId = SpriteId(0);
}

/// Face role used to pick a sprite for a block face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
    All,
}

/// Compiled block shape. The property names refer to entries in the
/// block's state schema.
#[derive(Clone, Debug, Default)]
pub enum Shape {
    #[default]
    Cube,
    Slab {
        half_from: String,
    },
    Stairs {
        facing_from: String,
        half_from: String,
    },
    Fence,
    Wall,
    Layer {
        count_from: String,
    },
    /// Full-cube collision with no occlusion (glass-frame style).
    Ghost,
    None,
}

impl Shape {
    /// Fraction of a full cell this shape represents. Fixed per shape
    /// class; sub-state scaling happens through the occupancy count.
    pub fn volume_factor(&self) -> f64 {
        match self {
            Shape::Cube | Shape::Ghost => 1.0,
            Shape::Slab { .. } | Shape::Wall => 0.5,
            Shape::Stairs { .. } => 0.75,
            Shape::Fence => 0.4,
            Shape::Layer { .. } => 0.125,
            Shape::None => 1.0,
        }
    }
}
