//! Integration layer tying the proxy-cell crates to a host world: the grid
//! abstraction, the closed-world proxy type snapshot, the addon-facing
//! query API and material-change listeners.
#![forbid(unsafe_code)]

pub mod api;
pub mod grid;

pub use api::{
    ChangeDispatcher, MaterialChangeListener, ProxyTypes, copied_material,
    effective_mass_multiplier, has_copied_material,
};
pub use grid::{CellGrid, GridTagDelegate, MapGrid, SharedGrid};
