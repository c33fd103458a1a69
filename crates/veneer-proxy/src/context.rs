//! Single-slot, per-thread lookup context for transparent tag delegation.
//!
//! The host's tag query interface carries no coordinate, so the grid sets a
//! thread-local slot immediately before each cell-state lookup and clears it
//! on return. The clear is tied to a guard drop, never to caller
//! discipline; a wall-clock validity window bounds the damage if a call
//! site somehow keeps the slot alive.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;

use crate::entity::CellCoord;

/// How long a set slot stays consultable. Long enough for one synchronous
/// lookup, short enough that a leaked slot cannot answer later queries.
pub const VALIDITY_WINDOW: Duration = Duration::from_millis(1);

/// Resolves the material impersonated at a coordinate. Implemented by the
/// grid; returns `None` for non-proxy cells and empty proxies.
pub trait TagDelegate {
    fn copied_material(&self, coord: CellCoord) -> Option<Block>;
}

struct Slot {
    delegate: Rc<dyn TagDelegate>,
    coord: CellCoord,
    set_at: Instant,
    // Resolution result memoized for repeated tag checks in one lookup.
    cached: Option<Option<Block>>,
}

thread_local! {
    static SLOT: RefCell<Option<Slot>> = const { RefCell::new(None) };
}

/// RAII scope around one grid lookup. Dropping it clears the slot
/// unconditionally, so a panic or early return inside the lookup cannot
/// leak context into later queries.
#[must_use = "the scope must live for the duration of the grid lookup"]
pub struct LookupScope {
    _private: (),
}

impl LookupScope {
    pub fn enter(delegate: Rc<dyn TagDelegate>, coord: CellCoord) -> LookupScope {
        SLOT.with(|s| {
            *s.borrow_mut() = Some(Slot {
                delegate,
                coord,
                set_at: Instant::now(),
                cached: None,
            });
        });
        LookupScope { _private: () }
    }
}

impl Drop for LookupScope {
    fn drop(&mut self) {
        SLOT.with(|s| {
            *s.borrow_mut() = None;
        });
    }
}

/// Generic tag-query interception point. `None` means "no opinion": no
/// slot on this thread, window lapsed, or the coordinate is not an
/// occupied proxy — the caller falls back to default behavior.
pub fn try_resolve_tag(registry: &BlockRegistry, tag: &str) -> Option<bool> {
    SLOT.with(|s| {
        let mut borrow = s.borrow_mut();
        let slot = borrow.as_mut()?;
        if slot.set_at.elapsed() >= VALIDITY_WINDOW {
            return None;
        }
        let material = match slot.cached {
            Some(m) => m,
            None => {
                let m = slot.delegate.copied_material(slot.coord);
                slot.cached = Some(m);
                m
            }
        };
        let material = material?;
        registry.get(material.id).map(|ty| ty.has_tag(tag))
    })
}
