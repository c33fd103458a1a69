//! Authoritative-to-replica record sync: per-tick coalesced update batches
//! on the server side, record replacement plus coalesced re-render marking
//! on the client side.
#![forbid(unsafe_code)]

pub mod channel;
pub mod render;
pub mod replica;

pub use channel::{RecordUpdate, SyncChannel};
pub use render::{RenderInvalidator, RenderQueue};
pub use replica::ClientReplica;
