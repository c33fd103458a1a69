//! Proxy-cell state: material records, the owning cell entity, mass
//! quantization/delegation, and the scoped tag-lookup context.
#![forbid(unsafe_code)]

pub mod context;
pub mod entity;
pub mod error;
pub mod mass;
pub mod record;

pub use entity::{CellCoord, HandAction, Interaction, OverwritePolicy, ProxyEntity};
pub use error::Rejected;
pub use record::{MaterialRecord, RecordData, ResourceStack};
