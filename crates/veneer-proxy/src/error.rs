use std::error::Error;
use std::fmt;

/// Why a material application was refused. Always returned by value and
/// surfaced as a no-op interaction, never propagated as a failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejected {
    /// A different material is already stored; it must be cleared first.
    AlreadyOccupied,
    /// The candidate is itself a proxy-capable type.
    RecursiveProxy,
    /// The candidate's collision shape cannot be copied (non-full-cube).
    ShapeIncompatible,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::AlreadyOccupied => write!(f, "a different material is already applied"),
            Rejected::RecursiveProxy => write!(f, "cannot copy another proxy cell"),
            Rejected::ShapeIncompatible => write!(f, "material shape cannot be copied"),
        }
    }
}

impl Error for Rejected {}
