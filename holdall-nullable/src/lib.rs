//!
//! An optional value stored inline: a presence flag next to a slot sized for exactly one `T`.
//!

/// The `Nullable` container itself.
pub mod nullable;
/// Conversions between `Nullable`, `Option` and bare values.
pub mod convert;

pub use nullable::Nullable;
