//!
//! Closed tagged unions: exactly one live value out of a fixed list of alternative types.
//!
//! `Union2` through `Union6` are plain enums, so the discriminant and the largest alternative
//! share one inline footprint and no valueless state can be expressed. On top of native
//! `match`, they offer access by position (`get::<1>()`), by type (`holds::<String, _>()`) and
//! exhaustive visitation.
//!

/// The union types and their selector traits.
pub mod union;
/// Visitor traits used by `visit`/`visit_mut`.
pub mod visit;

pub use union::{Alternative, Locate, Pos, TaggedUnion, Union2, Union3, Union4, Union5, Union6};
pub use visit::{Visitor, VisitorMut};
