//!
//! A type-erased box: one value of any `'static + Clone` type, recovered by exact type.
//!
//! Small payloads stay inline, the rest goes to the heap. The decision is made once per payload
//! type by [`Strategy::of`], and recorded with the type's operations so the box can later drop
//! or clone a value whose type it no longer knows statically.
//!

/// The box itself.
pub mod any_box;
/// Runtime type descriptions and per-type operation records.
pub mod descriptor;
/// Inline and heap payload storage, and the choice between them.
pub mod storage;

pub use any_box::AnyBox;
pub use descriptor::TypeDescriptor;
pub use storage::{Strategy, INLINE_ALIGN, INLINE_CAPACITY};
