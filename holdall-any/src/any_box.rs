use std::any::{Any, TypeId};
use std::fmt;

use holdall_core::{short_type_name, shorten, ContainerError, Result};
use log::trace;

use crate::descriptor::{ops_for, TypeDescriptor, TypeOps};
use crate::storage::Storage;

// Payloads are not required to be `Send` or `Sync`, so neither is the box.
static_assertions::assert_not_impl_any!(AnyBox: Send, Sync);

/// A single value whose type is only known at runtime.
///
/// Small payloads (see [`crate::INLINE_CAPACITY`]) are kept in an inline buffer; larger or
/// over-aligned ones are moved to the heap. Either way the box owns its payload exclusively:
/// cloning the box clones the payload.
///
/// Payloads must be `'static + Clone`.
#[derive(Default)]
pub struct AnyBox {
    content: Option<Content>,
}

/// A live payload and the record describing how to handle it.
struct Content {
    ops: &'static TypeOps,
    storage: Storage,
}

impl Content {
    fn holds<T: Any>(&self) -> bool {
        (self.ops.type_id)() == TypeId::of::<T>()
    }

    fn short_type_name(&self) -> &'static str {
        shorten((self.ops.type_name)())
    }
}

impl AnyBox {
    /// An empty box.
    pub const fn empty() -> Self {
        AnyBox { content: None }
    }

    /// A box holding `value`.
    pub fn new<T: Any + Clone>(value: T) -> Self {
        let mut this = Self::empty();
        this.emplace(value);
        this
    }

    /// Destroys the current payload, if any, and stores `value` in its place.
    pub fn emplace<T: Any + Clone>(&mut self, value: T) -> &mut T {
        self.reset();

        let ops = ops_for::<T>();
        let storage = Storage::store(value);
        debug_assert_eq!(storage.strategy(), ops.strategy);
        trace!(
            "storing `{}` ({} bytes, align {}) as {:?}",
            (ops.type_name)(),
            ops.size,
            ops.align,
            ops.strategy
        );

        let content = self.content.insert(Content { ops, storage });
        // SAFETY: the storage was just filled with a `T`.
        unsafe { &mut *content.storage.as_mut_ptr().cast::<T>() }
    }

    #[inline(always)]
    pub fn has_value(&self) -> bool {
        self.content.is_some()
    }

    /// The dynamic type of the payload, or `None` when the box is empty.
    pub fn type_descriptor(&self) -> Option<TypeDescriptor> {
        self.content.as_ref().map(|content| content.ops.descriptor())
    }

    /// Whether the payload is exactly a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.content.as_ref().is_some_and(Content::holds::<T>)
    }

    /// Returns the payload as a `T`, or `BadAnyCast` if it is anything else.
    ///
    /// Only exact type identity matches: no numeric conversion, no deref, nothing.
    pub fn cast<T: Any>(&self) -> Result<&T> {
        self.try_cast().ok_or_else(|| self.bad_cast::<T>())
    }

    pub fn cast_mut<T: Any>(&mut self) -> Result<&mut T> {
        let error = self.bad_cast::<T>();
        self.try_cast_mut().ok_or(error)
    }

    /// Non-failing flavor of [`AnyBox::cast`].
    pub fn try_cast<T: Any>(&self) -> Option<&T> {
        let content = self.content.as_ref()?;
        // SAFETY: the type id matched, so the storage holds a `T`.
        content.holds::<T>().then(|| unsafe { &*content.storage.as_ptr().cast::<T>() })
    }

    pub fn try_cast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let content = self.content.as_mut()?;
        match content.holds::<T>() {
            // SAFETY: see `try_cast`.
            true => Some(unsafe { &mut *content.storage.as_mut_ptr().cast::<T>() }),
            false => None,
        }
    }

    /// Moves the payload out as a `T`, leaving the box empty.
    ///
    /// On a type mismatch the box is left untouched.
    pub fn take<T: Any>(&mut self) -> Result<T> {
        match self.content.take() {
            // SAFETY: the type id matched, and the storage is consumed.
            Some(content) if content.holds::<T>() => Ok(unsafe { content.storage.into_value::<T>() }),
            other => {
                self.content = other;
                Err(self.bad_cast::<T>())
            }
        }
    }

    /// Destroys the payload and releases its heap allocation, if any. Does nothing on an empty box.
    pub fn reset(&mut self) {
        // Taken out first: even if the payload's destructor panics, the box ends up empty.
        if let Some(Content { ops, storage }) = self.content.take() {
            trace!("releasing `{}` ({:?})", (ops.type_name)(), ops.strategy);
            // SAFETY: `ops` was recorded together with this storage.
            unsafe { (ops.drop)(storage) };
        }
    }

    fn bad_cast<T: Any>(&self) -> ContainerError {
        ContainerError::BadAnyCast {
            expected: short_type_name::<T>(),
            found: self.content.as_ref().map(Content::short_type_name),
        }
    }
}

impl Drop for AnyBox {
    fn drop(&mut self) {
        self.reset();
    }
}

impl Clone for AnyBox {
    fn clone(&self) -> Self {
        let content = self.content.as_ref().map(|content| Content {
            ops: content.ops,
            // SAFETY: `ops` was recorded together with this storage.
            storage: unsafe { (content.ops.clone)(&content.storage) },
        });
        AnyBox { content }
    }
}

impl fmt::Debug for AnyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Some(content) => write!(f, "AnyBox({})", content.short_type_name()),
            None => f.write_str("AnyBox(empty)"),
        }
    }
}
