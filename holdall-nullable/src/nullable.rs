use holdall_core::{short_type_name, ContainerError, Result};
use log::trace;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;

// The slot is the payload itself: no box, no pointer.
static_assertions::assert_eq_size!(Nullable<u64>, [u64; 2]);
static_assertions::assert_eq_size!(Nullable<u8>, [u8; 2]);

/// A value of type `T`, or nothing.
///
/// The value lives inside the container's own footprint, so creating or filling a `Nullable`
/// never allocates. Whenever `present` is false the slot holds no live `T`: nothing has been
/// constructed there and nothing is owed a drop.
pub struct Nullable<T> {
    present: bool,
    slot: MaybeUninit<T>,
}

impl<T> Nullable<T> {
    /// An empty container.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            present: false,
            slot: MaybeUninit::uninit(),
        }
    }

    /// A container holding `value`.
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            present: true,
            slot: MaybeUninit::new(value),
        }
    }

    #[inline(always)]
    pub fn has_value(&self) -> bool {
        self.present
    }

    /// Returns the live value, or `EmptyAccess`.
    pub fn value(&self) -> Result<&T> {
        match self.present {
            // SAFETY: `present` guarantees the slot was initialized.
            true => Ok(unsafe { self.slot.assume_init_ref() }),
            false => Err(Self::empty_access()),
        }
    }

    /// Returns the live value mutably, or `EmptyAccess`.
    pub fn value_mut(&mut self) -> Result<&mut T> {
        match self.present {
            // SAFETY: see `value`.
            true => Ok(unsafe { self.slot.assume_init_mut() }),
            false => Err(Self::empty_access()),
        }
    }

    /// Returns the live value without checking for its presence.
    ///
    /// This is the pointer-like accessor: it has no failure mode of its own.
    ///
    /// # Safety
    /// The container must hold a value. Calling this on an empty `Nullable` reads uninitialized
    /// memory, which is undefined behavior. Use [`Nullable::value`] for checked access.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.present, "get_unchecked() on an empty Nullable");
        self.slot.assume_init_ref()
    }

    /// Mutable counterpart of [`Nullable::get_unchecked`].
    ///
    /// # Safety
    /// Same contract: the container must hold a value.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.present, "get_unchecked_mut() on an empty Nullable");
        self.slot.assume_init_mut()
    }

    /// Returns a copy of the live value, or `default`. Never fails, and never modifies `self`.
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        self.as_option().cloned().unwrap_or(default)
    }

    /// Like `value_or`, but only builds the fallback when it is needed.
    pub fn value_or_else<F>(&self, default: F) -> T
    where
        T: Clone,
        F: FnOnce() -> T,
    {
        self.as_option().cloned().unwrap_or_else(default)
    }

    /// Consumes the container, yielding its value or `default`.
    pub fn into_value_or(mut self, default: T) -> T {
        self.take().unwrap_or(default)
    }

    pub fn as_option(&self) -> Option<&T> {
        self.value().ok()
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        self.value_mut().ok()
    }

    /// Destroys the live value, if any. Calling it on an empty container does nothing.
    pub fn reset(&mut self) {
        if self.present {
            // Cleared before the drop runs: a panicking destructor must not lead to a second one.
            self.present = false;
            // SAFETY: the slot was live until the line above, and nothing reads it afterwards.
            unsafe { self.slot.assume_init_drop() };
        }
    }

    /// Moves the value out, leaving the container empty.
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.present, false) {
            // SAFETY: the flag was set, and has been cleared so the value is read out only once.
            true => Some(unsafe { self.slot.assume_init_read() }),
            false => None,
        }
    }

    /// Stores `value`, returning the previous one if there was one.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let previous = self.take();
        self.slot.write(value);
        self.present = true;
        previous
    }

    /// Destroys any current value and stores `value` in its place.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(|| value)
    }

    /// Destroys any current value, then builds a new one in the slot.
    ///
    /// The old value is gone before `make` runs. Should `make` panic, the container is left
    /// empty rather than holding a half-built value.
    pub fn emplace_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.reset();
        let value = self.slot.write(make());
        self.present = true;
        value
    }

    /// Fallible flavor of [`Nullable::emplace_with`].
    ///
    /// The current value is destroyed first. On failure the container stays empty and the
    /// constructor's error is reported as `ConstructionFailure`.
    pub fn try_emplace<F, E>(&mut self, make: F) -> Result<&mut T>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: Into<anyhow::Error>,
    {
        self.reset();
        match make() {
            Ok(value) => {
                let value = self.slot.write(value);
                self.present = true;
                Ok(value)
            }
            Err(err) => {
                let err = ContainerError::construction::<T>(err);
                trace!("try_emplace left the nullable empty: {}", err);
                Err(err)
            }
        }
    }

    fn empty_access() -> ContainerError {
        ContainerError::EmptyAccess {
            type_name: short_type_name::<T>(),
        }
    }
}

impl<T> Drop for Nullable<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for Nullable<T> {
    fn clone(&self) -> Self {
        self.as_option().cloned().into()
    }
}

impl<T: PartialEq> PartialEq for Nullable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Nullable<T> {}

impl<T: Hash> Hash for Nullable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state)
    }
}

impl<T: fmt::Debug> fmt::Debug for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Nullable").field(value).finish(),
            None => f.write_str("Nullable(empty)"),
        }
    }
}
