use std::mem::{align_of, size_of, MaybeUninit};
use std::ptr::{self, NonNull};

#[cfg(not(feature = "large-inline-buffer"))]
const INLINE_WORDS: usize = 3;
#[cfg(feature = "large-inline-buffer")]
const INLINE_WORDS: usize = 6;

/// Largest payload, in bytes, stored without a heap allocation.
pub const INLINE_CAPACITY: usize = INLINE_WORDS * size_of::<usize>();

/// Strictest alignment the inline buffer can honor.
pub const INLINE_ALIGN: usize = align_of::<usize>();

static_assertions::const_assert!(INLINE_CAPACITY >= size_of::<String>());
static_assertions::assert_eq_size!(InlineBuffer, [usize; INLINE_WORDS]);
static_assertions::assert_eq_align!(InlineBuffer, usize);

/// Where a payload lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// In the box's own buffer.
    Inline,
    /// Behind an owned heap pointer.
    Heap,
}

impl Strategy {
    /// Picks the storage for a payload of the given layout.
    ///
    /// Inline storage needs the payload to fit the buffer, to be no more aligned than it, and to
    /// be relocatable without possible failure, since the box moves its buffer around with a
    /// plain byte copy. Anything else goes to the heap.
    pub const fn select(size: usize, align: usize, relocatable: bool) -> Strategy {
        if relocatable && size <= INLINE_CAPACITY && align <= INLINE_ALIGN {
            Strategy::Inline
        } else {
            Strategy::Heap
        }
    }

    /// The strategy used for values of type `T`.
    pub const fn of<T>() -> Strategy {
        // Rust moves are infallible bitwise copies: every `T` relocates safely.
        Strategy::select(size_of::<T>(), align_of::<T>(), true)
    }
}

/// Raw, suitably aligned bytes for an inline payload.
pub(crate) struct InlineBuffer {
    words: MaybeUninit<[usize; INLINE_WORDS]>,
}

impl InlineBuffer {
    fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr().cast()
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr().cast()
    }
}

/// The two ways a payload can be owned. Which one is in use is fixed by the payload type, see
/// [`Strategy::of`].
pub(crate) enum Storage {
    Inline(InlineBuffer),
    Heap(NonNull<u8>),
}

impl Storage {
    /// Moves `value` into storage picked by its type's strategy.
    pub(crate) fn store<T>(value: T) -> Storage {
        match Strategy::of::<T>() {
            Strategy::Inline => {
                let mut buffer = InlineBuffer {
                    words: MaybeUninit::uninit(),
                };
                debug_assert!(size_of::<T>() <= INLINE_CAPACITY && align_of::<T>() <= INLINE_ALIGN);
                // SAFETY: the strategy guarantees `T` fits the buffer's size and alignment.
                unsafe { ptr::write(buffer.as_mut_ptr().cast::<T>(), value) };
                Storage::Inline(buffer)
            }
            Strategy::Heap => Storage::Heap(NonNull::from(Box::leak(Box::new(value))).cast()),
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        match self {
            Storage::Inline(_) => Strategy::Inline,
            Storage::Heap(_) => Strategy::Heap,
        }
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        match self {
            Storage::Inline(buffer) => buffer.as_ptr(),
            Storage::Heap(ptr) => ptr.as_ptr(),
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        match self {
            Storage::Inline(buffer) => buffer.as_mut_ptr(),
            Storage::Heap(ptr) => ptr.as_ptr(),
        }
    }

    /// Moves the payload back out, releasing the heap allocation if there was one.
    ///
    /// # Safety
    /// The storage must hold a live `T`, created by `Storage::store::<T>`. It must not be used
    /// again afterwards.
    pub(crate) unsafe fn into_value<T>(self) -> T {
        match self {
            Storage::Inline(buffer) => ptr::read(buffer.as_ptr().cast::<T>()),
            Storage::Heap(ptr) => *Box::from_raw(ptr.as_ptr().cast::<T>()),
        }
    }

    /// Runs the payload's destructor and releases the heap allocation if there was one.
    ///
    /// # Safety
    /// Same contract as `into_value`.
    pub(crate) unsafe fn drop_value<T>(self) {
        match self {
            Storage::Inline(mut buffer) => ptr::drop_in_place(buffer.as_mut_ptr().cast::<T>()),
            Storage::Heap(ptr) => drop(Box::from_raw(ptr.as_ptr().cast::<T>())),
        }
    }
}
