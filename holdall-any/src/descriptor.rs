use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::mem::{align_of, size_of};

use holdall_core::shorten;

use crate::storage::{Storage, Strategy};

/// Describes the dynamic type held by an `AnyBox`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    size: usize,
    align: usize,
    strategy: Strategy,
}

impl TypeDescriptor {
    /// The descriptor a box would record for a `T` payload.
    pub fn of<T: Any>() -> Self {
        TypeDescriptor {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            size: size_of::<T>(),
            align: align_of::<T>(),
            strategy: Strategy::of::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, module path included.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with its module paths stripped, generic arguments included.
    pub fn short_name(&self) -> &'static str {
        shorten(self.name)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn align(&self) -> usize {
        self.align
    }

    /// Whether the payload sits inline or on the heap.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("align", &self.align)
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Everything a box needs to handle a payload whose type it no longer knows statically.
///
/// One record exists per payload type, in static memory, captured when a value is stored.
pub(crate) struct TypeOps {
    pub type_id: fn() -> TypeId,
    pub type_name: fn() -> &'static str,
    pub size: usize,
    pub align: usize,
    pub strategy: Strategy,
    pub drop: unsafe fn(Storage),
    pub clone: unsafe fn(&Storage) -> Storage,
}

impl TypeOps {
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            id: (self.type_id)(),
            name: (self.type_name)(),
            size: self.size,
            align: self.align,
            strategy: self.strategy,
        }
    }
}

struct OpsFor<T>(PhantomData<T>);

impl<T: Any + Clone> OpsFor<T> {
    const OPS: TypeOps = TypeOps {
        type_id: TypeId::of::<T>,
        type_name: std::any::type_name::<T>,
        size: size_of::<T>(),
        align: align_of::<T>(),
        strategy: Strategy::of::<T>(),
        drop: Storage::drop_value::<T>,
        clone: clone_value::<T>,
    };
}

/// The operations record for `T`.
pub(crate) fn ops_for<T: Any + Clone>() -> &'static TypeOps {
    &OpsFor::<T>::OPS
}

/// # Safety
/// `storage` must hold a live `T`.
unsafe fn clone_value<T: Clone>(storage: &Storage) -> Storage {
    let value = &*storage.as_ptr().cast::<T>();
    Storage::store(value.clone())
}
