use std::any::TypeId;
use std::fmt;

use holdall_core::{short_type_name, ContainerError, Result};
use log::{debug, trace};

use crate::visit::{Visitor, VisitorMut};

/// Behavior shared by every tagged union, whatever its arity.
pub trait TaggedUnion: Sized {
    /// How many alternatives the union lists.
    const COUNT: usize;

    /// Position of the live alternative, always in `0..COUNT`.
    fn index(&self) -> usize;

    /// Name of the live alternative's type.
    fn active_type_name(&self) -> &'static str;

    /// Name of the type listed at `position`, if the position exists.
    fn type_name_at(position: usize) -> Option<&'static str>;
}

/// Access to the alternative listed at position `I`.
///
/// Only implemented for positions that exist, so `get::<7>()` on a three-way union does not
/// compile.
pub trait Alternative<const I: usize>: TaggedUnion {
    type Type;

    fn wrap(value: Self::Type) -> Self;

    fn peek(&self) -> Option<&Self::Type>;

    fn peek_mut(&mut self) -> Option<&mut Self::Type>;

    /// Extracts the value, or gives the union back untouched if `I` is not active.
    fn unwrap_alternative(self) -> std::result::Result<Self::Type, Self>;

    /// Drops the live alternative and stores `value` as alternative `I`.
    fn replace_with(&mut self, value: Self::Type) -> &mut Self::Type;
}

/// Marker naming a position in the alternative list. Only ever used as an inferred type
/// argument: `u.holds::<String, _>()`.
pub struct Pos<const I: usize>;

/// Locates alternative type `T` at position `P`.
///
/// The position is inferred from `T` at the call site. A type listed twice has two candidate
/// positions, so by-type access on it fails to compile as ambiguous.
///
/// ```
/// use holdall_variant::Union3;
///
/// let u = Union3::<i32, f32, String>::make::<2>("hello".to_string());
/// assert!(u.holds::<String, _>());
/// assert!(!u.holds::<i32, _>());
/// ```
///
/// ```compile_fail
/// use holdall_variant::Union3;
///
/// let u = Union3::<i32, i32, String>::make::<0>(1);
/// u.holds::<i32, _>();
/// ```
pub trait Locate<T, P>: TaggedUnion {
    const POSITION: usize;

    fn locate(&self) -> Option<&T>;

    fn locate_mut(&mut self) -> Option<&mut T>;

    fn wrap_located(value: T) -> Self;

    fn replace_located(&mut self, value: T) -> &mut T;
}

/// Finds where `wanted` sits in a list of alternative type ids.
fn find_position(ids: &[TypeId], wanted: TypeId, type_name: &'static str) -> Result<Option<usize>> {
    let mut hits = ids.iter().enumerate().filter(|(_, id)| **id == wanted).map(|(position, _)| position);
    match (hits.next(), hits.count()) {
        (None, _) => Ok(None),
        (Some(position), 0) => Ok(Some(position)),
        (Some(_), others) => Err(ContainerError::AmbiguousAlternative {
            type_name,
            count: others + 1,
        }),
    }
}

macro_rules! tagged_union {
    (@alternative $name:ident [$($g:ident),+] $idx:literal $variant:ident $ty:ident) => {
        impl<$($g),+> Alternative<$idx> for $name<$($g),+> {
            type Type = $ty;

            #[inline(always)]
            fn wrap(value: $ty) -> Self {
                $name::$variant(value)
            }

            #[inline(always)]
            fn peek(&self) -> Option<&$ty> {
                match self {
                    $name::$variant(value) => Some(value),
                    _ => None,
                }
            }

            #[inline(always)]
            fn peek_mut(&mut self) -> Option<&mut $ty> {
                match self {
                    $name::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn unwrap_alternative(self) -> std::result::Result<$ty, Self> {
                match self {
                    $name::$variant(value) => Ok(value),
                    other => Err(other),
                }
            }

            fn replace_with(&mut self, value: $ty) -> &mut $ty {
                // The replacement is fully built before the old value goes, so there is no
                // moment where nothing is live.
                *self = $name::$variant(value);
                match self {
                    $name::$variant(value) => value,
                    _ => unreachable!("alternative was just stored"),
                }
            }
        }

        impl<$($g),+> Locate<$ty, Pos<$idx>> for $name<$($g),+> {
            const POSITION: usize = $idx;

            #[inline(always)]
            fn locate(&self) -> Option<&$ty> {
                <Self as Alternative<$idx>>::peek(self)
            }

            #[inline(always)]
            fn locate_mut(&mut self) -> Option<&mut $ty> {
                <Self as Alternative<$idx>>::peek_mut(self)
            }

            #[inline(always)]
            fn wrap_located(value: $ty) -> Self {
                <Self as Alternative<$idx>>::wrap(value)
            }

            fn replace_located(&mut self, value: $ty) -> &mut $ty {
                <Self as Alternative<$idx>>::replace_with(self, value)
            }
        }
    };

    (@body
        $(#[$meta:meta])*
        $name:ident [$first:ident $(, $rest:ident)*] {
            $($idx:literal => $variant:ident($ty:ident), $branch:ident: $branch_ty:ident);+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name<$first $(, $rest)*> {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )+
        }

        impl<$first $(, $rest)*> TaggedUnion for $name<$first $(, $rest)*> {
            const COUNT: usize = [$($idx),+].len();

            #[inline(always)]
            fn index(&self) -> usize {
                match self {
                    $($name::$variant(_) => $idx,)+
                }
            }

            fn active_type_name(&self) -> &'static str {
                match self {
                    $($name::$variant(_) => short_type_name::<$ty>(),)+
                }
            }

            fn type_name_at(position: usize) -> Option<&'static str> {
                match position {
                    $($idx => Some(short_type_name::<$ty>()),)+
                    _ => None,
                }
            }
        }

        impl<$first $(, $rest)*> $name<$first $(, $rest)*> {
            /// Builds the union with alternative `I` active.
            pub fn make<const I: usize>(value: <Self as Alternative<I>>::Type) -> Self
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::wrap(value)
            }

            /// Builds the union with the alternative of type `T` active.
            ///
            /// Call it as `Union3::<i32, f32, String>::make_by_type::<f32, _>(2.0)`. Like the other
            /// by-type accessors, it does not compile when `T` is listed twice or not at all.
            pub fn make_by_type<T, P>(value: T) -> Self
            where
                Self: Locate<T, P>,
            {
                <Self as Locate<T, P>>::wrap_located(value)
            }

            /// Position of the live alternative.
            #[inline(always)]
            pub fn index(&self) -> usize {
                TaggedUnion::index(self)
            }

            /// Returns alternative `I`, or `WrongAlternative` if another one is live.
            pub fn get<const I: usize>(&self) -> Result<&<Self as Alternative<I>>::Type>
            where
                Self: Alternative<I>,
            {
                let active = self.index();
                <Self as Alternative<I>>::peek(self).ok_or(ContainerError::WrongAlternative { expected: I, active })
            }

            pub fn get_mut<const I: usize>(&mut self) -> Result<&mut <Self as Alternative<I>>::Type>
            where
                Self: Alternative<I>,
            {
                let active = self.index();
                <Self as Alternative<I>>::peek_mut(self).ok_or(ContainerError::WrongAlternative { expected: I, active })
            }

            /// Unwraps alternative `I`, handing the union back if another one is live.
            pub fn into_alternative<const I: usize>(self) -> std::result::Result<<Self as Alternative<I>>::Type, Self>
            where
                Self: Alternative<I>,
            {
                <Self as Alternative<I>>::unwrap_alternative(self)
            }

            /// Replaces the live alternative with alternative `I`.
            pub fn emplace<const I: usize>(&mut self, value: <Self as Alternative<I>>::Type) -> &mut <Self as Alternative<I>>::Type
            where
                Self: Alternative<I>,
            {
                trace!("{}: alternative {} -> {}", stringify!($name), self.index(), I);
                <Self as Alternative<I>>::replace_with(self, value)
            }

            /// Builds alternative `I` with `make`, and only then swaps it in.
            ///
            /// If `make` fails, or panics, the previous alternative is left exactly as it was.
            pub fn try_emplace<const I: usize, M, X>(&mut self, make: M) -> Result<&mut <Self as Alternative<I>>::Type>
            where
                Self: Alternative<I>,
                M: FnOnce() -> std::result::Result<<Self as Alternative<I>>::Type, X>,
                X: Into<anyhow::Error>,
            {
                match make() {
                    Ok(value) => Ok(self.emplace::<I>(value)),
                    Err(err) => {
                        let err = ContainerError::construction::<<Self as Alternative<I>>::Type>(err);
                        debug!("{}: kept alternative {} after a failed construction: {}", stringify!($name), self.index(), err);
                        Err(err)
                    }
                }
            }

            /// Whether the live alternative is of type `T`.
            ///
            /// Call it as `u.holds::<T, _>()`. Rejected at compile time when `T` is listed more
            /// than once, or not at all.
            pub fn holds<T, P>(&self) -> bool
            where
                Self: Locate<T, P>,
            {
                <Self as Locate<T, P>>::locate(self).is_some()
            }

            pub fn get_by_type<T, P>(&self) -> Result<&T>
            where
                Self: Locate<T, P>,
            {
                let active = self.index();
                <Self as Locate<T, P>>::locate(self).ok_or(ContainerError::WrongAlternative {
                    expected: <Self as Locate<T, P>>::POSITION,
                    active,
                })
            }

            pub fn get_by_type_mut<T, P>(&mut self) -> Result<&mut T>
            where
                Self: Locate<T, P>,
            {
                let active = self.index();
                <Self as Locate<T, P>>::locate_mut(self).ok_or(ContainerError::WrongAlternative {
                    expected: <Self as Locate<T, P>>::POSITION,
                    active,
                })
            }

            pub fn emplace_by_type<T, P>(&mut self, value: T) -> &mut T
            where
                Self: Locate<T, P>,
            {
                <Self as Locate<T, P>>::replace_located(self, value)
            }

            /// Runtime lookup of `T` in the alternative list, by `TypeId`.
            ///
            /// `Ok(None)` if `T` is not listed, `AmbiguousAlternative` if it is listed more than once.
            pub fn position_of<T: 'static>() -> Result<Option<usize>>
            where
                $first: 'static,
                $($rest: 'static,)*
            {
                let ids = [TypeId::of::<$first>() $(, TypeId::of::<$rest>())*];
                find_position(&ids, TypeId::of::<T>(), short_type_name::<T>())
            }

            /// Checked, runtime flavor of [`Self::holds`] that reports ambiguity as an error.
            pub fn try_holds<T: 'static>(&self) -> Result<bool>
            where
                $first: 'static,
                $($rest: 'static,)*
            {
                Ok(Self::position_of::<T>()? == Some(self.index()))
            }

            /// Hands the live value to the visitor's matching branch, and only that one.
            pub fn visit<V, R>(&self, mut visitor: V) -> R
            where
                $(V: Visitor<$ty, Output = R>,)+
            {
                match self {
                    $($name::$variant(value) => <V as Visitor<$ty>>::visit(&mut visitor, value),)+
                }
            }

            pub fn visit_mut<V, R>(&mut self, mut visitor: V) -> R
            where
                $(V: VisitorMut<$ty, Output = R>,)+
            {
                match self {
                    $($name::$variant(value) => <V as VisitorMut<$ty>>::visit_mut(&mut visitor, value),)+
                }
            }

            /// Consumes the union, running the closure that matches the live alternative.
            pub fn fold<R, $($branch_ty),+>(self, $($branch: $branch_ty),+) -> R
            where
                $($branch_ty: FnOnce($ty) -> R,)+
            {
                match self {
                    $($name::$variant(value) => $branch(value),)+
                }
            }
        }

        impl<$first: Default $(, $rest)*> Default for $name<$first $(, $rest)*> {
            /// The first alternative, default-constructed.
            fn default() -> Self {
                Self::make::<0>($first::default())
            }
        }

        impl<$first: fmt::Display $(, $rest: fmt::Display)*> fmt::Display for $name<$first $(, $rest)*> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant(value) => fmt::Display::fmt(value, f),)+
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $name:ident $generics:tt {
            $($idx:literal => $variant:ident($ty:ident), $branch:ident: $branch_ty:ident);+ $(;)?
        }
    ) => {
        tagged_union!(@body $(#[$meta])* $name $generics { $($idx => $variant($ty), $branch: $branch_ty);+ });
        $(tagged_union!(@alternative $name $generics $idx $variant $ty);)+
    };
}

tagged_union! {
    /// One value out of two alternative types.
    Union2 [A, B] {
        0 => V0(A), on_0: F0;
        1 => V1(B), on_1: F1;
    }
}

tagged_union! {
    /// One value out of three alternative types.
    Union3 [A, B, C] {
        0 => V0(A), on_0: F0;
        1 => V1(B), on_1: F1;
        2 => V2(C), on_2: F2;
    }
}

tagged_union! {
    /// One value out of four alternative types.
    Union4 [A, B, C, D] {
        0 => V0(A), on_0: F0;
        1 => V1(B), on_1: F1;
        2 => V2(C), on_2: F2;
        3 => V3(D), on_3: F3;
    }
}

tagged_union! {
    /// One value out of five alternative types.
    Union5 [A, B, C, D, E] {
        0 => V0(A), on_0: F0;
        1 => V1(B), on_1: F1;
        2 => V2(C), on_2: F2;
        3 => V3(D), on_3: F3;
        4 => V4(E), on_4: F4;
    }
}

tagged_union! {
    /// One value out of six alternative types.
    Union6 [A, B, C, D, E, F] {
        0 => V0(A), on_0: F0;
        1 => V1(B), on_1: F1;
        2 => V2(C), on_2: F2;
        3 => V3(D), on_3: F3;
        4 => V4(E), on_4: F4;
        5 => V5(F), on_5: F5;
    }
}
