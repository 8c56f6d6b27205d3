use anyhow::Context;

use crate::nullable::Nullable;

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(mut value: Nullable<T>) -> Self {
        value.take()
    }
}

/// Unwraps a `Nullable` into its value. Can't be a `TryFrom<Nullable<T>> for T` because of the
/// orphan rules, hence the free function.
pub fn into_value<T>(mut value: Nullable<T>) -> anyhow::Result<T> {
    value
        .take()
        .with_context(|| format!("nullable `{}` held no value", holdall_core::short_type_name::<T>()))
}

impl<T> FromIterator<T> for Nullable<T> {
    /// Keeps the last item of the iterator, if there is one.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().last().into()
    }
}
