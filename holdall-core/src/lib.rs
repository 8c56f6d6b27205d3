//!
//! This crate contains the vocabulary shared by the holdall containers: the error taxonomy and
//! a couple of type-naming helpers.
//!

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

/// Errors reported by checked container accessors.
pub mod error;

pub use error::{ContainerError, Result};

/// Returns the name of `T` with every module path removed, for readable error messages.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`, `&alloc::string::String`
/// becomes `&String`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    shorten(std::any::type_name::<T>())
}

/// Short names that could not be taken as a plain suffix of the full name, built once per name.
static SHORTENED: Lazy<Mutex<HashMap<&'static str, &'static str>>> = Lazy::new(Default::default);

/// Strips the module paths out of a full type name.
pub fn shorten(full: &'static str) -> &'static str {
    // Common case: one leading path (`alloc::string::String`), nothing nested.
    let head_end = full.find('<').unwrap_or(full.len());
    let tail = match full[..head_end].rfind("::") {
        Some(pos) if full[..pos].chars().all(|c| is_ident_char(c) || c == ':') => Some(&full[pos + 2..]),
        Some(_) => None,
        None => Some(full),
    };
    if let Some(tail) = tail.filter(|tail| !tail.contains("::")) {
        return tail;
    }

    let mut shortened = SHORTENED.lock().unwrap_or_else(PoisonError::into_inner);
    // One leaked string per distinct type name, so the total stays bounded.
    let short = *shortened
        .entry(full)
        .or_insert_with(|| &*Box::leak(strip_paths(full).into_boxed_str()));
    short
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Drops every `segment::` that directly precedes an identifier, wherever it appears.
fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    // Where the identifier currently being written starts in `out`.
    let mut ident_start = 0;
    let mut rest = full;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("::") && out.len() > ident_start {
            out.truncate(ident_start);
            rest = &rest[2..];
            continue;
        }
        out.push(c);
        if !is_ident_char(c) {
            ident_start = out.len();
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}
