use std::fmt;

/// Result alias used by every checked accessor.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;

/// Misuse of a container, reported to the immediate caller.
///
/// None of these are recovered from inside the containers: a failing accessor never substitutes
/// a default. The non-failing variants (`value_or`, `try_cast`, ...) are offered separately.
#[derive(Debug)]
#[non_exhaustive]
pub enum ContainerError {
    /// Checked access to a `Nullable` that holds no value.
    EmptyAccess {
        /// The payload type of the accessed container.
        type_name: &'static str,
    },
    /// Access to an alternative of a tagged union that is not the active one.
    WrongAlternative {
        /// The alternative position the caller asked for.
        expected: usize,
        /// The position that is actually live.
        active: usize,
    },
    /// By-type lookup on a union that lists the same type more than once.
    AmbiguousAlternative {
        type_name: &'static str,
        /// How many times the type appears in the alternative list.
        count: usize,
    },
    /// `cast` on an `AnyBox` whose stored type is not exactly the requested one.
    BadAnyCast {
        expected: &'static str,
        /// `None` when the box was empty.
        found: Option<&'static str>,
    },
    /// The payload's own constructor failed during an emplace.
    ConstructionFailure {
        type_name: &'static str,
        source: anyhow::Error,
    },
}

impl ContainerError {
    /// Wraps a failed constructor of `T`.
    pub fn construction<T: ?Sized>(source: impl Into<anyhow::Error>) -> Self {
        Self::ConstructionFailure {
            type_name: crate::short_type_name::<T>(),
            source: source.into(),
        }
    }

    /// Short, stable name of the error kind. Handy for logs and test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            ContainerError::EmptyAccess { .. } => "EmptyAccess",
            ContainerError::WrongAlternative { .. } => "WrongAlternative",
            ContainerError::AmbiguousAlternative { .. } => "AmbiguousAlternative",
            ContainerError::BadAnyCast { .. } => "BadAnyCast",
            ContainerError::ConstructionFailure { .. } => "ConstructionFailure",
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::EmptyAccess { type_name } => {
                write!(f, "bad nullable access: no `{}` value is present", type_name)
            }
            ContainerError::WrongAlternative { expected, active } => {
                write!(f, "bad union access: alternative {} requested, but alternative {} is active", expected, active)
            }
            ContainerError::AmbiguousAlternative { type_name, count } => {
                write!(f, "ambiguous union access: `{}` appears {} times in the alternative list", type_name, count)
            }
            ContainerError::BadAnyCast { expected, found: Some(found) } => {
                write!(f, "bad any cast: requested `{}`, but the box holds `{}`", expected, found)
            }
            ContainerError::BadAnyCast { expected, found: None } => {
                write!(f, "bad any cast: requested `{}`, but the box is empty", expected)
            }
            ContainerError::ConstructionFailure { type_name, source } => {
                write!(f, "failed to construct `{}`: {}", type_name, source)
            }
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::ConstructionFailure { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
