use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Identifier was empty after trimming.
    #[error("{kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    /// Session label is not one of the known sessions.
    #[error("unknown session label: {0}")]
    UnknownSession(String),
}

/// Configuration errors raised before any seat is assigned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Seating mode is not dense, sparse or mixed.
    #[error("invalid seating mode '{0}' (expected dense, sparse or mixed)")]
    InvalidMode(String),
}

/// Allocation value could not be coerced into the canonical shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// A leaf or key had the wrong type.
    #[error("allocation for {subject}/{room}: expected {expected}, found {found}")]
    TypeMismatch {
        subject: String,
        room: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The top-level value matches none of the tolerated shapes.
    #[error("unsupported allocation shape: {found}")]
    UnsupportedShape { found: String },
}

impl ShapeError {
    pub fn type_mismatch(
        subject: impl Into<String>,
        room: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            subject: subject.into(),
            room: room.into(),
            expected,
            found,
        }
    }

    pub fn unsupported(found: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
