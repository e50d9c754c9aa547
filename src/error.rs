use std::fmt;
use thiserror::Error;

/// Which argument a rejected unit string was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRole {
    Source,
    Target,
    Any,
}

impl fmt::Display for UnitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source unit"),
            Self::Target => write!(f, "target unit"),
            Self::Any => write!(f, "unit"),
        }
    }
}

/// Errors raised by the conversion, formatting and parsing functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// A magnitude was negative or not a finite number.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// A unit string is not one of `B, KB, MB, GB, TB, PB`.
    #[error("Invalid {role}: {unit}")]
    InvalidUnit { role: UnitRole, unit: String },

    /// Input did not match the `<number> <unit>` grammar.
    #[error("Invalid byte format: {0}")]
    InvalidFormat(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

pub type Result<T> = std::result::Result<T, ByteError>;
