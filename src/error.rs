//! Crate-level error types.

use std::fmt;

/// Control path construction failures
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// Fewer than two control points were supplied.
    TooFewPoints { got: usize },
    /// A control point has a NaN or infinite coordinate.
    NonFinitePoint { index: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { got } => {
                write!(f, "a path needs at least 2 control points, got {got}")
            }
            Self::NonFinitePoint { index } => {
                write!(f, "control point {index} is not finite")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Rejected scale values; the previous scale stays in effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleError {
    /// Scale must be finite and strictly positive.
    NonPositive(f32),
    /// Scaled path coordinates would no longer fit in an `f32`.
    OutOfRange(f32),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(value) => {
                write!(f, "scale must be a positive number, got {value}")
            }
            Self::OutOfRange(value) => {
                write!(f, "scale {value} would move the path out of range")
            }
        }
    }
}

impl std::error::Error for ScaleError {}

/// Errors produced by the navigation crate.
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// Invalid control path.
    Path(PathError),
    /// Invalid scale value.
    Scale(ScaleError),
    /// Configuration value out of range.
    Config(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(e) => write!(f, "path error: {e}"),
            Self::Scale(e) => write!(f, "scale error: {e}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Path(e) => Some(e),
            Self::Scale(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<PathError> for NavError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<ScaleError> for NavError {
    fn from(e: ScaleError) -> Self {
        Self::Scale(e)
    }
}
