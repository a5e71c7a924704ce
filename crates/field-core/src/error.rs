use thiserror::Error;

/// Errors surfaced by the platform-free core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("unknown attractor mode id {0}")]
    UnknownMode(u32),
    #[error("grid width must be non-zero")]
    EmptyGrid,
    #[error("grid width {width} exceeds the supported maximum {max}")]
    GridTooLarge { width: u32, max: u32 },
    #[error("state buffer holds {actual} particles, expected {expected}")]
    StateSizeMismatch { expected: usize, actual: usize },
}
