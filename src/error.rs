//! Error types for the WiSARD classifier.

use thiserror::Error;

/// Errors raised while building, training or querying a network.
///
/// All variants are argument-validation failures. They are detected before
/// any memory is touched, so a failed call never leaves a partial update behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WisardError {
    /// Construction parameters are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input vector is shorter than the configured input size.
    #[error("Invalid input: expected at least {expected} symbols, got {got}")]
    InvalidInput { expected: usize, got: usize },

    /// Class label outside `[0, num_classes)`.
    #[error("Invalid class: {class} is not in [0, {num_classes})")]
    InvalidClass { class: usize, num_classes: usize },
}

/// Result type alias for WiSARD operations.
pub type Result<T> = std::result::Result<T, WisardError>;
