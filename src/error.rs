//! Error types.
//!
//! Tree mutation never fails: stale ids and non-member arguments are
//! ignored. The only checked failures are root misuse.

use thiserror::Error;

/// Errors reported by the [`Ui`](crate::Ui) context.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UiError {
    /// A root was already created for this context.
    #[error("root already exists")]
    RootAlreadyExists,

    /// The root has not been created yet.
    #[error("root not created yet")]
    RootMissing,
}
