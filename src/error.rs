//! Error types for the planwright authoring core.
//!
//! This module provides the error hierarchy for all operations in the
//! plan-authoring lifecycle: validation, collection edits, serialization,
//! and plan-file storage.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for planwright operations.
#[derive(Debug, Error)]
pub enum PlanwrightError {
    /// A required field is missing or a value is outside its allowed range.
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Errors raised while editing plan collections.
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Serialization and plan-file storage errors.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while editing plan collections.
#[derive(Debug, Error)]
pub enum EditError {
    /// No resource with the given id exists in the plan.
    #[error("No resource with id {id}")]
    UnknownResource {
        /// The id that failed to resolve.
        id: u32,
    },

    /// The targeted resource has no details attached yet.
    #[error("Resource {id} has no details to edit")]
    DetailsMissing {
        /// Id of the resource without details.
        id: u32,
    },

    /// An index points outside the targeted collection.
    #[error("Index {index} is out of range for {collection} of length {len}")]
    OutOfRange {
        /// Name of the collection being indexed.
        collection: &'static str,
        /// The offending index.
        index: usize,
        /// Current length of the collection.
        len: usize,
    },
}

/// Serialization and plan-file storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Plan file not found.
    #[error("Plan file not found: {path}")]
    NotFound {
        /// Path to the missing plan file.
        path: PathBuf,
    },

    /// Imported bytes do not parse as a plan document.
    #[error("Malformed plan document: {message}")]
    MalformedInput {
        /// Description of the parse failure.
        message: String,
    },

    /// A plan could not be serialized for export.
    #[error("Plan serialization error: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },
}

/// Result type alias for planwright operations.
pub type Result<T> = std::result::Result<T, PlanwrightError>;

impl PlanwrightError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Returns true if this error was caused by caller input rather than
    /// the system itself.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Edit(_) | Self::Store(StoreError::MalformedInput { .. })
        )
    }
}

impl EditError {
    /// Creates an out-of-range error for the given collection.
    #[must_use]
    pub const fn out_of_range(collection: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfRange {
            collection,
            index,
            len,
        }
    }
}

impl StoreError {
    /// Creates a malformed-input error with the given message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Creates a serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}
