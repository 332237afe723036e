//! Error types for the property protocol.
//!
//! This module defines the error type used throughout Rivet,
//! providing structured error handling with context.

use thiserror::Error;

/// A specialized Result type for Rivet operations.
pub type MetaResult<T> = Result<T, MetaError>;

/// The main error type for property protocol operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// A property name was not found in the owning type's meta-model.
    #[error("Unknown property '{property}' on {type_name}")]
    UnknownProperty {
        /// Simple name of the type whose meta-model was probed.
        type_name: String,
        /// The offending property name.
        property: String,
    },

    /// A read-only (derived) property was staged on a builder.
    #[error("Property '{property}' on {type_name} is read-only")]
    ReadOnlyProperty {
        /// Simple name of the owning type.
        type_name: String,
        /// The read-only property name.
        property: String,
    },

    /// A staged value's runtime kind did not match the declared kind.
    #[error("Type mismatch for property '{property}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The property being staged.
        property: String,
        /// The declared kind.
        expected: String,
        /// The runtime kind that was supplied.
        actual: String,
    },

    /// Text could not be parsed into a property's declared kind.
    #[error("Cannot parse '{text}' for property '{property}': {reason}")]
    ParseError {
        /// The property being staged.
        property: String,
        /// The text that failed to parse.
        text: String,
        /// Reason the parse failed.
        reason: String,
    },

    /// A validation rule was violated at build time.
    #[error("Validation failed for '{property}': {reason}")]
    ValidationFailed {
        /// The property (or property pair) that violated the rule.
        property: String,
        /// Reason for the violation.
        reason: String,
    },

    /// A meta-model was looked up before being registered.
    #[error("Meta-model not registered: {type_name}")]
    NotRegistered {
        /// Name of the unregistered type.
        type_name: String,
    },

    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl MetaError {
    /// Creates an unknown property error.
    #[must_use]
    pub fn unknown_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a read-only property error.
    #[must_use]
    pub fn read_only_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::ReadOnlyProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse_error(
        property: impl Into<String>,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            property: property.into(),
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation failure.
    #[must_use]
    pub fn validation_failed(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-registered error.
    #[must_use]
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::NotRegistered {
            type_name: type_name.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
