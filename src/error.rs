// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for relbase operations.
//!
//! Provides structured error handling with detailed context for debugging.

use std::fmt;

/// Standard Result type for all relbase operations.
pub type RelResult<T> = Result<T, RelError>;

/// Error types for relbase operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RelError {
    /// Schema rejected at construction or load time.
    InvalidSchema { reason: String },

    /// Tuple does not match the schema on insert.
    TypeMismatch {
        column: String,
        reason: String,
        value: Option<String>,
    },

    /// Two schemas are not compatible for a set operation or join.
    SchemaMismatch {
        left: String,
        right: String,
        reason: String,
    },

    /// Attribute name not present in the schema.
    UnknownAttribute { attribute: String, relation: String },

    /// Primary key already present in the table.
    DuplicateKey { key: String, relation: String },

    /// firstKey/lastKey requested on an empty index.
    EmptyIndex { operation: String },

    /// Index structural invariant violated.
    CorruptedIndex { backend: String, reason: String },

    /// Index cannot grow further (pathological hash collision load).
    IndexCapacity { backend: String, reason: String },

    /// Invalid B+-Tree order.
    InvalidOrder { order: u16, min: u16 },

    /// Join attribute is not the primary key of the probed table.
    NotPrimaryKey { attribute: String, relation: String },

    /// Snapshot failed magic/length/checksum validation.
    CorruptedSnapshot { reason: String },

    /// I/O error during snapshot operations.
    IoError { operation: String, reason: String },

    /// Serialisation error.
    SerializationError { reason: String },

    /// Deserialisation error.
    DeserializationError { reason: String },
}

impl fmt::Display for RelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchema { reason } => {
                write!(f, "Invalid schema: {}", reason)
            }
            Self::TypeMismatch {
                column,
                reason,
                value,
            } => {
                if let Some(val) = value {
                    write!(
                        f,
                        "Type mismatch in column '{}': {} (value: '{}')",
                        column, reason, val
                    )
                } else {
                    write!(f, "Type mismatch in column '{}': {}", column, reason)
                }
            }
            Self::SchemaMismatch {
                left,
                right,
                reason,
            } => {
                write!(
                    f,
                    "Schemas '{}' and '{}' are not compatible: {}",
                    left, right, reason
                )
            }
            Self::UnknownAttribute {
                attribute,
                relation,
            } => {
                write!(
                    f,
                    "Unknown attribute '{}' in relation '{}'",
                    attribute, relation
                )
            }
            Self::DuplicateKey { key, relation } => {
                write!(f, "Duplicate key {} in relation '{}'", key, relation)
            }
            Self::EmptyIndex { operation } => {
                write!(f, "Operation '{}' undefined on empty index", operation)
            }
            Self::CorruptedIndex { backend, reason } => {
                write!(f, "Corrupted '{}' index: {}", backend, reason)
            }
            Self::IndexCapacity { backend, reason } => {
                write!(f, "Index '{}' cannot grow: {}", backend, reason)
            }
            Self::InvalidOrder { order, min } => {
                write!(f, "Invalid B+-Tree order: {} (minimum: {})", order, min)
            }
            Self::NotPrimaryKey {
                attribute,
                relation,
            } => {
                write!(
                    f,
                    "Attribute '{}' is not the primary key of relation '{}'",
                    attribute, relation
                )
            }
            Self::CorruptedSnapshot { reason } => {
                write!(f, "Corrupted snapshot: {}", reason)
            }
            Self::IoError { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
            Self::SerializationError { reason } => {
                write!(f, "Serialisation error: {}", reason)
            }
            Self::DeserializationError { reason } => {
                write!(f, "Deserialisation error: {}", reason)
            }
        }
    }
}

impl std::error::Error for RelError {}

// Convenience conversion from std::io::Error
impl From<std::io::Error> for RelError {
    fn from(err: std::io::Error) -> Self {
        RelError::IoError {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}
