// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Scalar values, domains, and composite keys.
//!
//! The engine stores polymorphic, totally-ordered scalars. A `Domain`
//! declares the admissible class for an attribute; a `Value` is one scalar
//! tagged with its class; a `KeyType` is the ordered sequence of values
//! forming a tuple's primary-key projection.
//!
//! ## Ordering and Hashing
//!
//! `Value` implements `Ord` and `Hash` so every index backend can use it
//! directly. Floats order by IEEE-754 total ordering and hash by bit
//! pattern, keeping equality, ordering, and hashing mutually consistent.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::value::{Domain, KeyType, Value};
//!
//! let id = Value::I32(7);
//! assert!(id.matches(Domain::I32));
//! assert!(!id.matches(Domain::Str));
//!
//! let key = KeyType::new(vec![Value::I32(7), Value::Str("x".into())]);
//! assert_eq!(key.arity(), 2);
//! ```

mod key;
mod types;

#[cfg(test)]
mod key_test;
#[cfg(test)]
mod types_test;

// Re-export public API
pub use key::KeyType;
pub use types::{Domain, Tuple, Value};
