// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Whole-table snapshots over byte streams.
//!
//! The persistence boundary of the engine: a table saves to any `Write`
//! sink and loads from any `Read` source, with round-trip identity on
//! the table's observable state. The byte layout is opaque to callers
//! and validated on load:
//!
//! ```text
//! ┌───────┬───────────┬──────────────────────────┬───────────┐
//! │ RELB  │ length    │ payload                  │ CRC32     │
//! │ 4 B   │ 4 B (LE)  │ bincode(schema, tuples,  │ 4 B (LE)  │
//! │       │           │         index config)    │           │
//! └───────┴───────────┴──────────────────────────┴───────────┘
//! ```
//!
//! The primary-key index is not serialised; loading rebuilds it from the
//! tuples under the saved configuration.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::schema::{ColumnDef, Schema};
//! use relbase::table::Table;
//! use relbase::value::{Domain, Value};
//!
//! let schema = Schema::new(
//!     "student",
//!     vec![ColumnDef::new("id", Domain::I32)],
//!     &["id"],
//! )?;
//! let mut table = Table::with_default_index(schema)?;
//! table.insert(vec![Value::I32(1)])?;
//!
//! let mut buffer = Vec::new();
//! relbase::snapshot::save(&table, &mut buffer)?;
//!
//! let restored = relbase::snapshot::load(&mut buffer.as_slice())?;
//! assert_eq!(restored.tuples(), table.tuples());
//! # Ok::<(), relbase::RelError>(())
//! ```

use crate::error::{RelError, RelResult};
use crate::indices::IndexConfig;
use crate::schema::Schema;
use crate::table::Table;
use crate::value::Tuple;
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};


/// Magic bytes opening every snapshot.
const MAGIC: &[u8; 4] = b"RELB";

/// Upper bound on the payload length field; larger values are treated
/// as corruption.
const MAX_PAYLOAD: u32 = 1 << 30;

/// Serialised table state; the index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    schema: Schema,
    tuples: Vec<Tuple>,
    config: IndexConfig,
}

fn io_error(operation: &str, err: std::io::Error) -> RelError {
    RelError::IoError {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

fn corrupted(reason: String) -> RelError {
    RelError::CorruptedSnapshot { reason }
}

/// Save a table to a byte sink.
///
/// ## Input
/// - `table`: Table to snapshot
/// - `sink`: Destination stream (owned by the caller; nothing is
///   retained on success or failure)
///
/// ## Error Conditions
/// - `SerializationError`: payload encoding failed
/// - `IoError`: the sink rejected a write
pub fn save<W: Write>(table: &Table, sink: &mut W) -> RelResult<()> {
    let record = SnapshotRecord {
        schema: table.schema().clone(),
        tuples: table.tuples().to_vec(),
        config: table.config().clone(),
    };
    let payload = bincode::serialize(&record).map_err(|e| RelError::SerializationError {
        reason: e.to_string(),
    })?;

    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let checksum = hasher.finalize();

    sink.write_all(MAGIC).map_err(|e| io_error("write_magic", e))?;
    sink.write_all(&(payload.len() as u32).to_le_bytes())
        .map_err(|e| io_error("write_length", e))?;
    sink.write_all(&payload)
        .map_err(|e| io_error("write_payload", e))?;
    sink.write_all(&checksum.to_le_bytes())
        .map_err(|e| io_error("write_checksum", e))?;
    sink.flush().map_err(|e| io_error("flush_snapshot", e))?;
    Ok(())
}

/// Load a table from a byte source.
///
/// Verifies magic, length, and checksum, re-checks every tuple against
/// the saved schema, and rebuilds the primary-key index.
///
/// ## Error Conditions
/// - `IoError`: the source failed or ended early
/// - `CorruptedSnapshot`: bad magic, checksum mismatch, undecodable
///   payload, or a tuple violating the saved schema
pub fn load<R: Read>(source: &mut R) -> RelResult<Table> {
    let mut magic = [0u8; 4];
    source
        .read_exact(&mut magic)
        .map_err(|e| io_error("read_magic", e))?;
    if &magic != MAGIC {
        return Err(corrupted(format!("bad magic bytes {:02x?}", magic)));
    }

    let mut length = [0u8; 4];
    source
        .read_exact(&mut length)
        .map_err(|e| io_error("read_length", e))?;
    let length = u32::from_le_bytes(length);
    if length > MAX_PAYLOAD {
        return Err(corrupted(format!("payload length {} out of range", length)));
    }

    let mut payload = vec![0u8; length as usize];
    source
        .read_exact(&mut payload)
        .map_err(|e| io_error("read_payload", e))?;

    let mut stored = [0u8; 4];
    source
        .read_exact(&mut stored)
        .map_err(|e| io_error("read_checksum", e))?;
    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let computed = hasher.finalize();
    if computed != u32::from_le_bytes(stored) {
        return Err(corrupted(format!(
            "checksum mismatch: stored {:08X}, computed {:08X}",
            u32::from_le_bytes(stored),
            computed
        )));
    }

    let record: SnapshotRecord = bincode::deserialize(&payload)
        .map_err(|e| corrupted(format!("payload decode failed: {}", e)))?;

    record
        .schema
        .validate_structure()
        .map_err(|e| corrupted(format!("saved schema invalid: {}", e)))?;
    for tuple in &record.tuples {
        record
            .schema
            .type_check(tuple)
            .map_err(|e| corrupted(format!("saved tuple violates schema: {}", e)))?;
    }

    Table::derive(record.schema, record.tuples, &record.config)
}
