// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the metrics collector.

use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use serial_test::serial;

#[test]
fn test_record_and_count() {
    let collector = MetricsCollector::new();
    assert!(collector.is_empty());

    collector.record(Metric::new("bptree.leaf_split", 1.0, MetricUnit::Count));
    collector.record(Metric::new("bptree.leaf_split", 1.0, MetricUnit::Count));
    collector.record(Metric::new("exthash.bucket_split", 1.0, MetricUnit::Count));

    assert_eq!(collector.len(), 3);
    assert_eq!(collector.count_of("bptree.leaf_split"), 2.0);
    assert_eq!(collector.count_of("exthash.bucket_split"), 1.0);
    assert_eq!(collector.count_of("missing"), 0.0);
}

#[test]
fn test_snapshot_clones_observations() {
    let collector = MetricsCollector::new();
    collector.record(
        Metric::new("table.insert_rejected", 1.0, MetricUnit::Count).with_tag("relation", "s"),
    );

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "table.insert_rejected");
    assert_eq!(snapshot[0].tags[0], ("relation".to_string(), "s".to_string()));

    // Snapshot is a copy; collector still holds the observation
    assert_eq!(collector.len(), 1);
}

#[test]
fn test_clear() {
    let collector = MetricsCollector::new();
    collector.record(Metric::new("x", 1.0, MetricUnit::Count));
    collector.clear();
    assert!(collector.is_empty());
}

#[test]
#[serial]
fn test_global_collector_is_shared() {
    MetricsCollector::global().clear();
    MetricsCollector::global().record(Metric::new("shared.event", 2.0, MetricUnit::Count));
    assert!(MetricsCollector::global().count_of("shared.event") >= 2.0);
    MetricsCollector::global().clear();
}

#[test]
fn test_unit_display() {
    assert_eq!(MetricUnit::Count.to_string(), "count");
    assert_eq!(MetricUnit::Bytes.to_string(), "bytes");
}
