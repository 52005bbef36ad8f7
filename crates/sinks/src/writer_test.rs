//! Tests for the batch writer

use std::sync::Arc;

use stargaze_protocol::{MeasurementPoint, PointFields, PointTags};

use super::*;
use crate::test_utils::{MemoryStore, WriteFailure};

fn point(name: &str) -> MeasurementPoint {
    MeasurementPoint {
        tags: PointTags {
            owner: "owner".into(),
            language: None,
        },
        fields: PointFields {
            name: name.into(),
            url: format!("https://github.com/owner/{}", name),
            stargazer_count: 1,
            fork_count: 0,
        },
        timestamp_ms: 0,
    }
}

fn points(n: usize) -> Vec<MeasurementPoint> {
    (0..n).map(|i| point(&format!("repo{}", i))).collect()
}

fn writer(store: &Arc<MemoryStore>) -> Writer {
    let store: Arc<dyn MetricsStore> = Arc::clone(store) as Arc<dyn MetricsStore>;
    let schema = Arc::new(SchemaManager::new(Arc::clone(&store)));
    Writer::new(schema, store, "repositories")
}

async fn ready_writer(store: &Arc<MemoryStore>) -> Writer {
    let writer = writer(store);
    writer.schema().ensure_ready().await.unwrap();
    writer
}

// =============================================================================
// Schema not ready
// =============================================================================

#[tokio::test]
async fn test_not_ready_drops_batch_without_writing() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = writer(&store);

    let outcome = writer.store(&points(3)).await;

    assert!(matches!(
        outcome,
        WriteOutcome::Dropped {
            points: 3,
            readiness: Ok(Readiness::Found)
        }
    ));
    assert_eq!(store.write_calls(), 0);
    // Exactly one readiness check was triggered
    assert_eq!(store.list_calls(), 1);
    assert!(writer.schema().is_ready());
}

#[tokio::test]
async fn test_dropped_batch_is_not_replayed() {
    let store = Arc::new(MemoryStore::new("github"));
    let writer = writer(&store);

    writer.store(&points(2)).await;
    let outcome = writer.store(&[point("next")]).await;

    assert!(outcome.is_written());
    let written = store.points();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].fields.name, "next");
}

#[tokio::test]
async fn test_not_ready_with_failing_store_reports_schema_error() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    store.set_fail_list(true);
    let writer = writer(&store);

    let outcome = writer.store(&points(2)).await;

    assert!(matches!(
        outcome,
        WriteOutcome::Dropped {
            readiness: Err(SchemaInitError::List(_)),
            ..
        }
    ));
    assert!(!writer.schema().is_ready());
    assert_eq!(store.write_calls(), 0);

    let snapshot = writer.metrics().snapshot();
    assert_eq!(snapshot.batches_dropped, 1);
    assert_eq!(snapshot.points_dropped, 2);
}

// =============================================================================
// Schema ready
// =============================================================================

#[tokio::test]
async fn test_ready_writes_single_batch() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = ready_writer(&store).await;

    let outcome = writer.store(&points(5)).await;

    assert!(matches!(outcome, WriteOutcome::Written { points: 5 }));
    assert_eq!(store.write_calls(), 1);
    let batches = store.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].measurement, "repositories");
    assert_eq!(batches[0].points.len(), 5);

    let snapshot = writer.metrics().snapshot();
    assert_eq!(snapshot.batches_written, 1);
    assert_eq!(snapshot.points_written, 5);
}

#[tokio::test]
async fn test_no_deduplication_between_batches() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = ready_writer(&store).await;

    writer.store(&[point("same")]).await;
    writer.store(&[point("same")]).await;

    assert_eq!(store.points().len(), 2);
}

#[tokio::test]
async fn test_empty_batch_does_not_contact_store() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = writer(&store);

    let outcome = writer.store(&[]).await;

    assert!(matches!(outcome, WriteOutcome::Written { points: 0 }));
    assert_eq!(store.list_calls(), 0);
    assert_eq!(store.write_calls(), 0);
}

#[tokio::test]
async fn test_partial_write_is_single_aggregate_failure() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = ready_writer(&store).await;
    store.set_write_failure(Some(WriteFailure::PartialWrite { rejected: 1 }));

    let outcome = writer.store(&points(5)).await;

    match outcome {
        WriteOutcome::Failed {
            points,
            error,
            recheck,
        } => {
            assert_eq!(points, 5);
            assert!(matches!(error, StoreError::PartialWrite(_)));
            assert!(recheck.is_none());
        }
        other => panic!("expected failure, got {:?}", other),
    }
    // One write, no per-point retry, no readiness re-check for data errors
    assert_eq!(store.write_calls(), 1);
    assert_eq!(store.list_calls(), 1);
    assert_eq!(writer.metrics().snapshot().write_errors, 1);
    assert!(writer.schema().is_ready());
}

#[tokio::test]
async fn test_store_failure_triggers_fresh_readiness_check() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = ready_writer(&store).await;
    store.drop_database("github");
    store.set_write_failure(Some(WriteFailure::Unavailable));

    let outcome = writer.store(&points(2)).await;

    assert!(matches!(
        outcome,
        WriteOutcome::Failed {
            points: 2,
            recheck: Some(Ok(Readiness::Created)),
            ..
        }
    ));
    assert_eq!(store.write_calls(), 1);
    assert_eq!(store.list_calls(), 2);
    assert_eq!(store.databases(), vec!["github"]);
    // Readiness never flips back to false
    assert!(writer.schema().is_ready());
}

#[tokio::test]
async fn test_failed_recheck_is_reported_in_outcome() {
    let store = Arc::new(MemoryStore::with_existing("github"));
    let writer = ready_writer(&store).await;
    store.set_write_failure(Some(WriteFailure::Unavailable));
    store.set_fail_list(true);

    let outcome = writer.store(&points(3)).await;

    match outcome {
        WriteOutcome::Failed {
            recheck: Some(Err(SchemaInitError::List(_))),
            ..
        } => {}
        other => panic!("expected failed recheck, got {:?}", other),
    }
    assert!(writer.schema().is_ready());
}

#[test]
fn test_outcome_points() {
    assert_eq!(WriteOutcome::Written { points: 4 }.points(), 4);
    let failed = WriteOutcome::Failed {
        points: 2,
        error: StoreError::Query("x".into()),
        recheck: None,
    };
    assert_eq!(failed.points(), 2);
    assert!(!failed.is_written());
}
