//! Integration tests for dry-run mode
//!
//! Dry-run receives and masks normally but never prepares or writes the
//! destination table, and never deletes a message.

mod common;

use common::{config, login, MemoryQueue, MemorySink};
use maskload::config::parse_config;
use maskload::core::pipeline::PipelineCoordinator;
use std::sync::Arc;
use tokio::sync::watch;

#[test]
fn test_dry_run_default() {
    let config = config();
    assert!(!config.application.dry_run);
}

#[test]
fn test_dry_run_from_file() {
    let config = parse_config(&format!(
        "{}\n[application]\ndry_run = true\n",
        common::BASE_CONFIG
    ))
    .unwrap();
    assert!(config.application.dry_run);
}

#[tokio::test]
async fn test_dry_run_masks_without_writing_or_deleting() {
    let mut config = config();
    config.application.dry_run = true;

    let queue = Arc::new(MemoryQueue::new(vec![
        login("u1", "A", "10.0.0.1"),
        login("u2", "A", "10.0.0.2"),
    ]));
    let sink = Arc::new(MemorySink::default());
    let (_tx, rx) = watch::channel(false);

    let summary = PipelineCoordinator::with_components(config, queue.clone(), sink.clone(), rx)
        .execute()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.masked, 2);
    assert_eq!(summary.loaded, 0);
    assert_eq!(summary.acknowledged, 0);
    assert!(summary.is_successful());
    assert_eq!(summary.fields.len(), 2);
    assert_eq!(summary.fields[0].duplicated_values, 1);

    assert_eq!(sink.tables_ensured(), 0);
    assert!(sink.rows().is_empty());

    assert!(queue.acknowledged().is_empty());
    assert_eq!(queue.remaining(), 2);
}
