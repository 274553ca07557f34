use super::{csv_file, sample_rows};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::{StopReason, run_pipeline};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn config(workers: usize, buffer: usize) -> PipelineConfig {
    PipelineConfig {
        workers,
        buffer,
        error_threshold: 400,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn run_pipeline_aggregates_whole_file() {
    // Arrange
    let rows = sample_rows(1_000);
    let file = csv_file(&rows);

    // Act
    let report = run_pipeline(file.path(), &config(3, 100), CancellationToken::new())
        .await
        .unwrap();

    // Assert
    let stats = &report.statistics;
    assert_eq!(stats.total_requests, 1_000);
    // statuses cycle 200, 201, 404, 500, 302
    assert_eq!(stats.error_count, 400);
    assert_eq!(stats.requests_by_ip.len(), 7);
    assert_eq!(stats.requests_by_ip.values().sum::<u64>(), stats.total_requests);
    let expected_avg = (0..1_000u64).map(|i| i % 250).sum::<u64>() as f64 / 1_000.0;
    assert_eq!(stats.average_response_time, expected_avg);
    assert_eq!(report.source.stop, StopReason::Exhausted);
    assert_eq!(report.source.records_emitted, 1_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn run_pipeline_error_branches_agree() {
    for (workers, buffer) in [(1, 1), (3, 100), (8, 2)] {
        // Arrange
        let file = csv_file(&sample_rows(777));

        // Act
        let report = run_pipeline(file.path(), &config(workers, buffer), CancellationToken::new())
            .await
            .unwrap();

        // Assert
        assert_eq!(report.errors.error_count, report.statistics.error_count);
        assert_eq!(report.errors.total_requests, report.errors.error_count);
        assert_eq!(report.error_threshold, 400);
    }
}

#[tokio::test]
async fn run_pipeline_skips_malformed_line() {
    // Arrange
    let rows = vec![
        "2024-01-15 10:30:00,192.168.1.1,GET,/api/users,200,45".to_string(),
        "2024-01-15 10:30:01,192.168.1.2,GET".to_string(),
    ];
    let file = csv_file(&rows);

    // Act
    let report = run_pipeline(file.path(), &config(3, 100), CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(report.statistics.total_requests, 1);
    assert_eq!(report.statistics.average_response_time, 45.0);
    assert_eq!(report.source.malformed_count, 1);
    assert_eq!(report.source.malformed_samples[0].line(), 3);
}

#[tokio::test]
async fn run_pipeline_cancelled_returns_partial_statistics() {
    // Arrange
    let rows = sample_rows(20_000);
    let file = csv_file(&rows);
    let token = CancellationToken::new();
    token.cancel();

    // Act
    let report = tokio::time::timeout(
        Duration::from_secs(10),
        run_pipeline(file.path(), &config(3, 100), token),
    )
    .await
    .expect("pipeline did not stop after cancellation")
    .unwrap();

    // Assert
    assert!(report.statistics.total_requests < rows.len() as u64);
    assert_eq!(report.source.stop, StopReason::Cancelled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_pipeline_cancelled_while_running_terminates() {
    // Arrange
    let rows = sample_rows(200_000);
    let file = csv_file(&rows);
    let token = CancellationToken::new();
    let path = file.path().to_path_buf();
    let run = tokio::spawn({
        let token = token.clone();
        async move { run_pipeline(path, &config(3, 100), token).await }
    });

    // Act
    token.cancel();
    let report = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .expect("pipeline did not stop after cancellation")
        .unwrap()
        .unwrap();

    // Assert
    assert!(report.statistics.total_requests < rows.len() as u64);
    assert_eq!(
        report.statistics.requests_by_ip.values().sum::<u64>(),
        report.statistics.total_requests
    );
    assert_eq!(report.source.stop, StopReason::Cancelled);
}

#[tokio::test]
async fn run_pipeline_missing_file_is_open_failure() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_pipeline(
        dir.path().join("access.csv"),
        &config(3, 100),
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(PipelineError::Open { .. })));
}
