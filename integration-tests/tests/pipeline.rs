use integration_tests::harness::{CsvFile, fixture_path};
use logflow_core::cli::analyze::render_report;
use logflow_core::config::{ConfigOverrides, load_config};
use logflow_core::pipeline::{StopReason, run_pipeline};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fixture_log_produces_expected_report() {
    // Arrange
    let config = load_config(None, &ConfigOverrides::default()).unwrap();

    // Act
    let report = run_pipeline(
        fixture_path("access.csv"),
        &config.pipeline,
        CancellationToken::new(),
    )
    .await
    .unwrap();
    let out = render_report(&report, config.report.top, false);

    // Assert
    assert_eq!(
        out,
        "Total requests: 10\n\
         Total errors (status >= 400): 4\n\
         Average response time: 163.90 ms\n\
         Top 5 IP addresses:\n\
         192.168.1.10: 4 requests\n\
         10.0.0.5: 2 requests\n\
         192.168.1.11: 2 requests\n\
         172.16.0.2: 1 requests\n\
         192.168.1.12: 1 requests\n\
         \n\
         Status: 1xx=0 2xx=5 3xx=1 4xx=2 5xx=2 other=0\n\
         Response time p95 ≈ 1001ms | p99 ≈ 1001ms\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn large_log_counts_are_consistent() {
    // Arrange
    let csv = CsvFile::generated(50_000, 13);
    let config = load_config(None, &ConfigOverrides::default()).unwrap();

    // Act
    let report = run_pipeline(csv.path(), &config.pipeline, CancellationToken::new())
        .await
        .unwrap();

    // Assert
    let stats = &report.statistics;
    assert_eq!(stats.total_requests, 50_000);
    assert_eq!(stats.requests_by_ip.values().sum::<u64>(), stats.total_requests);
    assert_eq!(stats.error_count, 12_500);
    assert_eq!(report.errors.error_count, stats.error_count);
    assert_eq!(report.errors.total_requests, 12_500);
    assert_eq!(stats.average_response_time, 49.5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn higher_filter_threshold_narrows_error_branch() {
    // Arrange
    let csv = CsvFile::with_rows(&[
        "t,a,GET,/,404,1",
        "t,a,GET,/,500,1",
        "t,b,GET,/,503,1",
        "t,b,GET,/,200,1",
    ]);
    let overrides = ConfigOverrides {
        error_threshold: Some(500),
        ..Default::default()
    };
    let config = load_config(None, &overrides).unwrap();

    // Act
    let report = run_pipeline(csv.path(), &config.pipeline, CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(report.statistics.error_count, 3);
    assert_eq!(report.errors.total_requests, 2);
    assert_eq!(report.errors.error_count, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cancellation_during_run_stops_within_bounded_time() {
    // Arrange
    let csv = CsvFile::generated(300_000, 50);
    let config = load_config(None, &ConfigOverrides::default()).unwrap();
    let token = CancellationToken::new();

    let run = {
        let token = token.clone();
        let path = csv.path().to_path_buf();
        let pipeline = config.pipeline.clone();
        tokio::spawn(async move { run_pipeline(path, &pipeline, token).await })
    };

    // Act
    tokio::time::sleep(Duration::from_millis(5)).await;
    token.cancel();
    let report = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .expect("pipeline did not stop after cancellation")
        .unwrap()
        .unwrap();

    // Assert
    assert!((report.statistics.total_requests as usize) < csv.rows);
    assert_eq!(report.source.stop, StopReason::Cancelled);
}
