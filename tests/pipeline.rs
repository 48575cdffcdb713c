//! End-to-end pipeline tests against a mock profile host
//!
//! Each test starts a wiremock server, points the HTTP fetcher at it and runs the
//! real resolver, batch runner and report code.

mod common;

use common::{EMPTY_LISTING_PAGE, NO_LISTING_PAGE, config_for, listing_page, mount_profile};
use profile_scan::{
    BatchInput, BatchReport, BatchRunner, Event, FailureKind, ProfileOutcome, Resolver,
    ResultCell, RetryConfig,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn torvalds_scenario() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "torvalds",
        &listing_page(&[
            (Some("linux"), Some("C"), Some("Linux kernel source tree")),
            (Some("subsurface-for-dirk"), None, None),
        ]),
    )
    .await;

    let runner = BatchRunner::from_config(&config_for(&server)).unwrap();
    let rows = runner
        .run(vec![BatchInput::from_name_parts("Linus", "Torvalds", "torvalds")])
        .await;

    let repos = rows[0].outcome.repositories();
    assert_eq!(rows[0].outcome.count(), 2);
    assert_eq!(repos[0].name, "linux");
    assert_eq!(repos[0].link, format!("{}/torvalds/linux", server.uri()));
    assert_eq!(repos[0].description, "Linux kernel source tree");
    assert_eq!(repos[1].language, "Unknown");
    assert_eq!(repos[1].description, "");

    let report = BatchReport::from_rows(rows);
    assert_eq!(report.table[0].result, ResultCell::Count(2));
    assert_eq!(report.languages.len(), 1);
    assert_eq!(report.languages[0].language, "C");
    assert_eq!(report.languages[0].count, 1);
}

#[tokio::test]
async fn mixed_batch_isolates_failures_and_keeps_order() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "alice",
        &listing_page(&[
            (Some("a1"), Some("Rust"), None),
            (Some("a2"), Some("Rust"), None),
            (Some("a3"), None, None),
            (Some("a4"), Some("Go"), None),
        ]),
    )
    .await;
    mount_profile(&server, "ghost", NO_LISTING_PAGE).await;
    mount_profile(&server, "fresh", EMPTY_LISTING_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.batch.concurrency = 3;
    let runner = BatchRunner::from_config(&config).unwrap();

    let rows = runner
        .run(vec![
            BatchInput::new("A", "alice"),
            BatchInput::new("B", "none"),
            BatchInput::new("C", "broken"),
            BatchInput::new("D", "ghost"),
            BatchInput::new("E", "bad/id"),
            BatchInput::new("F", "fresh"),
        ])
        .await;

    let labels: Vec<_> = rows.iter().map(|r| r.identity_label.as_str()).collect();
    assert_eq!(labels, ["A", "B", "C", "D", "E", "F"]);

    let kinds: Vec<_> = rows.iter().map(|r| r.outcome.failure_kind()).collect();
    assert_eq!(
        kinds,
        [
            None,
            Some(FailureKind::InvalidIdentifier),
            Some(FailureKind::NetworkError),
            Some(FailureKind::NotFound),
            Some(FailureKind::InvalidIdentifier),
            None,
        ]
    );
    assert_eq!(
        rows[4].outcome,
        ProfileOutcome::failure(FailureKind::InvalidIdentifier, "Invalid identifier format")
    );

    let report = BatchReport::from_rows(rows);
    assert_eq!(report.summary.total_rows, 6);
    assert_eq!(report.summary.successful_rows, 2);
    assert_eq!(report.summary.average_repository_count, 2.0);
    assert_eq!(report.failures.len(), 4);
    assert!(report.failures[1].starts_with("Row 3 (C): Network error: 500"));

    let languages: Vec<_> = report
        .languages
        .iter()
        .map(|l| (l.language.as_str(), l.count))
        .collect();
    assert_eq!(languages, [("Rust", 2), ("Go", 1)]);
}

#[tokio::test]
async fn timeout_is_network_error_and_excluded_from_average() {
    let server = MockServer::start().await;
    mount_profile(&server, "quick", &listing_page(&[(Some("x"), Some("C"), None)])).await;
    Mock::given(method("GET"))
        .and(path("/sleepy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(EMPTY_LISTING_PAGE)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.fetch.timeout = Duration::from_millis(300);
    let runner = BatchRunner::from_config(&config).unwrap();

    let rows = runner
        .run(vec![
            BatchInput::new("Quick", "quick"),
            BatchInput::new("Sleepy", "sleepy"),
        ])
        .await;

    assert_eq!(rows[1].outcome.failure_kind(), Some(FailureKind::NetworkError));
    let message = rows[1].outcome.error_message().unwrap();
    assert!(message.starts_with("Network error: "), "{message}");

    let report = BatchReport::from_rows(rows);
    assert_eq!(report.summary.successful_rows, 1);
    assert_eq!(report.summary.average_repository_count, 1.0);
}

#[tokio::test]
async fn invalid_identifiers_make_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_LISTING_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = Resolver::from_config(&config_for(&server)).unwrap();
    for raw in ["", "None", "  none ", "a.b", "x/y", "under_score"] {
        let outcome = resolver.resolve(raw).await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::InvalidIdentifier));
    }
    // Dropping the server verifies `expect(0)`
}

#[tokio::test]
async fn transient_errors_are_retried_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_profile(&server, "flaky", &listing_page(&[(Some("r"), Some("Go"), None)])).await;

    let mut config = config_for(&server);
    config.retry = RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        backoff_multiplier: 2.0,
        jitter: false,
    };
    let resolver = Resolver::from_config(&config).unwrap();

    let outcome = resolver.resolve("flaky").await;
    assert_eq!(outcome.count(), 1);
}

#[tokio::test]
async fn not_found_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.retry.max_attempts = 3;
    config.retry.initial_delay = Duration::from_millis(10);
    let resolver = Resolver::from_config(&config).unwrap();

    let outcome = resolver.resolve("missing").await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::NetworkError));
}

#[tokio::test]
async fn progress_events_cover_every_row() {
    let server = MockServer::start().await;
    mount_profile(&server, "one", EMPTY_LISTING_PAGE).await;
    mount_profile(&server, "two", NO_LISTING_PAGE).await;

    let runner = BatchRunner::from_config(&config_for(&server)).unwrap();
    let mut events = runner.subscribe();

    runner
        .run(vec![
            BatchInput::new("1", "one"),
            BatchInput::new("2", "two"),
            BatchInput::new("3", ""),
        ])
        .await;

    let mut progress = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let Event::RowResolved { progress: p, .. } = event {
            progress.push(p);
        }
    }
    assert_eq!(progress.len(), 3);
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(progress[2], 1.0);
}
