#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the comparison service.

use std::cell::RefCell;
use std::error::Error as _;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use vicinity_core::test_support::{FailingDirectory, MemoryMetricsStore, seeded};
use vicinity_core::{
    ComparisonRequestError, ComparisonResult, DropReason, MetricSnapshot, MetricsStore,
    MetricsStoreError, NeighborhoodDirectory,
};
use vicinity_service::{BlockingComparisonService, ComparisonError};

type Outcome = Result<ComparisonResult, ComparisonError>;

/// Shared state for the service scenarios.
pub struct TestContext {
    directory: RefCell<Option<Arc<dyn NeighborhoodDirectory>>>,
    store: RefCell<Option<MemoryMetricsStore>>,
    outcome: RefCell<Option<Outcome>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        directory: RefCell::new(None),
        store: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

fn compare(context: &TestContext, names: &[&str]) {
    compare_in(context, "metro", names);
}

fn compare_in(context: &TestContext, region: &str, names: &[&str]) {
    let directory = context
        .directory
        .borrow()
        .clone()
        .expect("directory should be configured");
    let store: Arc<dyn MetricsStore> = Arc::new(context.store.take().unwrap_or_default());
    let service = BlockingComparisonService::new(directory, store).expect("runtime builds");
    let outcome = service.compare_neighborhoods(region, names.iter().copied(), ["walk_score"]);
    *context.outcome.borrow_mut() = Some(outcome);
}

fn with_result(context: &TestContext, check: impl FnOnce(&ComparisonResult)) {
    let borrowed = context.outcome.borrow();
    let outcome = borrowed.as_ref().expect("comparison should have run");
    let result = outcome.as_ref().expect("comparison should succeed");
    check(result);
}

fn with_error(context: &TestContext, check: impl FnOnce(&ComparisonError)) {
    let borrowed = context.outcome.borrow();
    let outcome = borrowed.as_ref().expect("comparison should have run");
    match outcome {
        Ok(result) => panic!("expected an error, got {result:?}"),
        Err(err) => check(err),
    }
}

#[given("a metro directory listing Downtown, Westside and Harbour")]
fn metro_directory(context: &TestContext) {
    let (directory, store) = seeded(
        "metro",
        [
            ("Downtown", MetricSnapshot::new().with_value("walk_score", 91.0)),
            ("Westside", MetricSnapshot::new().with_value("walk_score", 73.0)),
            ("Harbour", MetricSnapshot::new().with_value("walk_score", 66.0)),
        ],
    );
    *context.directory.borrow_mut() = Some(Arc::new(directory));
    *context.store.borrow_mut() = Some(store);
}

#[given("the metrics store fails for Harbour")]
fn harbour_fails(context: &TestContext) {
    let store = context
        .store
        .take()
        .expect("store should be configured")
        .with_failure(
            "n-3",
            MetricsStoreError::Unavailable {
                message: "shard 3 unreachable".into(),
            },
        );
    *context.store.borrow_mut() = Some(store);
}

#[given("a directory that is offline")]
fn offline_directory(context: &TestContext) {
    *context.directory.borrow_mut() = Some(Arc::new(FailingDirectory::new("dns lookup failed")));
}

#[when("I compare Downtown, Westside and Atlantis on walk score")]
fn compare_with_atlantis(context: &TestContext) {
    compare(context, &["Downtown", "Westside", "Atlantis"]);
}

#[when("I compare Downtown, Westside and Harbour on walk score")]
fn compare_with_harbour(context: &TestContext) {
    compare(context, &["Downtown", "Westside", "Harbour"]);
}

#[when("I compare Downtown, Atlantis and Lemuria on walk score")]
fn compare_mostly_unknown(context: &TestContext) {
    compare(context, &["Downtown", "Atlantis", "Lemuria"]);
}

#[when("I compare Downtown and Westside in suburbia on walk score")]
fn compare_in_unknown_region(context: &TestContext) {
    compare_in(context, "suburbia", &["Downtown", "Westside"]);
}

#[then("the comparison covers Downtown and Westside")]
fn covers_two(context: &TestContext) {
    with_result(context, |result| {
        let names: Vec<&str> = result
            .snapshots
            .iter()
            .map(|snapshot| snapshot.name.as_str())
            .collect();
        assert_eq!(names, ["Downtown", "Westside"]);
    });
}

#[then("Atlantis is reported as unresolved")]
fn atlantis_unresolved(context: &TestContext) {
    with_result(context, |result| {
        let dropped = result.dropped.first().expect("one neighborhood dropped");
        assert_eq!(dropped.name, "Atlantis");
        assert_eq!(dropped.reason, DropReason::Unresolved);
    });
}

#[then("Harbour is reported as a failed fetch")]
fn harbour_failed(context: &TestContext) {
    with_result(context, |result| {
        let dropped = result.dropped.first().expect("one neighborhood dropped");
        assert_eq!(dropped.name, "Harbour");
        assert!(
            matches!(&dropped.reason, DropReason::FetchFailed { message } if message.contains("shard 3")),
            "unexpected reason: {:?}",
            dropped.reason
        );
    });
}

#[then("Downtown is recommended")]
fn downtown_recommended(context: &TestContext) {
    with_result(context, |result| {
        let recommendation = result
            .recommendation
            .as_ref()
            .expect("a recommendation should be produced");
        assert_eq!(recommendation.neighborhood, "Downtown");
    });
}

#[then("the comparison is rejected for insufficient neighborhoods")]
fn insufficient(context: &TestContext) {
    with_error(context, |err| {
        assert_eq!(
            err,
            &ComparisonError::InvalidRequest(ComparisonRequestError::InsufficientNeighborhoods {
                found: 1
            })
        );
    });
}

#[then("the comparison is rejected because no neighborhoods resolved")]
fn none_resolved(context: &TestContext) {
    with_error(context, |err| {
        assert_eq!(
            err,
            &ComparisonError::InvalidRequest(ComparisonRequestError::InsufficientNeighborhoods {
                found: 0
            })
        );
    });
}

#[then("the comparison fails with the directory outage as its cause")]
fn directory_outage(context: &TestContext) {
    with_error(context, |err| {
        assert!(matches!(err, ComparisonError::Failed { .. }));
        let cause = err.source().expect("cause is preserved");
        assert!(cause.to_string().contains("dns lookup failed"));
    });
}

#[test]
fn scenario_indices_follow_feature_order() {
    let feature = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/features/compare_neighborhoods.feature");
    let contents = std::fs::read_to_string(&feature).unwrap_or_else(|err| {
        panic!("failed to read feature file {feature:?}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles,
        [
            "dropping a name the directory does not know",
            "dropping a neighborhood whose snapshot fetch fails",
            "rejecting a comparison when too few names resolve",
            "surfacing a directory outage as a comparison failure",
            "rejecting a comparison in a region the directory does not list",
        ],
        "scenario order changed in feature file"
    );
}

#[scenario(path = "tests/features/compare_neighborhoods.feature", index = 0)]
fn dropping_an_unknown_name(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/compare_neighborhoods.feature", index = 1)]
fn dropping_a_failed_fetch(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/compare_neighborhoods.feature", index = 2)]
fn rejecting_too_few_resolved(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/compare_neighborhoods.feature", index = 3)]
fn surfacing_a_directory_outage(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/compare_neighborhoods.feature", index = 4)]
fn rejecting_an_unknown_region(context: TestContext) {
    let _ = context;
}
