// file: tests/integration_test.rs
// version: 2.0.0
// guid: z6a7b8c9-d0e1-2345-6789-012345zabcde

//! Integration tests for dfs-chown: parse, execute and report end to end
//! against the in-memory filesystem.

use std::sync::Arc;

use dfs_chown::{
    cli::{parse, run_request, Invocation},
    client::{memory::DEFAULT_GROUP, MemoryFileSystem},
    config::Config,
    error::exit_code,
    executor::Executor,
    report::{write_report, PathOutcome},
    ChownRequest, FsError, FsErrorKind,
};

fn request(args: &[&str]) -> ChownRequest {
    match parse(args.iter().copied()) {
        Invocation::ValidRequest(request) => request,
        other => panic!("expected a valid request, got {:?}", other),
    }
}

fn cluster() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_file("/user/alice/report.csv")
        .with_dir("/user/alice/raw")
        .with_file("/user/alice/raw/part-0000")
        .with_file("/user/alice/raw/part-0001")
        .with_dir("/shared")
        .with_file("/shared/readme.md")
}

#[tokio::test]
async fn test_independent_paths_are_isolated() {
    let fs = Arc::new(cluster());
    fs.deny("/shared");

    let request = request(&["alice:staff", "/shared", "/user/alice/report.csv"]);
    let report = run_request(fs.clone(), &request, &Config::default()).await;

    assert_eq!(report.targets.len(), 2);
    assert!(!report.targets[0].is_success());
    assert!(report.targets[1].is_success());
    assert_eq!(report.exit_code(), exit_code::PATHS_FAILED);

    // The successful change stays applied
    assert_eq!(
        fs.owner_of("/user/alice/report.csv"),
        Some(("alice".to_string(), "staff".to_string()))
    );
}

#[tokio::test]
async fn test_repeated_run_is_idempotent() {
    let fs = Arc::new(cluster());
    fs.fail_set_owner("/shared/readme.md", FsError::permission_denied("read-only"));
    let request = request(&["-R", ":analysts", "/user/alice", "/shared"]);

    let first = run_request(fs.clone(), &request, &Config::default()).await;
    let second = run_request(fs.clone(), &request, &Config::default()).await;

    assert_eq!(first, second);
    assert_eq!(first.failed(), 1);
    assert_eq!(
        fs.owner_of("/user/alice/raw/part-0001"),
        Some(("hdfs".to_string(), "analysts".to_string()))
    );
}

#[tokio::test]
async fn test_recursive_report_lists_every_path() {
    let executor = Executor::new(cluster());
    let request = request(&["-R", "bob", "/user/alice"]);

    let report = executor.execute(&request).await;

    let mut out = Vec::new();
    let mut err = Vec::new();
    write_report(&report, &request.ownership, &mut out, &mut err).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        concat!(
            "ownership of '/user/alice' changed to bob\n",
            "ownership of '/user/alice/raw' changed to bob\n",
            "ownership of '/user/alice/raw/part-0000' changed to bob\n",
            "ownership of '/user/alice/raw/part-0001' changed to bob\n",
            "ownership of '/user/alice/report.csv' changed to bob\n",
        )
    );
    assert!(err.is_empty());
    assert_eq!(
        executor.client().owner_of("/user/alice/raw"),
        Some(("bob".to_string(), DEFAULT_GROUP.to_string()))
    );
}

#[tokio::test]
async fn test_duplicate_operands_processed_twice() {
    let executor = Executor::new(cluster());
    let report = executor
        .execute(&request(&["alice", "/shared", "/shared"]))
        .await;

    assert_eq!(report.targets.len(), 2);
    assert_eq!(executor.client().set_owner_calls(), vec!["/shared", "/shared"]);
}

#[tokio::test]
async fn test_timeout_surfaces_as_failure() {
    let fs = cluster();
    fs.fail_set_owner("/shared", FsError::timeout());
    let executor = Executor::new(fs);

    let report = executor.execute(&request(&["alice", "/shared"])).await;

    let failure = report.failures().next().unwrap();
    assert_eq!(failure.path, "/shared");
    match &failure.outcome {
        PathOutcome::Failure(e) => {
            assert_eq!(e.kind, FsErrorKind::Timeout);
            assert_eq!(e.to_string(), "timeout");
        }
        PathOutcome::Success => panic!("expected a timeout"),
    }
}

#[test]
fn test_help_and_errors_never_reach_the_filesystem() {
    assert!(parse(["-R", "-h", ":"]).is_help());
    assert!(matches!(parse([":", "/a"]), Invocation::ParseError(_)));
    assert!(matches!(parse(["alice:staff"]), Invocation::ParseError(_)));
}
