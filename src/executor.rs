// file: src/executor.rs
// version: 3.0.0
// guid: bb371682-35cb-4f34-b318-8bf69ec125bd

//! Applies a [`ChownRequest`] through a [`RemoteFileSystem`].
//!
//! Recursion is done here, not on the remote side: the root is changed first,
//! then directories are walked in pre-order (parent before children, children
//! in listing order). When the change fails on a directory its subtree is
//! skipped and its siblings are still visited. A directory whose change
//! succeeded but whose listing failed is reported as failed, since its
//! subtree was not updated.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::client::RemoteFileSystem;
use crate::logging::with_async_operation_span;
use crate::ownership::Ownership;
use crate::report::{ExecutionReport, PathReport, TargetReport};
use crate::request::ChownRequest;

/// Ownership change executor
pub struct Executor<C> {
    client: C,
    max_concurrency: usize,
}

impl<C: RemoteFileSystem> Executor<C> {
    /// Create a sequential executor
    pub fn new(client: C) -> Self {
        Self {
            client,
            max_concurrency: 1,
        }
    }

    /// Dispatch up to `max_concurrency` top-level paths at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Apply the request to every path. Never stops early: each operand gets
    /// its own [`TargetReport`], in operand order.
    pub async fn execute(&self, request: &ChownRequest) -> ExecutionReport {
        info!(
            "Changing ownership of {} path(s) to {}{}",
            request.paths.len(),
            request.ownership,
            if request.recursive { " recursively" } else { "" }
        );

        let targets = stream::iter(request.paths.iter())
            .map(|path| {
                with_async_operation_span(path, move || {
                    self.apply(path, &request.ownership, request.recursive)
                })
            })
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        let report = ExecutionReport::new(targets);
        info!(
            "Finished: {} path(s) touched, {} failed",
            report.total(),
            report.failed()
        );
        report
    }

    async fn apply(&self, target: &str, ownership: &Ownership, recursive: bool) -> TargetReport {
        let paths = if recursive {
            self.apply_recursive(target, ownership).await
        } else {
            vec![self.apply_single(target, ownership).await]
        };
        TargetReport::new(target, paths)
    }

    async fn apply_single(&self, path: &str, ownership: &Ownership) -> PathReport {
        match self
            .client
            .set_owner(path, ownership.user(), ownership.group())
            .await
        {
            Ok(()) => {
                debug!("Changed ownership of {}", path);
                PathReport::success(path)
            }
            Err(e) => {
                debug!("Failed to change ownership of {}: {}", path, e);
                PathReport::failure(path, e)
            }
        }
    }

    async fn apply_recursive(&self, target: &str, ownership: &Ownership) -> Vec<PathReport> {
        let root = match self.client.stat(target).await {
            Ok(status) => status,
            Err(e) => {
                debug!("Cannot stat {}: {}", target, e);
                return vec![PathReport::failure(target, e)];
            }
        };

        let mut reports = Vec::new();
        // The root keeps the operand spelling; descendants use listed paths
        let mut stack = vec![(target.to_string(), root.is_dir)];

        while let Some((path, is_dir)) = stack.pop() {
            let report = self.apply_single(&path, ownership).await;
            if !report.outcome.is_success() || !is_dir {
                reports.push(report);
                continue;
            }

            match self.client.list_children(&path).await {
                Ok(children) => {
                    debug!("{} has {} children", path, children.len());
                    reports.push(report);
                    stack.extend(
                        children
                            .into_iter()
                            .rev()
                            .map(|child| (child.path, child.is_dir)),
                    );
                }
                Err(e) => {
                    debug!("Cannot list {}: {}", path, e);
                    reports.push(PathReport::failure(path, e));
                }
            }
        }

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryFileSystem;
    use crate::error::{FsError, FsErrorKind};
    use crate::report::PathOutcome;

    fn request(spec: &str, recursive: bool, paths: &[&str]) -> ChownRequest {
        ChownRequest::new(
            spec.parse().unwrap(),
            recursive,
            paths.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn tree() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/data/a.txt")
            .with_dir("/data/logs")
            .with_file("/data/logs/b.log")
            .with_dir("/data/tmp")
            .with_file("/data/tmp/c.tmp")
    }

    fn touched(report: &ExecutionReport) -> Vec<&str> {
        report.paths().map(|p| p.path.as_str()).collect()
    }

    #[tokio::test]
    async fn test_non_recursive_touches_only_operand() {
        let executor = Executor::new(tree());
        let report = executor.execute(&request("alice", false, &["/data"])).await;

        assert!(report.is_success());
        assert_eq!(touched(&report), vec!["/data"]);
        assert_eq!(executor.client().set_owner_calls(), vec!["/data"]);
        assert_eq!(
            executor.client().owner_of("/data/a.txt").unwrap().0,
            "hdfs"
        );
    }

    #[tokio::test]
    async fn test_recursive_pre_order() {
        let executor = Executor::new(tree());
        let report = executor.execute(&request("alice:staff", true, &["/data"])).await;

        assert!(report.is_success());
        assert_eq!(
            touched(&report),
            vec![
                "/data",
                "/data/a.txt",
                "/data/logs",
                "/data/logs/b.log",
                "/data/tmp",
                "/data/tmp/c.tmp"
            ]
        );
        for path in touched(&report) {
            assert_eq!(
                executor.client().owner_of(path),
                Some(("alice".to_string(), "staff".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_recursive_on_file_changes_only_file() {
        let executor = Executor::new(tree());
        let report = executor.execute(&request(":staff", true, &["/data/a.txt"])).await;

        assert!(report.is_success());
        assert_eq!(touched(&report), vec!["/data/a.txt"]);
    }

    #[tokio::test]
    async fn test_failed_directory_prunes_subtree_only() {
        let fs = tree();
        fs.deny("/data/logs");
        let executor = Executor::new(fs);

        let report = executor.execute(&request("alice", true, &["/data"])).await;

        assert_eq!(
            touched(&report),
            vec!["/data", "/data/a.txt", "/data/logs", "/data/tmp", "/data/tmp/c.tmp"]
        );
        assert_eq!(report.failed(), 1);
        assert_eq!(executor.client().owner_of("/data/logs/b.log").unwrap().0, "hdfs");
        assert_eq!(executor.client().owner_of("/data/tmp/c.tmp").unwrap().0, "alice");
    }

    #[tokio::test]
    async fn test_listing_failure_marks_directory_failed() {
        let fs = tree();
        fs.fail_listing("/data/tmp", FsError::timeout());
        let executor = Executor::new(fs);

        let report = executor.execute(&request("alice", true, &["/data"])).await;

        let tmp = report.paths().find(|p| p.path == "/data/tmp").unwrap();
        assert_eq!(tmp.outcome, PathOutcome::Failure(FsError::timeout()));
        assert!(!touched(&report).contains(&"/data/tmp/c.tmp"));
        // The directory itself was still changed
        assert_eq!(executor.client().owner_of("/data/tmp").unwrap().0, "alice");
    }

    #[tokio::test]
    async fn test_missing_recursive_root() {
        let executor = Executor::new(tree());
        let report = executor.execute(&request("alice", true, &["/nope", "/data/a.txt"])).await;

        assert_eq!(report.targets.len(), 2);
        match &report.targets[0].paths[0].outcome {
            PathOutcome::Failure(e) => assert_eq!(e.kind, FsErrorKind::NotFound),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(report.targets[1].is_success());
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_keeps_operand_order() {
        let fs = tree().with_latency(std::time::Duration::from_millis(5));
        let executor = Executor::new(fs).with_max_concurrency(4);

        let paths = ["/data/tmp", "/data", "/data/a.txt", "/data/logs/b.log", "/missing"];
        let report = executor.execute(&request("alice", false, &paths)).await;

        let targets: Vec<&str> = report.targets.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(targets, paths);
        assert_eq!(report.failed(), 1);
        assert!(!report.targets[4].is_success());
    }

    #[test]
    fn test_concurrency_floor() {
        let executor = Executor::new(tree()).with_max_concurrency(0);
        assert_eq!(executor.max_concurrency, 1);
    }
}
