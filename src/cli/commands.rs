// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::{
    client::{RemoteFileSystem, WebHdfsClient},
    config::Config,
    executor::Executor,
    logging::logger,
    report::{self, ExecutionReport},
    request::ChownRequest,
};

/// Load configuration, start logging, and run the request against the
/// configured namenode. Errors here are setup failures; path failures are
/// carried in the returned report.
pub async fn chown_command(request: &ChownRequest) -> anyhow::Result<ExecutionReport> {
    let config = Config::load().await.context("failed to load configuration")?;
    logger::init_logger(&config.logging.level).context("failed to initialize logging")?;
    for source in &config.sources {
        debug!("Loaded configuration from {}", source.display());
    }
    debug!("Final configuration: {:?}", config);

    let client = WebHdfsClient::new(&config.namenode).context("failed to create WebHDFS client")?;
    let report = run_request(Arc::new(client), request, &config).await;

    report::print_report(&report, &request.ownership).context("failed to write report")?;
    Ok(report)
}

/// Execute `request` with an already constructed client
pub async fn run_request<C: RemoteFileSystem>(
    client: C,
    request: &ChownRequest,
    config: &Config,
) -> ExecutionReport {
    let executor = Executor::new(client).with_max_concurrency(config.execution.max_concurrency);
    let report = executor.execute(request).await;

    if report.is_success() {
        info!("All {} path(s) updated", report.total());
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryFileSystem;

    #[tokio::test]
    async fn test_run_request_with_memory_client() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/a").with_file("/b"));
        let request = ChownRequest::new("alice".parse().unwrap(), false, vec!["/a".into(), "/b".into()]);

        let report = run_request(fs.clone(), &request, &Config::default()).await;

        assert!(report.is_success());
        assert_eq!(fs.owner_of("/b").unwrap().0, "alice");
    }
}
