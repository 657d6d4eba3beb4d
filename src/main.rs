// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! dfs-chown - Main entry point

use std::process::ExitCode;

use dfs_chown::{
    cli::{self, Invocation, BIN_NAME},
    error::exit_code,
    ChownError,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let request = match cli::parse(args) {
        Invocation::HelpRequested => {
            print!("{}", cli::usage());
            return ExitCode::from(exit_code::SUCCESS);
        }
        Invocation::ParseError(err) => {
            let err = ChownError::from(err);
            eprintln!("{}: {}", BIN_NAME, err);
            eprintln!("Try '{} --help' for more information.", BIN_NAME);
            return ExitCode::from(err.exit_code());
        }
        Invocation::ValidRequest(request) => request,
    };

    // Set up signal handling for graceful shutdown
    let shutdown_signal = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = cli::chown_command(&request) => match result {
            Ok(report) => ExitCode::from(report.exit_code()),
            Err(err) => {
                eprintln!("{}: {:#}", BIN_NAME, err);
                ExitCode::from(exit_code::SETUP_FAILED)
            }
        },
        _ = shutdown_signal => {
            warn!("Interrupted; remaining paths were not processed");
            std::process::exit(exit_code::INTERRUPTED);
        }
    }
}
