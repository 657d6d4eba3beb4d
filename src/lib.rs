// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # dfs-chown
//!
//! Changes the owning user and/or group of paths on a distributed filesystem,
//! optionally recursively, the way `chown` does locally. The mutation itself
//! goes through a [`client::RemoteFileSystem`]; the binary uses the WebHDFS
//! REST client and tests use the in-memory one.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod ownership;
pub mod report;
pub mod request;

pub use error::{ChownError, FsError, FsErrorKind, ParseError, Result};
pub use ownership::Ownership;
pub use request::ChownRequest;

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
