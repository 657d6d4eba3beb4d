// file: src/error.rs
// version: 3.0.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use std::fmt;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, ChownError>;

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const PATHS_FAILED: u8 = 1;
    pub const PARSE_ERROR: u8 = 2;
    pub const SETUP_FAILED: u8 = 3;
    pub const INTERRUPTED: i32 = 130;
}

/// Top-level error types for dfs-chown
#[derive(Error, Debug)]
pub enum ChownError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("{failed} of {total} paths failed")]
    PathsFailed { failed: usize, total: usize },
}

impl ChownError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new logging error
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// Create a new client error
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    /// Exit code the binary reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(_) => exit_code::PARSE_ERROR,
            Self::PathsFailed { .. } => exit_code::PATHS_FAILED,
            Self::Config(_) | Self::Logging(_) | Self::Client(_) => {
                exit_code::SETUP_FAILED
            }
        }
    }
}

/// Reasons an argument vector is rejected before any filesystem contact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing ownership specifier")]
    MissingOwnership,

    #[error("missing path operand after '{0}'")]
    MissingPaths(String),

    #[error("invalid ownership specifier '{spec}': {reason}")]
    InvalidOwnership { spec: String, reason: String },

    #[error("empty path operand")]
    EmptyPath,

    #[error("{0}")]
    Usage(String),
}

/// Failure categories reported by a remote filesystem client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsErrorKind {
    PermissionDenied,
    NotFound,
    NotADirectory,
    InvalidPath,
    Communication,
    Timeout,
    Other,
}

impl FsErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FsErrorKind::PermissionDenied => "Permission denied",
            FsErrorKind::NotFound => "No such file or directory",
            FsErrorKind::NotADirectory => "Not a directory",
            FsErrorKind::InvalidPath => "Invalid path",
            FsErrorKind::Communication => "Communication failure",
            FsErrorKind::Timeout => "timeout",
            FsErrorKind::Other => "Remote error",
        }
    }
}

impl fmt::Display for FsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a [`crate::client::RemoteFileSystem`] call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct FsError {
    pub kind: FsErrorKind,
    pub detail: Option<String>,
}

impl FsError {
    pub fn new(kind: FsErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    pub fn bare(kind: FsErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn permission_denied(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::PermissionDenied, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::NotFound, detail)
    }

    pub fn not_a_directory(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::NotADirectory, detail)
    }

    pub fn invalid_path(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::InvalidPath, detail)
    }

    pub fn communication(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::Communication, detail)
    }

    pub fn timeout() -> Self {
        Self::bare(FsErrorKind::Timeout)
    }

    pub fn other(detail: impl Into<String>) -> Self {
        Self::new(FsErrorKind::Other, detail)
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) if !detail.is_empty() => write!(f, "{}: {}", self.kind, detail),
            _ => write!(f, "{}", self.kind),
        }
    }
}
