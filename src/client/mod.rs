// file: src/client/mod.rs
// version: 1.0.0
// guid: 583838a5-96d6-4c7a-9a12-2c512d58ceb5

//! Remote filesystem clients

pub mod memory;
pub mod webhdfs;

pub use memory::MemoryFileSystem;
pub use webhdfs::WebHdfsClient;

use crate::error::FsError;

/// Status of a single remote path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Absolute path of the entry
    pub path: String,
    pub is_dir: bool,
    pub owner: String,
    pub group: String,
}

/// Narrow view of a distributed filesystem used by the executor
#[async_trait::async_trait]
pub trait RemoteFileSystem: Send + Sync {
    /// Change the owner and/or group of exactly `path`. `None` leaves that
    /// component untouched.
    async fn set_owner(
        &self,
        path: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), FsError>;

    /// Status of `path` itself
    async fn stat(&self, path: &str) -> Result<FileStatus, FsError>;

    /// Direct children of a directory, in a stable order
    async fn list_children(&self, path: &str) -> Result<Vec<FileStatus>, FsError>;
}

#[async_trait::async_trait]
impl<T: RemoteFileSystem + ?Sized> RemoteFileSystem for std::sync::Arc<T> {
    async fn set_owner(
        &self,
        path: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), FsError> {
        (**self).set_owner(path, user, group).await
    }

    async fn stat(&self, path: &str) -> Result<FileStatus, FsError> {
        (**self).stat(path).await
    }

    async fn list_children(&self, path: &str) -> Result<Vec<FileStatus>, FsError> {
        (**self).list_children(path).await
    }
}

/// Join a parent directory and a child name with exactly one separator
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/", "a"), "/a");
        assert_eq!(join_path("/a", "b"), "/a/b");
        assert_eq!(join_path("/a/", "b"), "/a/b");
    }
}
