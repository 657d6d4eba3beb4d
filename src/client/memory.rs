// file: src/client/memory.rs
// version: 1.0.0
// guid: 3d0947d1-6682-4584-b05e-d79efde78751

//! In-memory filesystem that mimics the remote client interface.
//!
//! Used by the test suites to script ownership scenarios: build a tree,
//! inject failures for specific paths, then inspect the resulting owners
//! and the order of `set_owner` calls.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use super::{join_path, FileStatus, RemoteFileSystem};
use crate::error::FsError;

pub const DEFAULT_OWNER: &str = "hdfs";
pub const DEFAULT_GROUP: &str = "supergroup";

#[derive(Debug, Clone)]
struct Node {
    is_dir: bool,
    owner: String,
    group: String,
}

impl Node {
    fn new(is_dir: bool) -> Self {
        Self {
            is_dir,
            owner: DEFAULT_OWNER.to_string(),
            group: DEFAULT_GROUP.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    set_owner_faults: HashMap<String, FsError>,
    listing_faults: HashMap<String, FsError>,
    set_owner_calls: Vec<String>,
}

/// Filesystem tree held in memory
#[derive(Debug)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    latency: Option<Duration>,
}

impl MemoryFileSystem {
    /// Create a filesystem containing only `/`
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert("/".to_string(), Node::new(true));
        Self {
            state: Mutex::new(state),
            latency: None,
        }
    }

    /// Add a directory, creating missing parents
    pub fn with_dir(self, path: &str) -> Self {
        self.insert(path, true);
        self
    }

    /// Add a file, creating missing parent directories
    pub fn with_file(self, path: &str) -> Self {
        self.insert(path, false);
        self
    }

    /// Sleep this long before answering each call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make `set_owner` on `path` fail with `error`
    pub fn fail_set_owner(&self, path: &str, error: FsError) {
        self.state
            .lock()
            .set_owner_faults
            .insert(normalize(path), error);
    }

    /// Shorthand for a permission failure on `path`
    pub fn deny(&self, path: &str) {
        self.fail_set_owner(path, FsError::permission_denied(format!("access to {} denied", path)));
    }

    /// Make `list_children` on `path` fail with `error`
    pub fn fail_listing(&self, path: &str, error: FsError) {
        self.state.lock().listing_faults.insert(normalize(path), error);
    }

    /// Current `(owner, group)` of `path`
    pub fn owner_of(&self, path: &str) -> Option<(String, String)> {
        self.state
            .lock()
            .nodes
            .get(&normalize(path))
            .map(|node| (node.owner.clone(), node.group.clone()))
    }

    /// Paths passed to `set_owner`, in call order
    pub fn set_owner_calls(&self) -> Vec<String> {
        self.state.lock().set_owner_calls.clone()
    }

    fn insert(&self, path: &str, is_dir: bool) {
        let path = normalize(path);
        let mut state = self.state.lock();

        let mut current = String::from("/");
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        for (index, component) in components.iter().enumerate() {
            current = join_path(&current, component);
            let leaf = index + 1 == components.len();
            state
                .nodes
                .entry(current.clone())
                .or_insert_with(|| Node::new(!leaf || is_dir));
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn check_absolute(path: &str) -> Result<(), FsError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(FsError::invalid_path(format!("{} is not absolute", path)))
    }
}

#[async_trait::async_trait]
impl RemoteFileSystem for MemoryFileSystem {
    async fn set_owner(
        &self,
        path: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), FsError> {
        self.simulate_latency().await;
        check_absolute(path)?;

        let key = normalize(path);
        let mut state = self.state.lock();
        state.set_owner_calls.push(path.to_string());

        if let Some(error) = state.set_owner_faults.get(&key) {
            return Err(error.clone());
        }

        let node = state
            .nodes
            .get_mut(&key)
            .ok_or_else(|| FsError::not_found(format!("{} does not exist", path)))?;
        if let Some(user) = user {
            node.owner = user.to_string();
        }
        if let Some(group) = group {
            node.group = group.to_string();
        }

        debug!("memory: {} now owned by {}:{}", key, node.owner, node.group);
        Ok(())
    }

    async fn stat(&self, path: &str) -> Result<FileStatus, FsError> {
        self.simulate_latency().await;
        check_absolute(path)?;

        let key = normalize(path);
        let state = self.state.lock();
        let node = state
            .nodes
            .get(&key)
            .ok_or_else(|| FsError::not_found(format!("{} does not exist", path)))?;

        Ok(FileStatus {
            path: key,
            is_dir: node.is_dir,
            owner: node.owner.clone(),
            group: node.group.clone(),
        })
    }

    async fn list_children(&self, path: &str) -> Result<Vec<FileStatus>, FsError> {
        self.simulate_latency().await;
        check_absolute(path)?;

        let key = normalize(path);
        let state = self.state.lock();

        if let Some(error) = state.listing_faults.get(&key) {
            return Err(error.clone());
        }

        match state.nodes.get(&key) {
            None => return Err(FsError::not_found(format!("{} does not exist", path))),
            Some(node) if !node.is_dir => {
                return Err(FsError::not_a_directory(format!("{} is a file", path)))
            }
            Some(_) => {}
        }

        let prefix = join_path(&key, "");
        let children = state
            .nodes
            .range(prefix.clone()..)
            .take_while(|(child, _)| child.starts_with(&prefix))
            .filter(|(child, _)| !child[prefix.len()..].contains('/'))
            .map(|(child, node)| FileStatus {
                path: child.clone(),
                is_dir: node.is_dir,
                owner: node.owner.clone(),
                group: node.group.clone(),
            })
            .collect();

        Ok(children)
    }
}
