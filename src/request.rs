// file: src/request.rs
// version: 1.0.0
// guid: 0e5efdba-6c9e-4836-b8f3-3f45cb6ceb81

//! Validated ownership change request

use crate::ownership::Ownership;

/// A fully validated invocation, ready for the executor.
///
/// `paths` keeps argument order and duplicates; every entry is processed
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChownRequest {
    pub ownership: Ownership,
    pub recursive: bool,
    pub paths: Vec<String>,
}

impl ChownRequest {
    pub fn new(ownership: Ownership, recursive: bool, paths: Vec<String>) -> Self {
        Self {
            ownership,
            recursive,
            paths,
        }
    }
}
