// file: src/cli/mod.rs
// version: 2.0.0
// guid: e5f6g7h8-i9j0-1234-5678-901234efghij

//! Command line interface for dfs-chown

pub mod args;
pub mod commands;
pub mod parser;

pub use args::{ChownArgs, BIN_NAME};
pub use commands::{chown_command, run_request};
pub use parser::{parse, usage, Invocation};
