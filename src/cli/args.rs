// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use clap::{ArgAction, Parser};

pub const BIN_NAME: &str = "dfs-chown";

#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(about = "Change the owner and/or group of each PATH on a distributed filesystem")]
#[command(override_usage = "dfs-chown [-h] [-R] OWNER[:GROUP] PATH [PATH ...]")]
#[command(after_help = "OWNER is USER, :GROUP, USER:GROUP or USER: (group left unchanged).\n\
Paths are absolute paths on the namenode configured in ~/.config/dfs-chown/config.toml,\n\
./.dfs-chown.toml or DFS_CHOWN_NAMENODE.")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct ChownArgs {
    /// Display this help and exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Operate on files and directories recursively
    #[arg(short = 'R', action = ArgAction::SetTrue)]
    pub recursive: bool,

    /// New owner and/or group
    #[arg(value_name = "OWNER[:GROUP]")]
    pub owner: Option<String>,

    /// Paths whose ownership is changed
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}
