//! Forge CLI library module.
//!
//! This crate is the command-dispatch and execution-control layer of the
//! `forge` binary. Given the process arguments it either runs a built-in
//! command in-process or delegates to a `forge-<name>` plugin found on
//! `PATH`, and maps every way that can end to one exit code.
//!
//! # Module Organization
//!
//! - `normalize` - strips global flags (`--verbose`) from the argument vector
//! - `registry` - the fixed, ordered table of built-in commands
//! - `external` - `forge-<name>` plugin lookup and delegation
//! - `hooks` - per-command argument preprocessing ahead of clap parsing
//! - `dispatch` - in-process vs. external decision and parsing
//! - `tracking` - optional analytics wrapper around a command run
//! - `pending` - background tasks given a grace period before exit
//! - `outcome` - exit code / log severity mapping and process termination
//! - `entry` - the full pipeline, from arguments to `exit`
//! - `cli/` - clap argument definitions
//! - Command modules - individual built-in commands (`*_cmd.rs`)

pub mod argv;
pub mod cli;
pub mod command;
pub mod context;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod external;
pub mod hooks;
pub mod logging;
pub mod normalize;
pub mod outcome;
pub mod pending;
pub mod registry;
pub mod tracking;

pub mod clean_cmd;
pub mod completion_cmd;
pub mod exec_cmd;
pub mod init_cmd;
pub mod scaffold_cmd;
pub mod script_cmd;
pub mod version_cmd;

pub use command::RunnableCommand;
pub use context::ProcessContext;
pub use dispatch::{Dispatch, Dispatcher};
pub use error::{StructuredError, exit_codes};
pub use normalize::{NormalizedArgs, VERBOSE_FLAG, normalize};
pub use outcome::{Outcome, Severity, Translation, translate};
pub use pending::{PendingTasks, WaitReport};
pub use registry::{CommandDescriptor, CommandRegistry, PreprocessHook};

/// Name of the tool; external plugins are named `forge-<selector>`.
pub const TOOL_NAME: &str = "forge";
