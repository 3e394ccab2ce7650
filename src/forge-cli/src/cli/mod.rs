//! CLI argument parsing.
//!
//! - `args` - clap argument structures for the built-in commands
//! - `styles` - ANSI styling for help output

pub mod args;
pub mod styles;

pub use args::{Cli, Commands};
pub use styles::{AFTER_HELP, get_styles};
