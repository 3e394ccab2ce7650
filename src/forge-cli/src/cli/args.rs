//! CLI argument structures and parsing.
//!
//! Defines the built-in command surface using clap. The order of the
//! [`Commands`] variants is the order of the command registry.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::styles::{AFTER_HELP, get_styles};
use crate::clean_cmd::CleanCli;
use crate::command::RunnableCommand;
use crate::completion_cmd::CompletionCli;
use crate::context::ProcessContext;
use crate::exec_cmd::ExecCli;
use crate::init_cmd::InitCli;
use crate::scaffold_cmd::ScaffoldCli;
use crate::script_cmd::{ScriptCli, ScriptKind};
use crate::version_cmd::{VersionCli, long_version};

/// Forge - project scaffolding and task runner
///
/// Commands not listed here are looked up as `forge-<name>` plugins.
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(version, long_version = long_version())]
#[command(about = "Forge - project scaffolding and task runner", long_about = None)]
#[command(
    styles = get_styles(),
    subcommand_required = true,
    arg_required_else_help = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    // Listed for help output only. The flag is stripped before parsing and
    // read from `NormalizedArgs::verbose`.
    /// Enable verbose output; also passed on to plugins
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the project's build script
    Build(ScriptCli),

    /// Remove cached state
    Clean(CleanCli),

    /// Generate shell completion scripts
    Completion(CompletionCli),

    /// Run a task defined in Forge.toml
    Exec(ExecCli),

    /// Run the project's code generation script
    Generate(ScriptCli),

    /// Create a new forge project
    Init(InitCli),

    /// Create files from a template
    Scaffold(ScaffoldCli),

    /// Run the project's test script
    Test(ScriptCli),

    /// Show version information
    Version(VersionCli),
}

#[async_trait]
impl RunnableCommand for Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Build(_) => "build",
            Commands::Clean(_) => "clean",
            Commands::Completion(_) => "completion",
            Commands::Exec(_) => "exec",
            Commands::Generate(_) => "generate",
            Commands::Init(_) => "init",
            Commands::Scaffold(_) => "scaffold",
            Commands::Test(_) => "test",
            Commands::Version(_) => "version",
        }
    }

    async fn run(&self, ctx: &ProcessContext) -> anyhow::Result<()> {
        match self {
            Commands::Build(cli) => cli.run(ScriptKind::Build, ctx).await,
            Commands::Clean(cli) => cli.run(ctx).await,
            Commands::Completion(cli) => cli.run(),
            Commands::Exec(cli) => cli.run(ctx).await,
            Commands::Generate(cli) => cli.run(ScriptKind::Generate, ctx).await,
            Commands::Init(cli) => cli.run(ctx).await,
            Commands::Scaffold(cli) => cli.run(ctx).await,
            Commands::Test(cli) => cli.run(ScriptKind::Test, ctx).await,
            Commands::Version(cli) => cli.run(),
        }
    }
}
