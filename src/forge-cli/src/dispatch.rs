//! Command dispatch.
//!
//! Decides, from the normalized arguments, whether forge runs a built-in
//! command or delegates to a plugin:
//!
//! 1. A selector that names a built-in always runs in-process.
//! 2. Otherwise, if a `forge-<selector>` executable resolves, the invocation
//!    is delegated to it with the remaining arguments.
//! 3. Otherwise the arguments go through the built-in path anyway, so clap
//!    reports the unknown command as a usage error.
//!
//! On the in-process path the command's preprocess hook runs before parsing.
//! Hooks leave the arguments alone when help is requested for the command.

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::context::ProcessContext;
use crate::error::StructuredError;
use crate::external::{ExternalCommand, ExternalCommandResolver, PathResolver};
use crate::normalize::NormalizedArgs;
use crate::registry::CommandRegistry;

/// Where an invocation goes.
#[derive(Debug)]
pub enum Dispatch {
    Builtin(Box<Commands>),
    External(ExternalCommand),
}

pub struct Dispatcher {
    registry: CommandRegistry,
    resolver: Box<dyn ExternalCommandResolver>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, resolver: Box<dyn ExternalCommandResolver>) -> Self {
        Self { registry, resolver }
    }

    /// Built-in commands plus plugins on the process `PATH`.
    pub fn for_context(ctx: &ProcessContext) -> Self {
        Self::new(
            CommandRegistry::builtin(),
            Box::new(PathResolver::from_env(ctx.tool_name(), ctx.cwd())),
        )
    }

    pub fn dispatch(
        &self,
        args: &NormalizedArgs,
        ctx: &ProcessContext,
    ) -> anyhow::Result<Dispatch> {
        let selector = args.selector();
        let builtin = self.registry.lookup(selector);

        if builtin.is_none()
            && let Some(program) = self.resolver.resolve(selector)
        {
            let external =
                ExternalCommand::new(program, args.remaining().to_vec()).verbose(args.verbose());
            return Ok(Dispatch::External(external));
        }

        let mut argv = args.args().to_vec();
        if let Some(hook) = builtin.and_then(|c| c.preprocess) {
            hook(&mut argv, ctx)?;
        }

        let command = parse(ctx.tool_name(), argv)?;
        Ok(Dispatch::Builtin(Box::new(command)))
    }
}

/// Parse `args` (selector first) into a built-in command.
///
/// Parse failures, including help and version displays, come back as
/// [`StructuredError`]s carrying clap's exit code.
pub fn parse(tool_name: &str, args: Vec<String>) -> anyhow::Result<Commands> {
    let argv = std::iter::once(tool_name.to_string()).chain(args);
    let cli = Cli::try_parse_from(argv).map_err(StructuredError::from_clap)?;
    Ok(cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RunnableCommand;
    use crate::context::test_support::context_in;
    use crate::normalize::normalize;
    use crate::registry::CommandDescriptor;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolves every selector to `/plugins/forge-<selector>` and counts calls.
    #[derive(Clone, Default)]
    struct Counting(Arc<AtomicUsize>);

    impl ExternalCommandResolver for Counting {
        fn resolve(&self, selector: &str) -> Option<PathBuf> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Some(PathBuf::from(format!("/plugins/forge-{selector}")))
        }
    }

    struct Nothing;

    impl ExternalCommandResolver for Nothing {
        fn resolve(&self, _selector: &str) -> Option<PathBuf> {
            None
        }
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn exit_code(err: anyhow::Error) -> i32 {
        err.downcast::<StructuredError>()
            .expect("structured error")
            .exit_code()
    }

    #[test]
    fn test_builtin_never_consults_resolver() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let counter = Counting::default();
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(counter.clone()));

        let dispatch = dispatcher
            .dispatch(&normalize(strings(&["version"])), &ctx)
            .unwrap();

        let Dispatch::Builtin(command) = dispatch else {
            panic!("expected built-in dispatch");
        };
        assert_eq!(command.name(), "version");
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_selector_delegates_with_remaining_args() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Counting::default()));

        let args = normalize(strings(&["--verbose", "frobnicate", "--x", "--", "--verbose"]));
        let Dispatch::External(external) = dispatcher.dispatch(&args, &ctx).unwrap() else {
            panic!("expected external dispatch");
        };
        assert_eq!(external.program(), PathBuf::from("/plugins/forge-frobnicate"));
        assert_eq!(external.args(), strings(&["--x", "--", "--verbose"]).as_slice());
    }

    #[test]
    fn test_unknown_selector_without_plugin_is_usage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        let err = dispatcher
            .dispatch(&normalize(strings(&["frobnicate"])), &ctx)
            .unwrap_err();
        assert_eq!(exit_code(err), 2);
    }

    #[test]
    fn test_empty_invocation_is_usage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::for_context(&ctx);

        let err = dispatcher.dispatch(&normalize(Vec::new()), &ctx).unwrap_err();
        assert_eq!(exit_code(err), 2);
    }

    #[test]
    fn test_help_is_informational() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        let err = dispatcher
            .dispatch(&normalize(strings(&["--help"])), &ctx)
            .unwrap_err();
        assert_eq!(exit_code(err), 0);
    }

    #[test]
    fn test_hook_failure_stops_before_parse() {
        fn reject(_: &mut Vec<String>, _: &ProcessContext) -> anyhow::Result<()> {
            Err(StructuredError::new(9, "rejected").into())
        }

        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let registry = CommandRegistry::new(vec![CommandDescriptor::with_preprocess(
            "version", reject,
        )]);
        let dispatcher = Dispatcher::new(registry, Box::new(Nothing));

        let err = dispatcher
            .dispatch(&normalize(strings(&["version"])), &ctx)
            .unwrap_err();
        assert_eq!(exit_code(err), 9);
    }

    #[test]
    fn test_hook_is_skipped_for_help() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        // Without the skip, the missing template would fail the hook (exit 1)
        let err = dispatcher
            .dispatch(&normalize(strings(&["scaffold", "missing", "--help"])), &ctx)
            .unwrap_err();
        assert_eq!(exit_code(err), 0);
    }

    #[test]
    fn test_hook_rewrites_before_parse() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        let args = normalize(strings(&["init", "--path", "my-app"]));
        let Dispatch::Builtin(command) = dispatcher.dispatch(&args, &ctx).unwrap() else {
            panic!("expected built-in dispatch");
        };
        let Commands::Init(init) = *command else {
            panic!("expected init");
        };
        assert_eq!(init.name.as_deref(), Some("my-app"));
    }

    #[test]
    fn test_exec_forwards_help_to_task() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        std::fs::write(
            tmp.path().join(forge_common::MANIFEST_FILE_NAME),
            "[project]\nname = \"demo\"\n\n[tasks]\nlint = \"true\"\n",
        )
        .unwrap();
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        for flag in ["--help", "-h"] {
            let args = normalize(strings(&["exec", "lint", flag]));
            let Dispatch::Builtin(command) = dispatcher.dispatch(&args, &ctx).unwrap() else {
                panic!("expected built-in dispatch");
            };
            let Commands::Exec(exec) = *command else {
                panic!("expected exec");
            };
            assert_eq!(exec.task, "lint");
            assert_eq!(exec.args, strings(&[flag]));
        }
    }

    #[test]
    fn test_exec_help_before_task_is_forge_help() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context_in(tmp.path());
        let dispatcher = Dispatcher::new(CommandRegistry::builtin(), Box::new(Nothing));

        // No manifest: the hook must not run
        for args in [&["exec", "--help"][..], &["exec", "-h", "lint"][..]] {
            let err = dispatcher
                .dispatch(&normalize(strings(args)), &ctx)
                .unwrap_err();
            assert_eq!(exit_code(err), 0);
        }
    }
}
