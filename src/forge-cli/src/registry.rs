//! Built-in command registry.
//!
//! A fixed, ordered table of the commands forge runs in-process. The order
//! matches the help listing; dispatch only ever does exact-name lookups. A
//! descriptor may carry a preprocess hook that rewrites the argument vector
//! before clap parses it.

use crate::context::ProcessContext;
use crate::hooks;

/// Rewrites the argument vector (selector first) ahead of parsing.
pub type PreprocessHook = fn(&mut Vec<String>, &ProcessContext) -> anyhow::Result<()>;

/// Name and capabilities of one built-in command.
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub preprocess: Option<PreprocessHook>,
}

impl CommandDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            preprocess: None,
        }
    }

    pub const fn with_preprocess(name: &'static str, hook: PreprocessHook) -> Self {
        Self {
            name,
            preprocess: Some(hook),
        }
    }

    pub fn has_preprocess(&self) -> bool {
        self.preprocess.is_some()
    }
}

const BUILTIN_COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor::new("build"),
    CommandDescriptor::new("clean"),
    CommandDescriptor::new("completion"),
    CommandDescriptor::with_preprocess("exec", hooks::preprocess_exec),
    CommandDescriptor::new("generate"),
    CommandDescriptor::with_preprocess("init", hooks::preprocess_init),
    CommandDescriptor::with_preprocess("scaffold", hooks::preprocess_scaffold),
    CommandDescriptor::new("test"),
    CommandDescriptor::new("version"),
    // Generated by clap
    CommandDescriptor::new("help"),
];

/// Ordered set of command descriptors.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// The commands compiled into forge.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_COMMANDS.to_vec())
    }

    pub fn new(commands: Vec<CommandDescriptor>) -> Self {
        Self { commands }
    }

    /// Exact-name lookup.
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }
}
