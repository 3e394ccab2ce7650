//! Global flag normalization.
//!
//! `--verbose` is accepted anywhere on the command line. It is removed from
//! the argument vector before dispatch so that neither clap nor a delegated
//! plugin ever sees it; its presence is recorded instead. Tokens after a
//! literal `--` belong to a child process and are left alone.

/// Global verbosity toggle.
pub const VERBOSE_FLAG: &str = "--verbose";

/// Argument vector with global flags removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    args: Vec<String>,
    verbose: bool,
}

impl NormalizedArgs {
    /// Normalize the process arguments, dropping the launcher element
    /// (`argv[0]`).
    pub fn from_process_args<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        normalize(raw.into_iter().skip(1))
    }

    /// All remaining arguments, selector first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The selector token, or `""` when there are no arguments.
    pub fn selector(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Arguments after the selector.
    pub fn remaining(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

/// Remove [`VERBOSE_FLAG`] from `args` and record whether it was present.
pub fn normalize<I>(args: I) -> NormalizedArgs
where
    I: IntoIterator<Item = String>,
{
    let mut verbose = false;
    let mut passthrough = false;
    let mut out = Vec::new();

    for arg in args {
        if !passthrough {
            if arg == "--" {
                passthrough = true;
            } else if arg == VERBOSE_FLAG {
                verbose = true;
                continue;
            }
        }
        out.push(arg);
    }

    NormalizedArgs { args: out, verbose }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_verbose_is_stripped_anywhere() {
        let normalized = normalize(strings(&["--verbose", "build", "--verbose", "--path", "."]));
        assert!(normalized.verbose());
        assert_eq!(normalized.args(), strings(&["build", "--path", "."]).as_slice());
    }

    #[test]
    fn test_without_flag() {
        let normalized = normalize(strings(&["generate"]));
        assert!(!normalized.verbose());
        assert_eq!(normalized.selector(), "generate");
    }

    #[test]
    fn test_flag_after_separator_is_kept() {
        let normalized = normalize(strings(&["exec", "lint", "--", "--verbose"]));
        assert!(!normalized.verbose());
        assert_eq!(
            normalized.args(),
            strings(&["exec", "lint", "--", "--verbose"]).as_slice()
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            strings(&["--verbose", "scaffold", "lib", "--verbose"]),
            strings(&["test", "--", "--verbose"]),
            strings(&[]),
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.args().to_vec());
            assert_eq!(once.args(), twice.args());
        }
    }

    #[test]
    fn test_from_process_args_drops_launcher() {
        let normalized =
            NormalizedArgs::from_process_args(strings(&["/usr/local/bin/forge", "frobnicate", "--x"]));
        assert_eq!(normalized.selector(), "frobnicate");
        assert_eq!(normalized.remaining(), strings(&["--x"]).as_slice());
    }

    #[test]
    fn test_empty_invocation_has_empty_selector() {
        let normalized = NormalizedArgs::from_process_args(strings(&["forge"]));
        assert_eq!(normalized.selector(), "");
        assert!(normalized.remaining().is_empty());
    }
}
