//! Small helpers for inspecting a raw argument vector before clap sees it.
//!
//! These only understand `--flag value`, `--flag=value` and `-f value`.
//! Anything fancier is left for clap to accept or reject.

use std::path::{Path, PathBuf};

/// Separator after which arguments are forwarded verbatim.
pub const SEPARATOR: &str = "--";

/// Value of `long` (or `short`) in `args`, last occurrence wins.
pub fn flag_value<'a>(args: &'a [String], long: &str, short: Option<&str>) -> Option<&'a str> {
    let mut found = None;
    let mut iter = args.iter().take_while(|a| *a != SEPARATOR);
    while let Some(arg) = iter.next() {
        if arg == long || short.is_some_and(|s| arg == s) {
            if let Some(value) = iter.next() {
                found = Some(value.as_str());
            }
        } else if let Some(value) = arg
            .strip_prefix(long)
            .and_then(|rest| rest.strip_prefix('='))
        {
            found = Some(value);
        }
    }
    found
}

/// Whether `flag` appears before any separator.
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().take_while(|a| *a != SEPARATOR).any(|a| a == flag)
}

/// Whether help was requested for the command in `args`.
pub fn wants_help(args: &[String]) -> bool {
    has_flag(args, "--help") || has_flag(args, "-h")
}

/// First positional argument after the selector at index 0.
///
/// `value_flags` lists options that consume the following token. Returns the
/// index and the value. Stops at the separator.
pub fn positional<'a>(args: &'a [String], value_flags: &[&str]) -> Option<(usize, &'a str)> {
    let mut index = 1;
    while index < args.len() {
        let arg = args[index].as_str();
        if arg == SEPARATOR {
            return None;
        }
        if arg.starts_with('-') && arg.len() > 1 {
            if value_flags.contains(&arg) {
                index += 1;
            }
        } else {
            return Some((index, arg));
        }
        index += 1;
    }
    None
}

/// Insert `items` before the separator, or append them when there is none.
pub fn insert_before_separator<I, S>(args: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let at = args
        .iter()
        .position(|a| a == SEPARATOR)
        .unwrap_or(args.len());
    let items: Vec<String> = items.into_iter().map(Into::into).collect();
    args.splice(at..at, items);
}

/// Project root named by `--path`/`-p`, resolved against `cwd`.
pub fn project_root(args: &[String], cwd: &Path) -> PathBuf {
    match flag_value(args, "--path", Some("-p")) {
        Some(path) => resolve_against(cwd, Path::new(path)),
        None => cwd.to_path_buf(),
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_value_forms() {
        let args = strings(&["build", "--path", "a", "-p", "b"]);
        assert_eq!(flag_value(&args, "--path", Some("-p")), Some("b"));

        let args = strings(&["build", "--path=app"]);
        assert_eq!(flag_value(&args, "--path", Some("-p")), Some("app"));

        let args = strings(&["build", "--pathological"]);
        assert_eq!(flag_value(&args, "--path", None), None);
    }

    #[test]
    fn test_flag_value_ignores_forwarded_args() {
        let args = strings(&["test", "--", "--path", "elsewhere"]);
        assert_eq!(flag_value(&args, "--path", None), None);
        assert!(!wants_help(&strings(&["exec", "lint", "--", "--help"])));
    }

    #[test]
    fn test_positional_skips_flag_values() {
        let args = strings(&["scaffold", "--path", "out", "-a", "k=v", "--force", "library"]);
        assert_eq!(
            positional(&args, &["--path", "-a"]),
            Some((6, "library"))
        );
        assert_eq!(positional(&strings(&["scaffold"]), &[]), None);
        assert_eq!(positional(&strings(&["scaffold", "--", "x"]), &[]), None);
    }

    #[test]
    fn test_insert_before_separator() {
        let mut args = strings(&["scaffold", "lib", "--", "extra"]);
        insert_before_separator(&mut args, ["--template-path", "/t/lib"]);
        assert_eq!(
            args,
            strings(&["scaffold", "lib", "--template-path", "/t/lib", "--", "extra"])
        );

        let mut args = strings(&["init"]);
        insert_before_separator(&mut args, ["--name", "app"]);
        assert_eq!(args, strings(&["init", "--name", "app"]));
    }

    #[test]
    fn test_project_root() {
        let cwd = Path::new("/work");
        assert_eq!(project_root(&strings(&["build"]), cwd), PathBuf::from("/work"));
        assert_eq!(
            project_root(&strings(&["build", "-p", "app"]), cwd),
            PathBuf::from("/work/app")
        );
        assert_eq!(
            project_root(&strings(&["build", "--path", "/abs"]), cwd),
            PathBuf::from("/abs")
        );
    }
}
