//! CLI styling and formatting.
//!
//! Defines ANSI colors and formatting for the CLI help output.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Forge CLI styled help theme.
pub fn get_styles() -> Styles {
    Styles::styled()
        // Headers (USAGE, COMMANDS, OPTIONS) - Bold yellow
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        // Usage line - Green
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        // Literals (command names, flag names) - Bold green
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        // Placeholders (<VALUE>, [ARGS]) - Cyan
        .placeholder(AnsiColor::Cyan.on_default())
        // Errors - Bold red
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with plugins and environment variables.
pub const AFTER_HELP: &str = color_print::cstr!(
    r#"<yellow,bold>PLUGINS</>
    Any executable named <green,bold>forge-<<name>></> on your PATH runs as <green,bold>forge <<name>></>.
    Built-in commands always take precedence over plugins.

<yellow,bold>ENVIRONMENT VARIABLES</>
    <cyan>FORGE_HOME</>                Override the state directory (default: ~/.forge)
    <cyan>FORGE_LOG_LEVEL</>           Log verbosity (error, warn, info, debug, trace)
    <cyan>FORGE_STATS_OPT_OUT</>       Disable anonymous usage analytics
    <cyan>FORGE_ANALYTICS_ENDPOINT</>  Override the analytics collector URL"#
);
