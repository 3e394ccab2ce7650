//! Version command.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const GIT_HASH: &str = match option_env!("FORGE_GIT_HASH") {
    Some(v) => v,
    None => "unknown",
};

const BUILD_DATE: &str = match option_env!("FORGE_BUILD_DATE") {
    Some(v) => v,
    None => "unknown",
};

/// Build-time version string with commit hash and build date.
pub fn long_version() -> &'static str {
    static LONG_VERSION: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    LONG_VERSION.get_or_init(|| format!("{} ({} {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Show version information.
#[derive(Debug, Parser)]
pub struct VersionCli {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    commit: &'static str,
    build_date: &'static str,
    os: &'static str,
    arch: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: VERSION,
            commit: GIT_HASH,
            build_date: BUILD_DATE,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

impl VersionCli {
    pub fn run(&self) -> Result<()> {
        let info = VersionInfo::current();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("forge {}", long_version());
            println!("{}/{}", info.os, info.arch);
        }
        Ok(())
    }
}
