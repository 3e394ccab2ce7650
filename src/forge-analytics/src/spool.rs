//! On-disk spool for events that could not be delivered.
//!
//! Events are appended as JSON lines to `<analytics_dir>/pending.jsonl`.
//! [`EventSpool::take`] renames the file before reading it, so appends that
//! race with an upload land in a fresh file instead of being lost.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::event::CommandEvent;

/// File name of the spool inside the analytics directory.
pub const SPOOL_FILE: &str = "pending.jsonl";

/// Oldest events beyond this count are discarded.
pub const MAX_SPOOLED_EVENTS: usize = 500;

#[derive(Debug, Clone)]
pub struct EventSpool {
    dir: PathBuf,
}

impl EventSpool {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SPOOL_FILE)
    }

    /// Append one event.
    pub async fn append(&self, event: &CommandEvent) -> AnalyticsResult<()> {
        self.append_all(std::slice::from_ref(event)).await
    }

    /// Append several events.
    ///
    /// When the spool would grow past [`MAX_SPOOLED_EVENTS`] the file is
    /// rewritten with only the newest events.
    pub async fn append_all(&self, events: &[CommandEvent]) -> AnalyticsResult<()> {
        if events.is_empty() {
            return Ok(());
        }

        let mut lines = Vec::with_capacity(events.len());
        for event in events {
            lines.push(serde_json::to_string(event)?);
        }

        let path = self.path();
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AnalyticsError::spool(&self.dir, e))?;

        let existing = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(AnalyticsError::spool(&path, e)),
        };
        let spooled = existing.lines().filter(|l| !l.trim().is_empty()).count();

        if spooled + lines.len() <= MAX_SPOOLED_EVENTS {
            return self.append_lines(&path, &lines).await;
        }

        let mut kept: Vec<String> = existing
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .chain(lines)
            .collect();
        let dropped = kept.len() - MAX_SPOOLED_EVENTS;
        kept.drain(..dropped);
        tracing::debug!("Analytics spool full, discarding {} oldest events", dropped);
        self.rewrite(&path, &kept).await
    }

    async fn append_lines(&self, path: &Path, lines: &[String]) -> AnalyticsResult<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| AnalyticsError::spool(path, e))?;
        file.write_all(joined(lines).as_bytes())
            .await
            .map_err(|e| AnalyticsError::spool(path, e))?;
        file.flush().await.map_err(|e| AnalyticsError::spool(path, e))
    }

    async fn rewrite(&self, path: &Path, lines: &[String]) -> AnalyticsResult<()> {
        let tmp = self
            .dir
            .join(format!("{SPOOL_FILE}.{}.tmp", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, joined(lines))
            .await
            .map_err(|e| AnalyticsError::spool(&tmp, e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AnalyticsError::spool(path, e))
    }

    /// Remove and return every spooled event, newest last.
    ///
    /// Malformed lines are skipped.
    pub async fn take(&self) -> AnalyticsResult<Vec<CommandEvent>> {
        let path = self.path();
        let taken = self
            .dir
            .join(format!("{SPOOL_FILE}.{}.upload", uuid::Uuid::new_v4()));

        match tokio::fs::rename(&path, &taken).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AnalyticsError::spool(&path, e)),
        }

        let content = tokio::fs::read_to_string(&taken)
            .await
            .map_err(|e| AnalyticsError::spool(&taken, e))?;
        if let Err(e) = tokio::fs::remove_file(&taken).await {
            tracing::debug!("Failed to remove {}: {}", taken.display(), e);
        }

        Ok(parse_lines(&content))
    }

    /// Check whether anything is waiting to be uploaded.
    pub fn is_empty(&self) -> bool {
        is_empty_file(&self.path())
    }
}

fn parse_lines(content: &str) -> Vec<CommandEvent> {
    let mut events: Vec<CommandEvent> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!("Skipping malformed spooled event: {}", e);
                None
            }
        })
        .collect();

    if events.len() > MAX_SPOOLED_EVENTS {
        events.drain(..events.len() - MAX_SPOOLED_EVENTS);
    }
    events
}

fn joined(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn is_empty_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}
