//! Log setup.
//!
//! The terminal belongs to the game, so logs only go to a file, and only
//! when one is requested.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (overrides `--log-level`).
pub const LOG_ENV: &str = "TERM_DUNGEON_LOG";

/// Build the filter: `TERM_DUNGEON_LOG` when set and valid, else `fallback`.
pub fn filter(fallback: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter {fallback:?}")),
    }
}

/// Install a plain-text subscriber writing to `path`. Without a path,
/// logging stays disabled.
pub fn init(path: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install the log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_fallback_filter_is_reported() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(filter("info").is_ok());
        assert!(filter("term_dungeon=debug,warn").is_ok());
        assert!(filter("term_dungeon=loud").is_err());
    }

    #[test]
    fn no_path_means_no_subscriber() {
        assert!(init(None, "term_dungeon=loud").is_ok());
    }

    #[test]
    fn file_subscriber_installs_once_and_writes_events() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dungeon.log");

        init(Some(&path), "info").unwrap();
        tracing::info!(answer = 42, "log file smoke");
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("log file smoke"));
        assert!(text.contains("answer=42"));

        // The global subscriber is already set.
        let err = init(Some(&path), "info").unwrap_err();
        assert!(err.to_string().contains("failed to install the log subscriber"));
    }
}
