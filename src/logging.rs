use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Install the global tracing subscriber, appending to the file at `path`.
///
/// `RUST_LOG` wins over `filter` when set.
pub fn init(path: &Path, filter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter).map_err(|e| Error::Logging(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Only one test may install the global subscriber.
    #[test]
    fn init_writes_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("typespeed.log");

        init(&path, "info").unwrap();
        // error level so a restrictive RUST_LOG still lets it through
        tracing::error!("hello from the test");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the test"));

        assert!(matches!(init(&path, "info"), Err(Error::Logging(_))));
    }
}
