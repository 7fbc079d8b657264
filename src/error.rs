use std::path::PathBuf;

use thiserror::Error;

/// Failures that can only happen while setting the program up.
///
/// Once a session is running nothing in the core returns an error; these
/// are all configuration problems reported before the terminal is taken over.
#[derive(Debug, Error)]
pub enum Error {
    #[error("passage must not be empty")]
    EmptyPassage,

    #[error("passage pool `{0}` has no passages")]
    EmptyPool(String),

    #[error("unknown passage set `{0}`")]
    UnknownPassageSet(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid passage file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
