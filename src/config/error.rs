//! Errors raised on the config loading path.
//!
//! Collector failures have their own type (`content::ContentError`);
//! both funnel into `anyhow` at the `main` boundary and exit non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading, parsing, or validating `stanza.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("could not parse config file")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
