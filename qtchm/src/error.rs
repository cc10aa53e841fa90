use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse TOML config from {}: {source}", path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("Unsupported config file format: {}", .0.display())]
  Format(PathBuf),
}
