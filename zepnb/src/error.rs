use std::{io, path::PathBuf};

use thiserror::Error;
use zepnb_config::ConfigError;
use zepnb_core::ConvertError;

/// Top-level error type for the zepnb crate.
#[derive(Debug, Error)]
pub enum ZepnbError {
  #[error("Input file not found or unreadable: {path}: {source}")]
  InputNotFound {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Cannot write {name}: versions 1-{bound} already exist")]
  NamingExhausted { name: String, bound: u32 },

  #[error("Failed to write {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Convert(#[from] ConvertError),

  #[error(transparent)]
  Config(#[from] ConfigError),
}
