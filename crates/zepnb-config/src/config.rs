use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use zepnb_core::WriteOptions;
use zepnb_macros::Configurable;

use crate::error::ConfigError;

/// File names probed, in order, in the working directory.
const LOCAL_CONFIG_FILES: [&str; 4] =
  ["zepnb.toml", "zepnb.json", ".zepnb.toml", ".config/zepnb.toml"];

/// Configuration for a conversion run.
///
/// Loaded from a TOML or JSON file, then adjusted by `--config KEY=VALUE`
/// overrides and dedicated CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct Config {
  /// Directory that receives auto-named notebooks. Defaults to the working
  /// directory.
  #[config(key = "output_dir", allow_empty)]
  pub output_dir: Option<PathBuf>,

  /// Store multi-line strings as lists of lines, as Jupyter does.
  #[config(key = "split_lines")]
  pub split_lines: bool,

  /// Spaces per JSON indentation level.
  #[config(key = "indent")]
  pub indent: usize,
}

impl Default for Config {
  fn default() -> Self {
    let write = WriteOptions::default();
    Self {
      output_dir:  None,
      split_lines: write.split_lines,
      indent:      write.indent,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON, by extension).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if its
  /// extension is not `toml` or `json`.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match ext.as_deref() {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Build the effective configuration.
  ///
  /// Explicit `config_files` are merged in order, later files winning. With
  /// none given, a discovered config file is used if there is one, otherwise
  /// the defaults. `overrides` are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or an override is
  /// malformed.
  pub fn load(
    config_files: &[PathBuf],
    overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for path in rest {
        merged.merge(Self::from_file(path)?);
      }
      if !rest.is_empty() {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.apply_overrides(overrides)?;
    Ok(config)
  }

  /// Apply `KEY=VALUE` override strings in order.
  ///
  /// # Errors
  ///
  /// Returns an error if a string has no `=`, names an unknown key, or
  /// carries a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Merge another config into this one, with the other config's values
  /// taking precedence. `Some` options replace, plain fields always replace.
  ///
  /// A file that leaves out a plain field was loaded with that field's
  /// default, so merging it resets the field: `indent = 3` in one file
  /// followed by a file without `indent` ends at the default of 1.
  pub fn merge(&mut self, other: Self) {
    self.merge_fields(other);
  }

  /// Search the working directory, then `$XDG_CONFIG_HOME`, for a config
  /// file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let local = LOCAL_CONFIG_FILES
      .iter()
      .map(|name| current_dir.join(name))
      .find(|path| path.is_file());
    if local.is_some() {
      return local;
    }

    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME")?;
    let xdg_dir = PathBuf::from(xdg_config_home);
    ["zepnb.toml", "zepnb.json"]
      .iter()
      .map(|name| xdg_dir.join(name))
      .find(|path| path.is_file())
  }

  /// Serializer settings derived from this config.
  #[must_use]
  pub const fn write_options(&self) -> WriteOptions {
    WriteOptions {
      split_lines: self.split_lines,
      indent:      self.indent,
    }
  }
}
