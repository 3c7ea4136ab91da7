use std::path::PathBuf;

use clap::Parser;
use zepnb_config::Config;

/// Command line interface for zepnb
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Convert an Apache Zeppelin note into a Jupyter notebook"
)]
pub struct Cli {
  /// Zeppelin note to convert (JSON)
  pub input: PathBuf,

  /// Jupyter notebook to write. When omitted, the name is derived from the
  /// note's name and never overwrites an existing file.
  pub output: Option<PathBuf>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Directory for auto-named notebooks.
  #[arg(short = 'd', long)]
  pub output_dir: Option<PathBuf>,

  /// Store cell sources and outputs as single strings instead of lists of
  /// lines.
  #[arg(long)]
  pub no_split_lines: bool,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Apply flags that shadow configuration keys. Flags win over files and
  /// `--config` overrides.
  pub fn merge_into(&self, config: &mut Config) {
    if let Some(dir) = &self.output_dir {
      config.output_dir = Some(dir.clone());
    }
    if self.no_split_lines {
      config.split_lines = false;
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_positional_arguments() {
    let cli = Cli::try_parse_from(["zepnb", "note.json"]).unwrap();
    assert_eq!(cli.input, PathBuf::from("note.json"));
    assert!(cli.output.is_none());

    let cli =
      Cli::try_parse_from(["zepnb", "note.json", "out.ipynb"]).unwrap();
    assert_eq!(cli.output, Some(PathBuf::from("out.ipynb")));
  }

  #[test]
  fn test_input_is_required() {
    assert!(Cli::try_parse_from(["zepnb"]).is_err());
  }

  #[test]
  fn test_flags_override_config() {
    let cli = Cli::try_parse_from([
      "zepnb",
      "note.json",
      "--output-dir",
      "converted",
      "--no-split-lines",
      "--config",
      "indent=2",
    ])
    .unwrap();

    let mut config = Config::default();
    config.apply_overrides(&cli.config_overrides).unwrap();
    cli.merge_into(&mut config);

    assert_eq!(config.output_dir, Some(PathBuf::from("converted")));
    assert!(!config.split_lines);
    assert_eq!(config.indent, 2);
  }
}
