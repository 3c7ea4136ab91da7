use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, info};

use crate::error::ZepnbError;

/// Extension of written notebooks.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Highest `(n)` suffix tried before giving up on auto-naming.
pub const MAX_NAME_SUFFIX: u32 = 999;

/// Decide where a converted notebook goes.
///
/// An explicit path is used as given, even if a file already exists there.
/// Otherwise the path is `<stem>.ipynb` inside `dir` (or the working
/// directory), and if that is taken `<stem> (1).ipynb`, `<stem> (2).ipynb`
/// and so on up to [`MAX_NAME_SUFFIX`].
///
/// # Errors
///
/// Returns [`ZepnbError::NamingExhausted`] if every candidate name exists.
pub fn resolve_output_path(
  stem: &str,
  explicit: Option<&Path>,
  dir: Option<&Path>,
) -> Result<PathBuf, ZepnbError> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }

  let in_dir = |file_name: String| {
    dir.map_or_else(|| PathBuf::from(&file_name), |d| d.join(&file_name))
  };

  let candidate = in_dir(format!("{stem}.{NOTEBOOK_EXTENSION}"));
  if !candidate.exists() {
    return Ok(candidate);
  }

  for suffix in 1..=MAX_NAME_SUFFIX {
    let candidate = in_dir(format!("{stem} ({suffix}).{NOTEBOOK_EXTENSION}"));
    if !candidate.exists() {
      debug!("Output name taken, using {}", candidate.display());
      return Ok(candidate);
    }
  }

  Err(ZepnbError::NamingExhausted {
    name:  stem.to_string(),
    bound: MAX_NAME_SUFFIX,
  })
}

/// Write serialized notebook `contents` to `path`, creating missing parent
/// directories.
///
/// # Errors
///
/// Returns [`ZepnbError::Write`] if a directory or the file cannot be
/// created.
pub fn write_notebook(path: &Path, contents: &str) -> Result<(), ZepnbError> {
  let to_error = |source: std::io::Error| {
    ZepnbError::Write {
      path: path.to_path_buf(),
      source,
    }
  };

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).map_err(to_error)?;
    info!("Created directory: {}", parent.display());
  }

  fs::write(path, contents).map_err(to_error)
}
