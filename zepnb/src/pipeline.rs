use std::path::{Path, PathBuf};

use log::{debug, info};
use zepnb_config::Config;
use zepnb_core::{convert_slice, to_json_string};

use crate::{error::ZepnbError, input, output};

/// Convert the note at `input` and write the notebook.
///
/// `output` overrides the destination; otherwise it is derived from the note
/// name inside `config.output_dir`. Returns the path actually written.
///
/// # Errors
///
/// Fails if the input cannot be read or converted, if no free output name is
/// left, or if writing fails. Nothing is written on error.
pub fn run(
  input: &Path,
  output: Option<&Path>,
  config: &Config,
) -> Result<PathBuf, ZepnbError> {
  let bytes = input::read_note(input)?;
  debug!("Read {} bytes from {}", bytes.len(), input.display());

  let conversion = convert_slice(&bytes)?;
  let json = to_json_string(&conversion.notebook, &config.write_options())?;

  let path = output::resolve_output_path(
    &conversion.name,
    output,
    config.output_dir.as_deref(),
  )?;
  output::write_notebook(&path, &json)?;

  info!(
    "Wrote {} cells to {}",
    conversion.notebook.cells.len(),
    path.display()
  );

  Ok(path)
}
