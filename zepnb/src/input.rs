use std::{fs, path::Path};

use crate::error::ZepnbError;

/// Read a note file as raw bytes.
///
/// Decoding (including byte-order-marker handling) is left to
/// [`zepnb_core::Note::from_slice`].
///
/// # Errors
///
/// Returns [`ZepnbError::InputNotFound`] if the file does not exist or cannot
/// be read.
pub fn read_note(path: &Path) -> Result<Vec<u8>, ZepnbError> {
  fs::read(path).map_err(|source| {
    ZepnbError::InputNotFound {
      path: path.to_path_buf(),
      source,
    }
  })
}
