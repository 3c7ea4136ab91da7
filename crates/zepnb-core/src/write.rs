//! Notebook serialization.
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{error::ConvertError, notebook::Notebook};

/// Controls how a notebook is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
  /// Store multi-line strings as lists of lines.
  pub split_lines: bool,
  /// Spaces per indentation level.
  pub indent:      usize,
}

impl Default for WriteOptions {
  fn default() -> Self {
    Self {
      split_lines: true,
      indent:      1,
    }
  }
}

/// Serialize `notebook` to pretty-printed JSON with a trailing newline.
///
/// The notebook is not modified; line splitting is applied to a copy.
/// Output is deterministic for a given notebook and options.
///
/// # Errors
///
/// Returns [`ConvertError::Json`] if serialization fails.
pub fn to_json_string(
  notebook: &Notebook,
  options: &WriteOptions,
) -> Result<String, ConvertError> {
  let mut notebook = notebook.clone();
  if options.split_lines {
    notebook.split_lines();
  } else {
    notebook.join_lines();
  }

  let indent = " ".repeat(options.indent);
  let mut buf = Vec::new();
  let mut serializer = Serializer::with_formatter(
    &mut buf,
    PrettyFormatter::with_indent(indent.as_bytes()),
  );
  notebook.serialize(&mut serializer)?;
  buf.push(b'\n');

  // serde_json only ever emits UTF-8
  String::from_utf8(buf)
    .map_err(|e| ConvertError::Json(serde::ser::Error::custom(e)))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;
  use crate::notebook::Cell;

  #[test]
  fn test_split_layout() {
    let notebook = Notebook::new(vec![Cell::markdown("a\nb")]);
    let json = to_json_string(&notebook, &WriteOptions::default()).unwrap();

    assert!(json.starts_with("{\n \"cells\": [\n  {\n   \"cell_type\""));
    assert!(json.contains("\"source\": [\n    \"a\\n\",\n    \"b\"\n   ]"));
    assert!(json.ends_with("\"nbformat_minor\": 2\n}\n"));
  }

  #[test]
  fn test_joined_layout() {
    let notebook = Notebook::new(vec![Cell::markdown("a\nb")]);
    let options = WriteOptions {
      split_lines: false,
      indent:      2,
    };
    let json = to_json_string(&notebook, &options).unwrap();

    assert!(json.contains("    \"source\": \"a\\nb\""));
  }

  #[test]
  fn test_non_ascii_is_written_verbatim() {
    let notebook = Notebook::new(vec![Cell::markdown("héllo ✓")]);
    let json = to_json_string(&notebook, &WriteOptions::default()).unwrap();
    assert!(json.contains("héllo ✓"));
  }

  #[test]
  fn test_keys_are_sorted() {
    let notebook = Notebook::new(vec![Cell::code(0, "x", true)]);
    let json = to_json_string(&notebook, &WriteOptions::default()).unwrap();

    let positions: Vec<usize> = [
      "\"cell_type\"",
      "\"execution_count\"",
      "\"autoscroll\"",
      "\"outputs\"",
      "\"source\"",
      "\"kernelspec\"",
      "\"language_info\"",
      "\"nbformat\"",
      "\"nbformat_minor\"",
    ]
    .iter()
    .map(|key| json.find(key).unwrap())
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
  }
}
