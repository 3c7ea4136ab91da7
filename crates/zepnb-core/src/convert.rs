//! Paragraph-to-cell conversion.
use log::debug;

use crate::{
  directive::{self, Directive},
  error::ConvertError,
  note::{Note, Paragraph, ResultType},
  notebook::{Cell, Notebook, Output},
  table::table_to_html,
};

/// Result of converting one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
  /// File stem for the notebook, derived from the note name.
  pub name:     String,
  pub notebook: Notebook,
}

/// Convert a note given as raw file bytes (optionally BOM-prefixed).
///
/// # Errors
///
/// Returns an error if the bytes are not a valid note, or if a `TABLE`
/// result cannot be rendered.
pub fn convert_slice(bytes: &[u8]) -> Result<Conversion, ConvertError> {
  convert(&Note::from_slice(bytes)?)
}

/// Convert a note given as JSON text.
///
/// # Errors
///
/// Same as [`convert_slice`].
pub fn convert_str(json: &str) -> Result<Conversion, ConvertError> {
  convert_slice(json.as_bytes())
}

/// Convert a decoded note.
///
/// Paragraphs without text (absent, empty or whitespace-only) produce no
/// cell and do not use up an execution count. Every emitted cell does,
/// whatever its kind.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedTable`] if a successful `TABLE` result
/// cannot be rendered.
pub fn convert(note: &Note) -> Result<Conversion, ConvertError> {
  let mut cells = Vec::with_capacity(note.paragraphs.len());

  for paragraph in &note.paragraphs {
    let Some(text) = paragraph.text.as_deref().map(str::trim_start) else {
      continue;
    };
    if text.is_empty() {
      continue;
    }

    let index = cells.len();
    cells.push(convert_paragraph(paragraph, text, index)?);
  }

  debug!("Converted note '{}' into {} cells", note.name, cells.len());

  Ok(Conversion {
    name:     note.file_stem(),
    notebook: Notebook::new(cells),
  })
}

/// Classify one paragraph and attach its result. `text` is the paragraph
/// text with leading whitespace removed.
fn convert_paragraph(
  paragraph: &Paragraph,
  text: &str,
  index: usize,
) -> Result<Cell, ConvertError> {
  let mut cell = match Directive::detect(text) {
    Some(Directive::Markdown) => {
      return Ok(Cell::markdown(directive::markdown_body(text)));
    },
    Some(Directive::Unknown(name)) => {
      debug!("Paragraph {index}: unknown directive %{name}, kept as raw cell");
      return Ok(Cell::raw(text));
    },
    Some(Directive::Sql | Directive::Html) => {
      Cell::code(index, directive::cell_magic(text), false)
    },
    None => Cell::code(index, text, true),
  };

  if let (Cell::Code { outputs, .. }, Some(output)) =
    (&mut cell, result_output(paragraph, index)?)
  {
    outputs.push(output);
  }

  Ok(cell)
}

/// The output record for a paragraph's result, if it has one worth showing.
fn result_output(
  paragraph: &Paragraph,
  index: usize,
) -> Result<Option<Output>, ConvertError> {
  let Some(result) = &paragraph.result else {
    return Ok(None);
  };

  if !result.is_success() {
    debug!(
      "Paragraph {index}: skipping result with status {:?}",
      result.code
    );
    return Ok(None);
  }

  let output = match &result.kind {
    Some(ResultType::Text) => {
      Output::execute_result(index, "text/plain", result.message())
    },
    Some(ResultType::Html) => {
      Output::execute_result(index, "text/html", result.message())
    },
    Some(ResultType::Table) => {
      let html = table_to_html(result.message())?;
      Output::execute_result(index, "text/html", html)
    },
    Some(ResultType::Other(kind)) => {
      debug!("Paragraph {index}: no rendering for result type {kind}");
      return Ok(None);
    },
    None => return Ok(None),
  };

  Ok(Some(output))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;
  use crate::{note::ParagraphResult, notebook::MultilineString};

  fn paragraph(text: &str) -> Paragraph {
    Paragraph {
      text:   Some(text.to_string()),
      result: None,
    }
  }

  fn with_result(text: &str, code: &str, kind: &str, msg: &str) -> Paragraph {
    Paragraph {
      text:   Some(text.to_string()),
      result: Some(ParagraphResult {
        code: Some(code.to_string()),
        kind: Some(ResultType::from(kind.to_string())),
        msg:  Some(msg.to_string()),
      }),
    }
  }

  fn note(paragraphs: Vec<Paragraph>) -> Note {
    Note {
      name: "test".to_string(),
      paragraphs,
    }
  }

  #[test]
  fn test_classification() {
    let conversion = convert(&note(vec![
      paragraph("%md\nHello"),
      paragraph("%sql select 1"),
      paragraph("%foo bar"),
      paragraph("print(1)"),
      paragraph("%html <p>x</p>"),
    ]))
    .unwrap();
    let cells = &conversion.notebook.cells;

    assert_eq!(cells[0], Cell::markdown("Hello"));
    assert_eq!(cells[1], Cell::code(1, "%%sql select 1", false));
    assert_eq!(cells[2], Cell::raw("%foo bar"));
    assert_eq!(cells[3], Cell::code(3, "print(1)", true));
    assert_eq!(cells[4], Cell::code(4, "%%html <p>x</p>", false));
  }

  #[test]
  fn test_leading_whitespace_is_trimmed_before_matching() {
    let conversion =
      convert(&note(vec![paragraph("\n  %sql select 1\n")])).unwrap();
    assert_eq!(
      conversion.notebook.cells[0].source_text(),
      "%%sql select 1\n"
    );
  }

  #[test]
  fn test_empty_paragraphs_do_not_consume_indices() {
    let conversion = convert(&note(vec![
      Paragraph::default(),
      paragraph("a"),
      paragraph(""),
      paragraph("   \n\t"),
      paragraph("%md b"),
      paragraph("c"),
    ]))
    .unwrap();
    let cells = &conversion.notebook.cells;

    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0], Cell::code(0, "a", true));
    assert_eq!(cells[1].cell_type(), "markdown");
    // the markdown cell still used index 1
    assert_eq!(cells[2], Cell::code(2, "c", true));
  }

  #[test]
  fn test_text_result() {
    let conversion = convert(&note(vec![with_result(
      "1 + 1",
      "SUCCESS",
      "TEXT",
      "res0: Int = 2",
    )]))
    .unwrap();

    let outputs = conversion.notebook.cells[0].outputs();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].execution_count, 0);
    assert_eq!(
      outputs[0].data.get("text/plain"),
      Some(&MultilineString::from("res0: Int = 2".to_string()))
    );
  }

  #[test]
  fn test_table_result_is_rendered() {
    let conversion = convert(&note(vec![
      paragraph("x"),
      with_result("%sql select a, b", "SUCCESS", "TABLE", "a\tb\n1\t2"),
    ]))
    .unwrap();

    let outputs = conversion.notebook.cells[1].outputs();
    assert_eq!(outputs[0].execution_count, 1);
    assert_eq!(
      outputs[0].data.get("text/html").map(MultilineString::to_text),
      Some(table_to_html("a\tb\n1\t2").unwrap())
    );
  }

  #[test]
  fn test_failed_and_unknown_results_are_dropped() {
    let conversion = convert(&note(vec![
      with_result("a", "ERROR", "TEXT", "boom"),
      with_result("b", "SUCCESS", "IMG", "iVBOR"),
      with_result("c", "INCOMPLETE", "TABLE", ""),
    ]))
    .unwrap();

    for cell in &conversion.notebook.cells {
      assert!(cell.outputs().is_empty());
    }
  }

  #[test]
  fn test_results_on_non_code_cells_are_ignored() {
    let conversion = convert(&note(vec![
      with_result("%md *hi*", "SUCCESS", "HTML", "<p><em>hi</em></p>"),
      with_result("%sh ls", "SUCCESS", "TEXT", "a.txt"),
    ]))
    .unwrap();

    assert_eq!(conversion.notebook.cells[0], Cell::markdown(" *hi*"));
    assert_eq!(conversion.notebook.cells[1], Cell::raw("%sh ls"));
  }

  #[test]
  fn test_malformed_table_fails_conversion() {
    let err = convert(&note(vec![with_result("t", "SUCCESS", "TABLE", "")]))
      .unwrap_err();
    assert!(matches!(err, ConvertError::MalformedTable(_)));
  }
}
