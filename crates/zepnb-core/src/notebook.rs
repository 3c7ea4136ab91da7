//! The Jupyter side of the conversion: an nbformat 4.2 document.
//!
//! Struct fields are declared in lexicographic order so the serialized keys
//! come out sorted, matching what Jupyter writes.
use std::collections::BTreeMap;

use serde::Serialize;

/// nbformat major version written by this crate.
pub const NBFORMAT: u32 = 4;
/// nbformat minor version written by this crate.
pub const NBFORMAT_MINOR: u32 = 2;

/// A complete notebook document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notebook {
  pub cells:          Vec<Cell>,
  pub metadata:       NotebookMetadata,
  pub nbformat:       u32,
  pub nbformat_minor: u32,
}

impl Notebook {
  /// Wrap `cells` with the fixed Spark/Scala kernel metadata.
  #[must_use]
  pub fn new(cells: Vec<Cell>) -> Self {
    Self {
      cells,
      metadata: NotebookMetadata::default(),
      nbformat: NBFORMAT,
      nbformat_minor: NBFORMAT_MINOR,
    }
  }

  /// Convert every multi-line string in the document to its list-of-lines
  /// form.
  pub fn split_lines(&mut self) {
    for cell in &mut self.cells {
      match cell {
        Cell::Markdown { source, .. } | Cell::Raw { source, .. } => {
          source.split();
        },
        Cell::Code {
          source, outputs, ..
        } => {
          source.split();
          for output in outputs {
            for payload in output.data.values_mut() {
              payload.split();
            }
          }
        },
      }
    }
  }

  /// Convert every multi-line string in the document to a single string.
  pub fn join_lines(&mut self) {
    for cell in &mut self.cells {
      match cell {
        Cell::Markdown { source, .. } | Cell::Raw { source, .. } => {
          source.join();
        },
        Cell::Code {
          source, outputs, ..
        } => {
          source.join();
          for output in outputs {
            for payload in output.data.values_mut() {
              payload.join();
            }
          }
        },
      }
    }
  }
}

/// Kernel and language descriptors. Identical for every converted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotebookMetadata {
  pub kernelspec:    KernelSpec,
  pub language_info: LanguageInfo,
}

impl Default for NotebookMetadata {
  fn default() -> Self {
    Self {
      kernelspec:    KernelSpec {
        display_name: "Spark 2.0.0 - Scala 2.11",
        language:     "scala",
        name:         "spark2-scala",
      },
      language_info: LanguageInfo {
        codemirror_mode: "text/x-scala",
        file_extension:  ".scala",
        mimetype:        "text/x-scala",
        name:            "scala",
        pygments_lexer:  "scala",
        version:         "2.11.8",
      },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelSpec {
  pub display_name: &'static str,
  pub language:     &'static str,
  pub name:         &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
  pub codemirror_mode: &'static str,
  pub file_extension:  &'static str,
  pub mimetype:        &'static str,
  pub name:            &'static str,
  pub pygments_lexer:  &'static str,
  pub version:         &'static str,
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
  Markdown {
    metadata: CellMetadata,
    source:   MultilineString,
  },
  Code {
    execution_count: usize,
    metadata:        CellMetadata,
    outputs:         Vec<Output>,
    source:          MultilineString,
  },
  Raw {
    metadata: CellMetadata,
    source:   MultilineString,
  },
}

impl Cell {
  /// A markdown cell rendering `source`.
  #[must_use]
  pub fn markdown(source: impl Into<String>) -> Self {
    Self::Markdown {
      metadata: CellMetadata::default(),
      source:   MultilineString::from(source.into()),
    }
  }

  /// A code cell without outputs.
  ///
  /// `autoscroll` sets the `"autoscroll": "auto"` display hint.
  #[must_use]
  pub fn code(
    execution_count: usize,
    source: impl Into<String>,
    autoscroll: bool,
  ) -> Self {
    Self::Code {
      execution_count,
      metadata: CellMetadata {
        autoscroll: autoscroll.then(|| "auto".to_string()),
        format:     None,
      },
      outputs: Vec::new(),
      source: MultilineString::from(source.into()),
    }
  }

  /// A raw cell holding `source` as plain text.
  #[must_use]
  pub fn raw(source: impl Into<String>) -> Self {
    Self::Raw {
      metadata: CellMetadata {
        autoscroll: None,
        format:     Some("text/plain".to_string()),
      },
      source:   MultilineString::from(source.into()),
    }
  }

  /// Value of the `cell_type` tag.
  #[must_use]
  pub const fn cell_type(&self) -> &'static str {
    match self {
      Self::Markdown { .. } => "markdown",
      Self::Code { .. } => "code",
      Self::Raw { .. } => "raw",
    }
  }

  /// Cell source as one string, whichever form it is stored in.
  #[must_use]
  pub fn source_text(&self) -> String {
    match self {
      Self::Markdown { source, .. }
      | Self::Code { source, .. }
      | Self::Raw { source, .. } => source.to_text(),
    }
  }

  /// Outputs of a code cell; empty for the other kinds.
  #[must_use]
  pub fn outputs(&self) -> &[Output] {
    match self {
      Self::Code { outputs, .. } => outputs.as_slice(),
      Self::Markdown { .. } | Self::Raw { .. } => &[],
    }
  }
}

/// Per-cell metadata. Absent keys are not written, so an empty value
/// serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellMetadata {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub autoscroll: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub format:     Option<String>,
}

/// An `execute_result` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
  /// Payload keyed by MIME type.
  pub data:            BTreeMap<String, MultilineString>,
  pub execution_count: usize,
  pub metadata:        BTreeMap<String, String>,
  pub output_type:     &'static str,
}

impl Output {
  /// An `execute_result` with a single MIME-typed payload.
  #[must_use]
  pub fn execute_result(
    execution_count: usize,
    mime: &str,
    payload: impl Into<String>,
  ) -> Self {
    let mut data = BTreeMap::new();
    data.insert(mime.to_string(), MultilineString::from(payload.into()));
    Self {
      data,
      execution_count,
      metadata: BTreeMap::new(),
      output_type: "execute_result",
    }
  }
}

/// nbformat's `multiline_string`: either one string or a list of lines that
/// concatenate to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MultilineString {
  Text(String),
  Lines(Vec<String>),
}

impl From<String> for MultilineString {
  fn from(text: String) -> Self {
    Self::Text(text)
  }
}

impl MultilineString {
  /// The full string.
  #[must_use]
  pub fn to_text(&self) -> String {
    match self {
      Self::Text(text) => text.clone(),
      Self::Lines(lines) => lines.concat(),
    }
  }

  /// Switch to the list form. Each line keeps its `\n` terminator; an empty
  /// string becomes an empty list.
  pub fn split(&mut self) {
    if let Self::Text(text) = self {
      let lines = text.split_inclusive('\n').map(str::to_owned).collect();
      *self = Self::Lines(lines);
    }
  }

  /// Switch to the single-string form.
  pub fn join(&mut self) {
    if let Self::Lines(lines) = self {
      *self = Self::Text(lines.concat());
    }
  }
}
