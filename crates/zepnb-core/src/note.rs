//! The Zeppelin side of the conversion.
//!
//! Only the handful of fields the converter reads are modelled; everything
//! else in a note (`config`, `settings`, per-paragraph `id`, `dateUpdated`
//! and friends) is ignored during decoding.
use serde::Deserialize;

use crate::error::ConvertError;

/// Status string Zeppelin records for a paragraph that ran successfully.
pub const SUCCESS: &str = "SUCCESS";

/// A decoded Zeppelin note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
  /// Display name of the note. May contain folder separators.
  pub name:       String,
  /// Paragraphs in document order.
  pub paragraphs: Vec<Paragraph>,
}

/// One Zeppelin paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Paragraph {
  /// Raw paragraph input, including any leading `%interpreter` directive.
  #[serde(default)]
  pub text:   Option<String>,
  /// Result of the last run, if the paragraph was ever executed.
  #[serde(default)]
  pub result: Option<ParagraphResult>,
}

/// The stored result of a paragraph run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParagraphResult {
  /// Run status, e.g. `SUCCESS` or `ERROR`.
  #[serde(default)]
  pub code: Option<String>,
  /// Payload kind.
  #[serde(default, rename = "type")]
  pub kind: Option<ResultType>,
  /// Payload: plain text, HTML or tab-separated rows depending on `kind`.
  #[serde(default)]
  pub msg:  Option<String>,
}

impl ParagraphResult {
  /// Whether the run that produced this result succeeded.
  #[must_use]
  pub fn is_success(&self) -> bool {
    self.code.as_deref() == Some(SUCCESS)
  }

  /// The payload, empty when absent.
  #[must_use]
  pub fn message(&self) -> &str {
    self.msg.as_deref().unwrap_or_default()
  }
}

/// Result payload kinds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ResultType {
  Text,
  Html,
  Table,
  /// Any kind the converter has no rendering for (`IMG`, `ANGULAR`, ...).
  Other(String),
}

impl From<String> for ResultType {
  fn from(kind: String) -> Self {
    match kind.as_str() {
      "TEXT" => Self::Text,
      "HTML" => Self::Html,
      "TABLE" => Self::Table,
      _ => Self::Other(kind),
    }
  }
}

/// Wire shape of a note before required fields are checked.
#[derive(Deserialize)]
struct RawNote {
  #[serde(default)]
  name:       Option<String>,
  #[serde(default)]
  paragraphs: Option<Vec<Paragraph>>,
}

impl Note {
  /// Decode a note from its JSON text.
  ///
  /// # Errors
  ///
  /// Returns [`ConvertError::Json`] if the text is not a JSON object of the
  /// expected shape, and [`ConvertError::MissingField`] if `name` or
  /// `paragraphs` is absent.
  pub fn from_json(json: &str) -> Result<Self, ConvertError> {
    let raw: RawNote = serde_json::from_str(json)?;
    Self::from_raw(raw)
  }

  /// Decode a note from raw file bytes.
  ///
  /// A leading UTF-8 byte-order marker is skipped. Bytes that are not valid
  /// UTF-8 are reported as a malformed document.
  ///
  /// # Errors
  ///
  /// Same as [`Note::from_json`].
  pub fn from_slice(bytes: &[u8]) -> Result<Self, ConvertError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let raw: RawNote = serde_json::from_slice(bytes)?;
    Self::from_raw(raw)
  }

  fn from_raw(raw: RawNote) -> Result<Self, ConvertError> {
    let name = raw.name.ok_or(ConvertError::MissingField("name"))?;
    let paragraphs = raw
      .paragraphs
      .ok_or(ConvertError::MissingField("paragraphs"))?;
    Ok(Self { name, paragraphs })
  }

  /// Name usable as a file stem: the note name with path separators removed.
  #[must_use]
  pub fn file_stem(&self) -> String {
    self.name.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
  }
}
