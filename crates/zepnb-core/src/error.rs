use thiserror::Error;

/// Errors that abort a conversion.
///
/// Anything not listed here (failed paragraphs, unknown result types, missing
/// results) is ordinary variation in the source note and never surfaces as an
/// error.
#[derive(Debug, Error)]
pub enum ConvertError {
  /// The input is not JSON, or not shaped like a note.
  #[error("malformed document: {0}")]
  Json(#[from] serde_json::Error),

  /// A required top-level field is absent.
  #[error("malformed document: missing required field `{0}`")]
  MissingField(&'static str),

  /// A `TABLE` result could not be read as tab-separated rows.
  #[error("malformed table: {0}")]
  MalformedTable(String),
}

impl From<csv::Error> for ConvertError {
  fn from(e: csv::Error) -> Self {
    Self::MalformedTable(e.to_string())
  }
}
