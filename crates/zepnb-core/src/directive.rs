//! Interpreter directives at the head of a paragraph.
//!
//! Zeppelin selects a paragraph's interpreter with a leading `%name`
//! followed by whitespace (`%md`, `%sql`, `%spark.pyspark`, ...). Only the
//! part up to the first non-word character takes part in matching, so
//! `%spark.pyspark` is not a directive at all and the paragraph stays code.
use std::sync::LazyLock;

use regex::Regex;

/// `%word` anchored at the start and followed by at least one whitespace
/// character. `\w` and `\s` are Unicode-aware.
static DIRECTIVE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(r"^%(\w+)\s")
    .map_err(|e| {
      log::error!(
        "Failed to compile DIRECTIVE_RE regex: {e}. Directive detection is \
         disabled."
      );
    })
    .ok()
});

/// A recognised leading directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
  /// `%md`: the paragraph is markdown.
  Markdown,
  /// `%sql`: runnable as a `%%sql` cell magic.
  Sql,
  /// `%html`: runnable as a `%%html` cell magic, or literal HTML inside a
  /// table field.
  Html,
  /// Any other `%word` the target has no equivalent for.
  Unknown(String),
}

impl Directive {
  /// Detect the directive at the very start of `text`.
  ///
  /// No whitespace is skipped; callers trim first when they need to.
  #[must_use]
  pub fn detect(text: &str) -> Option<Self> {
    let captures = DIRECTIVE_RE.as_ref()?.captures(text)?;
    let word = captures.get(1)?.as_str();

    Some(match word {
      "md" => Self::Markdown,
      "sql" => Self::Sql,
      "html" => Self::Html,
      other => Self::Unknown(other.to_string()),
    })
  }
}

/// Body of a `%md` paragraph: the directive and any newlines directly after
/// it are removed, everything else is kept as written.
#[must_use]
pub fn markdown_body(text: &str) -> &str {
  text
    .strip_prefix("%md")
    .unwrap_or(text)
    .trim_start_matches('\n')
}

/// Rewrite a `%sql`/`%html` paragraph as a cell magic (`%%sql`, `%%html`).
#[must_use]
pub fn cell_magic(text: &str) -> String {
  format!("%{text}")
}
