//! Rendering of Zeppelin `TABLE` results as HTML.
use std::iter;

use csv::{ReaderBuilder, StringRecord};

use crate::{directive::Directive, error::ConvertError};

/// Render a tab-separated table as an HTML `<table>`.
///
/// The first record holds the column headers; every following record is a
/// body row. Fields may be quoted to carry embedded tabs or newlines. Rows
/// are joined with `\n`, nothing else is reformatted. A blank line is a row
/// without fields and renders as `<tr></tr>`.
///
/// Header names are emitted as they are. Body fields are HTML-escaped unless
/// they start with an `%html` directive, in which case the field (directive
/// included) is trusted and copied through untouched.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedTable`] if the input has no header record
/// or a record cannot be parsed.
pub fn table_to_html(tsv: &str) -> Result<String, ConvertError> {
  let mut rows = read_rows(tsv)?.into_iter();

  let header = rows.next().ok_or_else(|| {
    ConvertError::MalformedTable("table has no header row".to_string())
  })?;

  let mut lines = vec!["<table>".to_string(), header_row(&header)];
  lines.extend(rows.map(|record| body_row(&record)));
  lines.push("</table>".to_string());

  Ok(lines.join("\n"))
}

/// Read every record, keeping blank lines as empty records.
///
/// The `csv` reader drops blank lines, so they are counted from the input at
/// the reader's position before each read.
fn read_rows(tsv: &str) -> Result<Vec<StringRecord>, ConvertError> {
  let mut reader = ReaderBuilder::new()
    .delimiter(b'\t')
    .has_headers(false)
    .flexible(true)
    .from_reader(tsv.as_bytes());

  let mut rows = Vec::new();
  let mut record = StringRecord::new();
  loop {
    let offset =
      usize::try_from(reader.position().byte()).unwrap_or(tsv.len());
    let blank = blank_lines_at(tsv, offset);
    rows.extend(iter::repeat_with(StringRecord::new).take(blank));

    if !reader.read_record(&mut record)? {
      break;
    }
    rows.push(record.clone());
  }

  Ok(rows)
}

/// Number of blank lines starting at `offset`, after finishing any record
/// terminator left over from the previous record.
fn blank_lines_at(text: &str, offset: usize) -> usize {
  let (Some(head), Some(mut rest)) = (text.get(..offset), text.get(offset..))
  else {
    return 0;
  };

  match head.chars().next_back() {
    None | Some('\n') => {},
    Some('\r') => rest = rest.strip_prefix('\n').unwrap_or(rest),
    Some(_) => rest = skip_terminator(rest).unwrap_or(rest),
  }

  let mut count = 0;
  while let Some(next) = skip_terminator(rest) {
    rest = next;
    count += 1;
  }
  count
}

fn skip_terminator(text: &str) -> Option<&str> {
  text
    .strip_prefix("\r\n")
    .or_else(|| text.strip_prefix('\n'))
    .or_else(|| text.strip_prefix('\r'))
}

fn header_row(record: &StringRecord) -> String {
  let cells: String =
    record.iter().map(|name| format!("<th>{name}</th>")).collect();
  format!("<tr>{cells}</tr>")
}

fn body_row(record: &StringRecord) -> String {
  let cells: String = record
    .iter()
    .map(|field| format!("<td>{}</td>", cell_to_html(field)))
    .collect();
  format!("<tr>{cells}</tr>")
}

fn cell_to_html(field: &str) -> std::borrow::Cow<'_, str> {
  if Directive::detect(field.trim_start()) == Some(Directive::Html) {
    field.into()
  } else {
    html_escape::encode_quoted_attribute(field)
  }
}
