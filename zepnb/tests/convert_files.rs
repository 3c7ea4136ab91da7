#![allow(clippy::expect_used, reason = "Expect is acceptable in tests")]

use std::{fs, path::Path};

use serde_json::{Value, json};
use tempfile::tempdir;
use zepnb::{ZepnbError, run};
use zepnb_config::Config;
use zepnb_core::ConvertError;

fn write_note(dir: &Path, file: &str, note: &Value) -> std::path::PathBuf {
  let path = dir.join(file);
  fs::write(&path, note.to_string()).expect("write note");
  path
}

fn config_for(dir: &Path) -> Config {
  Config {
    output_dir: Some(dir.to_path_buf()),
    ..Config::default()
  }
}

fn read_json(path: &Path) -> Value {
  serde_json::from_str(&fs::read_to_string(path).expect("read notebook"))
    .expect("notebook is JSON")
}

#[test]
fn test_auto_named_output() {
  let dir = tempdir().expect("tempdir");
  let input = write_note(
    dir.path(),
    "note.json",
    &json!({"name": "etl/daily", "paragraphs": [{"text": "%md\nhi"}]}),
  );
  let out_dir = dir.path().join("out");

  let written = run(&input, None, &config_for(&out_dir)).expect("convert");
  assert_eq!(written, out_dir.join("etldaily.ipynb"));

  let notebook = read_json(&written);
  assert_eq!(notebook["cells"][0]["cell_type"], "markdown");
  assert_eq!(notebook["cells"][0]["source"], json!(["hi"]));
}

#[test]
fn test_second_run_does_not_overwrite() {
  let dir = tempdir().expect("tempdir");
  let input = write_note(
    dir.path(),
    "note.json",
    &json!({"name": "notebook", "paragraphs": [{"text": "1 + 1"}]}),
  );
  let config = config_for(dir.path());

  let first = run(&input, None, &config).expect("first run");
  let second = run(&input, None, &config).expect("second run");
  let third = run(&input, None, &config).expect("third run");

  assert_eq!(first, dir.path().join("notebook.ipynb"));
  assert_eq!(second, dir.path().join("notebook (1).ipynb"));
  assert_eq!(third, dir.path().join("notebook (2).ipynb"));

  // same input, same bytes
  assert_eq!(
    fs::read(&first).expect("read first"),
    fs::read(&second).expect("read second")
  );
}

#[test]
fn test_explicit_output_path() {
  let dir = tempdir().expect("tempdir");
  let input = write_note(
    dir.path(),
    "note.json",
    &json!({"name": "ignored", "paragraphs": [{"text": "%sql select 1"}]}),
  );
  let target = dir.path().join("custom.ipynb");
  fs::write(&target, "old").expect("seed target");

  let written =
    run(&input, Some(target.as_path()), &Config::default()).expect("convert");
  assert_eq!(written, target);
  assert_eq!(read_json(&target)["cells"][0]["source"], json!([
    "%%sql select 1"
  ]));
  assert!(!dir.path().join("ignored.ipynb").exists());
}

#[test]
fn test_byte_order_marker_input() {
  let dir = tempdir().expect("tempdir");
  let input = dir.path().join("bom.json");
  let mut bytes = "\u{feff}".as_bytes().to_vec();
  bytes.extend_from_slice(
    json!({"name": "bom", "paragraphs": [{"text": "x"}]})
      .to_string()
      .as_bytes(),
  );
  fs::write(&input, bytes).expect("write note");

  let written = run(&input, None, &config_for(dir.path())).expect("convert");
  assert_eq!(written, dir.path().join("bom.ipynb"));
}

#[test]
fn test_joined_layout_from_config() {
  let dir = tempdir().expect("tempdir");
  let input = write_note(
    dir.path(),
    "note.json",
    &json!({"name": "joined", "paragraphs": [{"text": "a\nb"}]}),
  );
  let config = Config {
    split_lines: false,
    ..config_for(dir.path())
  };

  let written = run(&input, None, &config).expect("convert");
  assert_eq!(read_json(&written)["cells"][0]["source"], "a\nb");
}

#[test]
fn test_missing_input() {
  let dir = tempdir().expect("tempdir");
  let err = run(
    &dir.path().join("nope.json"),
    None,
    &config_for(dir.path()),
  )
  .expect_err("should fail");

  assert!(matches!(err, ZepnbError::InputNotFound { .. }));
}

#[test]
fn test_malformed_input_writes_nothing() {
  let dir = tempdir().expect("tempdir");
  let input = dir.path().join("broken.json");
  fs::write(&input, "{\"name\": \"broken\", \"paragraphs\": [").expect("write");
  let out_dir = dir.path().join("out");

  let err = run(&input, None, &config_for(&out_dir)).expect_err("should fail");
  assert!(matches!(err, ZepnbError::Convert(ConvertError::Json(_))));
  assert!(!out_dir.exists());
}

#[test]
fn test_missing_name_field() {
  let dir = tempdir().expect("tempdir");
  let input =
    write_note(dir.path(), "anon.json", &json!({"paragraphs": []}));

  let err =
    run(&input, None, &config_for(dir.path())).expect_err("should fail");
  assert!(matches!(
    err,
    ZepnbError::Convert(ConvertError::MissingField("name"))
  ));
}
