use std::process::Command;

fn match_media() -> Command {
  Command::new(env!("CARGO_BIN_EXE_match_media"))
}

#[test]
fn match_media_reports_clause_verdicts() {
  let output = match_media()
    .args([
      "not screen and (color), screen and (min-height: 48em)",
      "--type",
      "screen",
      "--value",
      "height=1000",
      "--compact",
    ])
    .output()
    .expect("run match_media");

  assert!(
    output.status.success(),
    "stderr:\n{}",
    String::from_utf8_lossy(&output.stderr)
  );
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
  assert_eq!(report["matches"], serde_json::json!(true));
  assert_eq!(report["clauses"][0]["matches"], serde_json::json!(false));
  assert_eq!(report["clauses"][1]["matches"], serde_json::json!(true));
  assert_eq!(report["clauses"][1]["query"], "screen and (min-height: 48em)");
  assert_eq!(report["values"]["height"], "1000");
}

#[test]
fn match_media_parse_only_dumps_structure() {
  let output = match_media()
    .args(["(min-width: 767px)", "--parse-only", "--compact"])
    .output()
    .expect("run match_media");

  assert!(output.status.success());
  let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
  assert_eq!(
    parsed,
    serde_json::json!([{
      "inverse": false,
      "type": "all",
      "expressions": [{
        "feature": "width",
        "range_modifier": "min",
        "raw_value": "767px"
      }]
    }])
  );
}

#[test]
fn match_media_reads_values_file() {
  let tmp = tempfile::TempDir::new().expect("tempdir");
  let path = tmp.path().join("values.json");
  std::fs::write(&path, r#"{"type": "screen", "resolution": "2dppx"}"#).expect("write values");

  let output = match_media()
    .args(["screen and (resolution: 192dpi)", "--exit-code", "--values-file"])
    .arg(&path)
    .output()
    .expect("run match_media");
  assert!(output.status.success());

  let output = match_media()
    .args(["print", "--exit-code", "--values-file"])
    .arg(&path)
    .output()
    .expect("run match_media");
  assert_eq!(output.status.code(), Some(2));
}

#[test]
fn match_media_reports_syntax_errors() {
  let output = match_media()
    .args(["screen, screen and crap"])
    .output()
    .expect("run match_media");

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("Invalid CSS media query: screen and crap"),
    "stderr:\n{stderr}"
  );
}

#[test]
fn match_media_uses_preset() {
  let output = match_media()
    .args([
      "print and (orientation: portrait)",
      "--preset",
      "print",
      "--viewport",
      "816x1056",
      "--exit-code",
    ])
    .output()
    .expect("run match_media");
  assert!(
    output.status.success(),
    "stderr:\n{}",
    String::from_utf8_lossy(&output.stderr)
  );
}
