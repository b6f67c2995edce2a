use std::io::Write;

use assert_cmd::Command;
use tempfile::{NamedTempFile, TempDir};

fn document(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn jsonscan() -> Command {
    let mut cmd = Command::cargo_bin("jsonscan").unwrap();
    // Keep a stray `jsonscan.toml` in the working directory out of the way.
    cmd.current_dir(std::env::temp_dir());
    cmd.env_remove("JSONSCAN_STRICT")
        .env_remove("JSONSCAN_MAX_DEPTH")
        .env_remove("JSONSCAN_DECODE_ESCAPES")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn emits_compact_json() {
    let doc = document("{'a': [1, 2.5, true, null], b: \"x\\ny\"}");
    let output = jsonscan().arg(doc.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\"a\":[1,2.5,true,null],\"b\":\"x\\ny\"}\n");
}

#[test]
fn emits_keys_in_document_order() {
    let doc = document(r#"{"zeta": 1, "alpha": {"y": 2, "b": 3}}"#);
    let output = jsonscan().arg(doc.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\"zeta\":1,\"alpha\":{\"y\":2,\"b\":3}}\n");
}

#[test]
fn emits_debug_tree() {
    let doc = document("[1, 1.0]");
    let output = jsonscan()
        .arg(doc.path())
        .args(["--emit", "debug"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Array("), "{stdout}");
    assert!(stdout.contains("Integer("), "{stdout}");
    assert!(stdout.contains("Double("), "{stdout}");
    assert!(stdout.contains("1.0,"), "{stdout}");
}

#[test]
fn reports_parse_errors() {
    let doc = document("[1,2,3]x");
    let output = jsonscan().arg(doc.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid character at offset 7"), "{stderr}");
}

#[test]
fn strict_flag_rejects_bare_literals() {
    let doc = document("123");

    let lenient = jsonscan().arg(doc.path()).output().unwrap();
    assert!(lenient.status.success());
    assert_eq!(stdout_of(&lenient), "123\n");

    let strict = jsonscan().arg(doc.path()).arg("--strict").output().unwrap();
    assert!(!strict.status.success());
    let stderr = String::from_utf8(strict.stderr).unwrap();
    assert!(stderr.contains("root level must be an array or an object"), "{stderr}");
}

#[test]
fn config_file_is_honoured() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "strict = true\nmax_depth = 2\n").unwrap();

    let doc = document("[[[1]]]");
    let output = jsonscan()
        .arg(doc.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("nesting too deep"), "{stderr}");

    let output = jsonscan()
        .arg(doc.path())
        .arg("--config")
        .arg(&config)
        .args(["--max-depth", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn missing_input_is_reported_with_its_path() {
    let output = jsonscan().arg("does/not/exist.json").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read file `does/not/exist.json`"), "{stderr}");
}
