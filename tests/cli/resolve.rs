use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

fn parse(output: &str) -> Result<Value> {
    Ok(serde_json::from_str(output)?)
}

#[test]
fn test_resolve_prints_merged_document() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "config.json",
        r#"{"foo": "bar", "include": {"filename": "parts/db.json"}}"#,
    )?;
    test.write_file("parts/db.json", r#"{"host": "localhost", "port": 5432}"#)?;

    let output = test.resolve_command().arg("config.json").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "{\n  \"foo\": \"bar\",\n  \"host\": \"localhost\",\n  \"port\": 5432\n}\n"
    );

    Ok(())
}

#[test]
fn test_resolve_compact() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config.json", r#"{"b": [1, 2], "a": {"enabled": false}}"#)?;

    let output = test
        .resolve_command()
        .args(["config.json", "--compact"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"b\":[1,2]}\n");

    Ok(())
}

#[test]
fn test_resolve_writes_output_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config.json", r#"{"@path:data": "data"}"#)?;

    let output = test
        .resolve_command()
        .args(["config.json", "-o", "out.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Wrote out.json"));

    let written = parse(&test.read_file("out.json")?)?;
    assert_eq!(written, json!({"data": test.path_str("data")}));

    Ok(())
}

#[test]
fn test_resolve_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".incjsonrc.json",
        r#"{"enableKey": "active", "commentPrefix": "//"}"#,
    )?;
    test.write_file(
        "config.json",
        "{\n  // comment\n  \"off\": {\"active\": false},\n  \"url\": \"http://example.com\"\n}\n",
    )?;

    let output = test.resolve_command().arg("config.json").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(parse(&stdout(&output))?, json!({"url": "http://example.com"}));

    Ok(())
}

#[test]
fn test_resolve_flags_override_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".incjsonrc.json", r#"{"pathAnnotationPrefix": "$p:"}"#)?;
    test.write_file("config.json", r#"{"@path:a": "x", "$p:b": "y"}"#)?;

    let output = test
        .resolve_command()
        .args(["config.json", "--path-prefix", "@path:"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        parse(&stdout(&output))?,
        json!({"a": test.path_str("x"), "$p:b": "y"})
    );

    Ok(())
}

#[test]
fn test_resolve_without_path_annotations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config.json", r#"{"@path:data_dir": "subdir/data"}"#)?;

    let output = test
        .resolve_command()
        .args(["config.json", "--no-path-annotations", "--compact"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"@path:data_dir\":\"subdir/data\"}\n");

    Ok(())
}

#[test]
fn test_resolve_missing_include_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config.json", r#"{"include": {"filename": "missing.json"}}"#)?;

    let output = test.resolve_command().arg("config.json").output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error: Failed to resolve config.json"), "stderr: {err}");
    assert!(err.contains("missing.json"), "stderr: {err}");

    Ok(())
}

#[test]
fn test_resolve_invalid_config_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config.json", "{}")?;

    let output = test
        .resolve_command()
        .args(["config.json", "--path-prefix", ""])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("path_annotation_prefix cannot be empty"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
