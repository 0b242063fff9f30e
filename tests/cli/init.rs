use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["enableKey"], "enabled");
    assert_eq!(parsed["pathAnnotationPrefix"], "@path:");
    assert_eq!(parsed["resolvePathAnnotations"], true);
    assert!(parsed["commentPrefix"].is_null());

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Created .incjsonrc.json\n");
    assert!(test.root().join(".incjsonrc.json").exists());

    let content = test.read_file(".incjsonrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".incjsonrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .incjsonrc.json already exists\n");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("app.json", r#"{"x": {"enabled": false}, "y": 1}"#)?;

    let output = test.resolve_command().args(["app.json", "--compact"]).output()?;
    assert!(
        output.status.success(),
        "Resolve should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(stdout(&output), "{\"y\":1}\n");

    Ok(())
}
