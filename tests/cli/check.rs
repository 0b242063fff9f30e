use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_all_documents_resolve() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/app.json", r#"{"include": {"filename": "shared/base.json"}}"#)?;
    test.write_file("conf/shared/base.json", r#"{"name": "base"}"#)?;

    let output = test.check_command().arg("conf").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "✓ Resolved 2 files - no errors\n");

    Ok(())
}

#[test]
fn test_check_reports_failures() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/good.json", r#"{"a": 1}"#)?;
    test.write_file(
        "conf/loop.json",
        r#"{"include": {"filename": "loop.json"}}"#,
    )?;

    let output = test.check_command().arg("conf").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("✘ conf/loop.json"), "stdout: {out}");
    assert!(out.contains("cyclic include"), "stdout: {out}");
    assert!(out.ends_with("✘ 1 of 2 files failed to resolve\n"), "stdout: {out}");

    Ok(())
}

#[test]
fn test_check_verbose_lists_every_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.json", "{}")?;
    test.write_file("b.json", "[]")?;

    let output = test
        .check_command()
        .args(["a.json", "b.json", "--verbose"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "✓ a.json\n✓ b.json\n✓ Resolved 2 files - no errors\n"
    );

    Ok(())
}

#[test]
fn test_check_missing_file_is_reported() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().arg("absent.json").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("failed to read 'absent.json'"));

    Ok(())
}
