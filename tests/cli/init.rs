use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, GREETING_D, GREETING_TRA};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .dlgsheetrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".dlgsheetrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in ["dialogRoot", "stringsRoot", "outputDir", "locale", "keepGoing"] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}'");
    }

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".dlgsheetrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .dlgsheetrc.json already exists
    ");
    assert_eq!(test.read_file(".dlgsheetrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("greet.d", GREETING_D)?;
    test.write_file("greet.tra", GREETING_TRA)?;

    let output = test.export_command().output()?;
    assert!(
        output.status.success(),
        "export should work with the initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.root().join("csv/dialogs/greet.csv").exists());

    Ok(())
}
