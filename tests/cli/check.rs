use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, GREETING_D, GREETING_TRA, stderr, stdout};

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_files(&[("greet.d", GREETING_D), ("greet.tra", GREETING_TRA)])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 dialogue file, 1 string table - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_and_unused_text() -> Result<()> {
    let test = CliTest::with_files(&[
        ("greet.d", GREETING_D),
        ("greet.tra", "@1 = ~Well met.~\n@3 = ~Spare~\n"),
    ])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "warning: \"@2\"  missing-text\n  \
         --> ./greet.d:4\n   \
         = note: GREET:HELLO not defined in ./greet.tra\n\
         \n\
         warning: \"@3\"  unused-text\n  \
         --> ./greet.tra\n   \
         = note: (\"Spare\") never used in ./greet.d\n\
         \n\
         ✘ 2 problems (0 errors, 2 warnings)\n"
    );

    Ok(())
}

#[test]
fn test_select_rules() -> Result<()> {
    let test = CliTest::with_files(&[
        ("greet.d", GREETING_D),
        ("greet.tra", "@1 = ~Well met.~\n@3 = ~Spare~\n"),
    ])?;

    let output = test.check_command().arg("unused-text").output()?;
    let out = stdout(&output);

    assert!(out.contains("unused-text"));
    assert!(!out.contains("missing-text"));
    assert!(out.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_files(&[
        ("broken.d", "BEGIN B\nSAY @1\n"),
        ("greet.d", GREETING_D),
        ("greet.tra", GREETING_TRA),
    ])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "error: \"SAY outside state\"  parse-error\n  \
         --> ./broken.d:2\n   \
         = note: structural error, file skipped\n\
         \n\
         ✘ 1 problem (1 error, 0 warnings)\n"
    );
    assert_eq!(
        stderr(&output),
        "warning: 1 file(s) could not be parsed (use -v for details)\n"
    );

    Ok(())
}

#[test]
fn test_duplicate_string_id() -> Result<()> {
    let test = CliTest::with_files(&[("dup.tra", "@5 = ~Hi~\n@5 = ~Bye~\n")])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("duplicate string id @5 in file"));
    assert!(stdout(&output).contains("--> ./dup.tra:2"));

    Ok(())
}

#[test]
fn test_missing_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .check_command()
        .args(["--dialog-root", "nowhere"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: dialogue directory not found"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let out = stdout(&output);

    assert!(output.status.success());
    for command in ["export", "check", "init"] {
        assert!(out.contains(command), "help should list '{command}'");
    }

    Ok(())
}
