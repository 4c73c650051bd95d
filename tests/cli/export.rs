use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, GREETING_D, GREETING_TRA, stderr, stdout};

const HEADER_EN: &str =
    "npc_name,dialogue_id,state,npc_strref,npc_text_en,pc_strref,pc_text_en,goto,comment\n";

#[test]
fn test_export_dialog_and_string_sheets() -> Result<()> {
    let test = CliTest::with_files(&[
        ("greet.d", GREETING_D),
        ("greet.tra", "@1 = ~Well met, traveller.~\n@2 = ~Farewell.~\n@9 = ~Unused line~\n"),
        ("Items.tra", "@20 = ~Sword~\n@3 = ~Shield~\n"),
    ])?;

    assert_cmd_snapshot!(test.export_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 1 dialogue sheet and 1 string sheet to ./csv

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("csv/dialogs/greet.csv")?,
        format!(
            "{HEADER_EN}\
             GREET,GREET,HELLO,@1,\"Well met, traveller.\",,,,first meeting\n\
             ,GREET,HELLO,,,@2,Farewell.,EXIT,\n\
             ,greet,,@9,Unused line,,,,UNUSED IN .D\n"
        )
    );
    assert_eq!(
        test.read_file("csv/strings/items.csv")?,
        format!(
            "{HEADER_EN}\
             ,items,,@3,Shield,,,,TRA_ONLY\n\
             ,items,,@20,Sword,,,,TRA_ONLY\n"
        )
    );

    Ok(())
}

#[test]
fn test_export_chain_with_interjection() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "AC#Chain.d",
            "CHAIN IF ~Global(\"AC#X\",\"GLOBAL\",1)~ THEN AC#CHN START\n\
             @1\n\
             == AC#OTHER IF ~InParty(\"AC#OTHER\")~ THEN @2\n\
             = @3\n\
             EXIT\n",
        ),
        ("ac#chain.tra", "@1 = ~One~\n@2 = ~Two~\n@3 = ~Three~\n"),
    ])?;

    let output = test.export_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("csv/dialogs/ac_chain.csv")?,
        format!(
            "{HEADER_EN}\
             AC#CHN,AC#CHN,START,@1,One,,,,\n\
             AC#OTHER,AC#CHN,START,@2,Two,,,,\"InParty(\"\"AC#OTHER\"\")\"\n\
             AC#OTHER,AC#CHN,START,@3,Three,,,EXIT,\"InParty(\"\"AC#OTHER\"\")\"\n"
        )
    );

    Ok(())
}

#[test]
fn test_export_uses_config_and_locale() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".dlgsheetrc.json",
            r#"{
                "dialogRoot": "dlg",
                "stringsRoot": "tra",
                "language": "polish",
                "outputDir": "sheets"
            }"#,
        ),
        ("dlg/greet.d", GREETING_D),
        ("tra/polish/greet.tra", GREETING_TRA),
    ])?;

    let output = test.export_command().args(["--locale", "pl"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let sheet = test.read_file("sheets/dialogs/greet.csv")?;
    assert!(sheet.starts_with(
        "npc_name,dialogue_id,state,npc_strref,npc_text_pl,pc_strref,pc_text_pl,goto,comment\n"
    ));

    Ok(())
}

#[test]
fn test_export_out_dir_flag() -> Result<()> {
    let test = CliTest::with_files(&[("greet.d", GREETING_D), ("greet.tra", GREETING_TRA)])?;

    let output = test.export_command().args(["--out-dir", "out"]).output()?;

    assert!(output.status.success());
    assert!(test.root().join("out/dialogs/greet.csv").exists());
    assert!(!test.root().join("csv").exists());

    Ok(())
}

#[test]
fn test_parse_failure_writes_nothing() -> Result<()> {
    let test = CliTest::with_files(&[
        ("broken.d", "IF ~~ THEN BEGIN S\nSAY @1\nEND\n"),
        ("greet.d", GREETING_D),
        ("greet.tra", GREETING_TRA),
    ])?;

    let output = test.export_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "error: \"state defined before BEGIN\"  parse-error\n  \
         --> ./broken.d:1\n   \
         = note: structural error, file skipped\n\
         \n\
         ✘ 1 problem (1 error, 0 warnings)\n\
         ✘ Nothing written (use --keep-going to export the files that parsed)\n"
    );
    assert!(!test.root().join("csv").exists());

    Ok(())
}

#[test]
fn test_keep_going_exports_the_rest() -> Result<()> {
    let test = CliTest::with_files(&[
        ("broken.tra", "@1 = ~never closed\n"),
        ("greet.d", GREETING_D),
        ("greet.tra", GREETING_TRA),
    ])?;

    let output = test.export_command().arg("--keep-going").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("unterminated string literal for @1"));
    assert!(stdout(&output).contains("1 file(s) left out because they failed to parse"));
    assert!(test.root().join("csv/dialogs/greet.csv").exists());
    assert!(!test.root().join("csv/strings/broken.csv").exists());

    Ok(())
}

#[test]
fn test_invalid_locale_is_an_error() -> Result<()> {
    let test = CliTest::with_files(&[("greet.d", GREETING_D)])?;

    let output = test.export_command().args(["--locale", "en us"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid 'locale'"));

    Ok(())
}

#[test]
fn test_script_without_table_uses_placeholders() -> Result<()> {
    let test = CliTest::with_files(&[("greet.d", GREETING_D)])?;

    let output = test.export_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let sheet = test.read_file("csv/dialogs/greet.csv")?;
    assert!(sheet.contains(",@1,#MISSING(@1),"));
    assert!(sheet.contains(",@2,#MISSING(@2),EXIT,"));

    Ok(())
}
