//! CSV export of parsed projects.
//!
//! Each script becomes `dialogs/<key>.csv`; each string table without a
//! script becomes `strings/<key>.csv`. Keys are sanitized for the file system.

pub mod rows;
pub mod writer;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::{core::ParsedProject, utils::sanitize_filename};
use rows::{SheetRow, dialogue_rows, strings_only_rows};
use writer::write_sheet;

pub const DIALOG_SHEETS_DIR: &str = "dialogs";
pub const STRING_SHEETS_DIR: &str = "strings";

/// Sheets written by [`export_project`], in path order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub dialog_sheets: Vec<PathBuf>,
    pub string_sheets: Vec<PathBuf>,
}

impl ExportReport {
    pub fn sheet_count(&self) -> usize {
        self.dialog_sheets.len() + self.string_sheets.len()
    }
}

struct PlannedSheet {
    path: PathBuf,
    rows: Vec<SheetRow>,
}

/// Write every sheet of `parsed` under `out_dir`.
///
/// # Errors
///
/// Fails before writing anything if two keys sanitize to the same file name,
/// and on the first I/O or CSV error otherwise.
pub fn export_project(parsed: &ParsedProject, out_dir: &Path, locale: &str) -> Result<ExportReport> {
    let dialog_dir = out_dir.join(DIALOG_SHEETS_DIR);
    let strings_dir = out_dir.join(STRING_SHEETS_DIR);

    let dialog_sheets = plan(
        &dialog_dir,
        parsed.scripts.values().map(|script| {
            (
                script.key.as_str(),
                dialogue_rows(script, parsed.paired_strings(&script.key)),
            )
        }),
    )?;
    let string_sheets = plan(
        &strings_dir,
        parsed
            .unpaired_strings()
            .map(|strings| (strings.key.as_str(), strings_only_rows(strings))),
    )?;

    for (dir, sheets) in [(&dialog_dir, &dialog_sheets), (&strings_dir, &string_sheets)] {
        if !sheets.is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    dialog_sheets
        .par_iter()
        .chain(string_sheets.par_iter())
        .try_for_each(|sheet| {
            log::debug!("writing {} ({} rows)", sheet.path.display(), sheet.rows.len());
            write_sheet(&sheet.path, locale, &sheet.rows)
        })?;

    Ok(ExportReport {
        dialog_sheets: dialog_sheets.into_iter().map(|s| s.path).collect(),
        string_sheets: string_sheets.into_iter().map(|s| s.path).collect(),
    })
}

fn plan<'a>(
    dir: &Path,
    sheets: impl Iterator<Item = (&'a str, Vec<SheetRow>)>,
) -> Result<Vec<PlannedSheet>> {
    let mut planned: BTreeMap<PathBuf, (&'a str, Vec<SheetRow>)> = BTreeMap::new();
    for (key, rows) in sheets {
        let path = dir.join(format!("{}.csv", sanitize_filename(key)));
        if let Some((other, _)) = planned.get(&path) {
            bail!(
                "'{}' and '{}' would both be written to {}",
                other,
                key,
                path.display()
            );
        }
        planned.insert(path, (key, rows));
    }
    Ok(planned
        .into_iter()
        .map(|(path, (_, rows))| PlannedSheet { path, rows })
        .collect())
}
