use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use super::rows::{SheetRow, header};

/// Write one sheet (header plus rows) to `writer`.
///
/// Records end in `\n`; fields are quoted only when needed.
pub fn write_sheet_to<W: Write>(writer: W, locale: &str, rows: &[SheetRow]) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(header(locale))?;
    for row in rows {
        csv.write_record(row.fields())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_sheet(path: &Path, locale: &str, rows: &[SheetRow]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_sheet_to(file, locale, rows)
        .with_context(|| format!("Failed to write {}", path.display()))
}
