//! Excel copies of the tabular reports.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook};

use crate::common::ensure_parent_dir;

/// Write `df` to a one-sheet workbook with a bold header row.
///
/// Unsigned columns become number cells; everything else is written as text
/// so roll numbers keep their leading digits.
pub fn write_xlsx(df: &DataFrame, sheet_name: &str, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name)
        .with_context(|| format!("name sheet {sheet_name}"))?;

    for (col, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col).context("too many columns for a worksheet")?;
        sheet
            .write_string_with_format(0, col, column.name().as_str(), &header_format)
            .context("write header")?;
        for index in 0..df.height() {
            let row = u32::try_from(index + 1).context("too many rows for a worksheet")?;
            match column.get(index)? {
                AnyValue::Null => {}
                AnyValue::UInt32(value) => {
                    sheet.write_number(row, col, value).context("write number")?;
                }
                AnyValue::String(text) => {
                    sheet.write_string(row, col, text).context("write text")?;
                }
                other => {
                    sheet
                        .write_string(row, col, other.str_value().as_ref())
                        .context("write text")?;
                }
            }
        }
    }
    sheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
