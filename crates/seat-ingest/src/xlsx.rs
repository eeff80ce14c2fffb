//! Worksheets read from an `.xlsx` workbook through calamine.

use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx, XlsxError, open_workbook};
use chrono::{NaiveDateTime, NaiveTime};

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};

/// Read one worksheet as text cells. The sheet name is matched case-insensitively.
pub fn read_xlsx_table(path: &Path, sheet: &'static str) -> Result<CsvTable> {
    let xlsx_error = |source: XlsxError| IngestError::XlsxRead {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(xlsx_error)?;
    let Some(name) = workbook
        .sheet_names()
        .into_iter()
        .find(|name| name.trim().eq_ignore_ascii_case(sheet))
    else {
        return Err(IngestError::SheetNotFound {
            sheet,
            path: path.to_path_buf(),
        });
    };
    let range = workbook.worksheet_range(&name).map_err(xlsx_error)?;

    CsvTable::from_records(range.rows().map(|row| row.iter().map(cell_text))).ok_or_else(|| {
        IngestError::EmptySheet {
            path: path.to_path_buf(),
        }
    })
}

/// Text of one cell as the CSV export of the same sheet would show it.
///
/// Whole numbers lose their `.0`; date cells become `YYYY-MM-DD`, with the
/// time appended only when it is not midnight.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.clone(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map_or_else(|| cell.to_string(), format_datetime),
        other => other.to_string(),
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
