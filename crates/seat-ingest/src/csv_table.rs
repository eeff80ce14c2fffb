use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};

/// A sheet read as text cells, from a CSV export or an `.xlsx` worksheet.
///
/// The first non-blank row is the header row; every data row is padded or
/// truncated to the header width.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table from raw rows. Returns `None` when every row is blank.
    pub fn from_records<R, S>(records: impl IntoIterator<Item = R>) -> Option<Self>
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        for record in records {
            let mut row: Vec<String> = record
                .into_iter()
                .map(|cell| normalize_cell(cell.as_ref()))
                .collect();
            if row.iter().all(String::is_empty) {
                continue;
            }
            let Some(width) = headers.as_ref().map(Vec::len) else {
                headers = Some(row.iter().map(|cell| normalize_header(cell)).collect());
                continue;
            };
            row.resize(width, String::new());
            rows.push(row);
        }
        headers.map(|headers| Self { headers, rows })
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    /// Like [`CsvTable::column_index`] but fails with [`IngestError::MissingColumn`].
    pub fn require_column(&self, name: &'static str, path: &Path) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name,
                path: path.to_path_buf(),
                found: self.headers.join(", "),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    normalize_cell(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let csv_error = |source| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    CsvTable::from_records(records.iter().map(StringRecord::iter)).ok_or_else(|| {
        IngestError::EmptySheet {
            path: path.to_path_buf(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_and_collapsed() {
        assert_eq!(normalize_header("\u{feff} Room   No. "), "Room No.");
        assert_eq!(normalize_header("Exam\tCapacity"), "Exam Capacity");
    }

    #[test]
    fn blank_rows_are_skipped_before_and_after_header() {
        let table = CsvTable::from_records(vec![
            vec!["", " "],
            vec![" Room  No. ", "Exam Capacity"],
            vec!["6101"],
            vec!["", ""],
            vec!["6102", "30", "extra"],
        ])
        .unwrap();
        assert_eq!(table.headers, vec!["Room No.", "Exam Capacity"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["6101".to_string(), String::new()],
                vec!["6102".to_string(), "30".to_string()],
            ]
        );
        assert!(CsvTable::from_records(vec![vec![""]]).is_none());
    }

    #[test]
    fn column_lookup_ignores_case() {
        let table = CsvTable {
            headers: vec!["Day".to_string(), "Morning".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(table.column_index("day"), Some(0));
        assert_eq!(table.column_index("MORNING"), Some(1));
        assert_eq!(table.column_index("evening"), None);

        let err = table
            .require_column("evening", Path::new("in_timetable.csv"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "required column 'evening' not found in in_timetable.csv (found: Day, Morning)"
        );
    }
}
