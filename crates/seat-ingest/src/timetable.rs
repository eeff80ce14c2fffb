//! Timetable sheet: one row per day with morning and evening subject lists.

use std::path::Path;

use seat_model::{SessionLabel, SessionSlot, SubjectCode};
use tracing::{debug, warn};

use crate::csv_table::CsvTable;
use crate::error::Result;

/// Cell text marking a session without papers.
pub const NO_EXAM: &str = "NO EXAM";

/// Subject codes of one session cell.
///
/// Codes are `;`-separated and trimmed; blanks are dropped and `NO EXAM`
/// (any case) yields nothing.
pub fn session_subjects(raw: &str) -> Vec<SubjectCode> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(NO_EXAM) {
        return Vec::new();
    }
    raw.split(';')
        .filter_map(|code| SubjectCode::new(code).ok())
        .collect()
}

/// Build slots from the timetable sheet, morning before evening on each day.
pub fn parse_timetable(table: &CsvTable, path: &Path) -> Result<Vec<SessionSlot>> {
    let day_col = table.require_column("day", path)?;
    let sessions = [
        (SessionLabel::Morning, table.require_column("morning", path)?),
        (SessionLabel::Evening, table.require_column("evening", path)?),
    ];

    let mut slots = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        let day = row[day_col].as_str();
        if day.is_empty() {
            warn!(row = index + 2, "timetable row without a day skipped");
            continue;
        }
        for (session, col) in sessions {
            let subjects = session_subjects(&row[col]);
            if subjects.is_empty() {
                debug!(day, session = %session, "no exam");
                continue;
            }
            slots.push(SessionSlot::new(day, session, subjects));
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &str) -> Vec<String> {
        session_subjects(raw)
            .into_iter()
            .map(SubjectCode::into_string)
            .collect()
    }

    #[test]
    fn splits_and_trims_codes() {
        assert_eq!(codes("CS249; MM304 ;;EE101"), vec!["CS249", "MM304", "EE101"]);
    }

    #[test]
    fn no_exam_is_case_insensitive() {
        assert!(codes(" no exam ").is_empty());
        assert!(codes("").is_empty());
        assert!(codes(" ; ").is_empty());
    }
}
