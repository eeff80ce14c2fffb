//! Course roll and roll name sheets.

use std::collections::BTreeMap;
use std::path::Path;

use seat_core::RosterSource;
use seat_model::{RollId, RollNames, SubjectCode, SubjectRolls};
use tracing::{debug, warn};

use crate::csv_table::CsvTable;
use crate::error::Result;

/// Rosters of every course in the course roll sheet.
#[derive(Debug, Clone, Default)]
pub struct CourseRolls {
    by_course: BTreeMap<SubjectCode, Vec<RollId>>,
}

impl CourseRolls {
    /// Group `rollno` by `course_code`; each roster is sorted ascending.
    pub fn from_table(table: &CsvTable, path: &Path) -> Result<Self> {
        let roll_col = table.require_column("rollno", path)?;
        let course_col = table.require_column("course_code", path)?;

        let mut by_course: BTreeMap<SubjectCode, Vec<RollId>> = BTreeMap::new();
        for (index, row) in table.rows.iter().enumerate() {
            let (Ok(roll), Ok(course)) = (
                RollId::new(row[roll_col].as_str()),
                SubjectCode::new(row[course_col].as_str()),
            ) else {
                debug!(row = index + 2, "course roll row with blank cell skipped");
                continue;
            };
            by_course.entry(course).or_default().push(roll);
        }
        for rolls in by_course.values_mut() {
            rolls.sort();
        }
        Ok(Self { by_course })
    }

    pub fn courses(&self) -> impl Iterator<Item = &SubjectCode> {
        self.by_course.keys()
    }

    pub fn len(&self) -> usize {
        self.by_course.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_course.is_empty()
    }

    /// Roster of `subject`; empty when the course has no rows.
    pub fn rolls(&self, subject: &SubjectCode) -> &[RollId] {
        self.by_course
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rosters of the given subjects, in the given order.
    pub fn subject_rolls(&self, subjects: &[SubjectCode]) -> SubjectRolls {
        subjects
            .iter()
            .map(|subject| (subject.clone(), self.rolls(subject).to_vec()))
            .collect()
    }
}

impl RosterSource for CourseRolls {
    fn roster(&self, subject: &SubjectCode) -> anyhow::Result<Vec<RollId>> {
        if !self.by_course.contains_key(subject) {
            warn!(subject = %subject, "no students registered for subject");
        }
        Ok(self.rolls(subject).to_vec())
    }
}

/// Read `Roll`/`Name` pairs. Later rows win on duplicate rolls.
pub fn parse_roll_names(table: &CsvTable, path: &Path) -> Result<RollNames> {
    let roll_col = table.require_column("roll", path)?;
    let name_col = table.require_column("name", path)?;

    let mut names = RollNames::new();
    for row in &table.rows {
        match RollId::new(row[roll_col].as_str()) {
            Ok(roll) => names.insert(roll, row[name_col].as_str()),
            Err(_) => debug!("roll name row without roll skipped"),
        }
    }
    Ok(names)
}
