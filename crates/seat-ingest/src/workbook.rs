//! The input workbook: an `.xlsx` file, or a directory holding one CSV export
//! per sheet.

use std::path::{Path, PathBuf};

use seat_model::{RollNames, RoomCapacities, SessionSlot};
use tracing::info;

use crate::csv_table::{CsvTable, read_csv_table};
use crate::xlsx::read_xlsx_table;
use crate::error::{IngestError, Result};
use crate::rooms::parse_room_capacities;
use crate::rosters::{CourseRolls, parse_roll_names};
use crate::timetable::parse_timetable;

pub const TIMETABLE_SHEET: &str = "in_timetable";
pub const COURSE_ROLL_SHEET: &str = "in_course_roll_mapping";
pub const ROLL_NAME_SHEET: &str = "in_roll_name_mapping";
pub const ROOM_CAPACITY_SHEET: &str = "in_room_capacity";

/// Where the sheets live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookSource {
    /// One `<sheet>.csv` per sheet.
    Directory,
    /// Worksheets of one `.xlsx` file.
    Xlsx,
}

/// Handle on the input workbook.
#[derive(Debug, Clone)]
pub struct Workbook {
    root: PathBuf,
    source: WorkbookSource,
}

impl Workbook {
    /// Open a CSV folder or an `.xlsx` file.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let source = if root.is_dir() {
            WorkbookSource::Directory
        } else if root.is_file() {
            let is_xlsx = root
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
            if !is_xlsx {
                return Err(IngestError::UnsupportedInput { path: root });
            }
            WorkbookSource::Xlsx
        } else {
            return Err(IngestError::InputNotFound { path: root });
        };
        Ok(Self { root, source })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source(&self) -> WorkbookSource {
        self.source
    }

    /// Location of a sheet: its CSV export, or `book.xlsx[sheet]`.
    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        match self.source {
            WorkbookSource::Directory => self.root.join(format!("{sheet}.csv")),
            WorkbookSource::Xlsx => PathBuf::from(format!("{}[{sheet}]", self.root.display())),
        }
    }

    fn sheet(&self, sheet: &'static str) -> Result<(CsvTable, PathBuf)> {
        let path = self.sheet_path(sheet);
        let table = match self.source {
            WorkbookSource::Directory => {
                if !path.is_file() {
                    return Err(IngestError::SheetNotFound { sheet, path });
                }
                read_csv_table(&path)?
            }
            WorkbookSource::Xlsx => read_xlsx_table(&self.root, sheet)?,
        };
        Ok((table, path))
    }

    pub fn read_timetable(&self) -> Result<Vec<SessionSlot>> {
        let (table, path) = self.sheet(TIMETABLE_SHEET)?;
        parse_timetable(&table, &path)
    }

    pub fn read_course_rolls(&self) -> Result<CourseRolls> {
        let (table, path) = self.sheet(COURSE_ROLL_SHEET)?;
        CourseRolls::from_table(&table, &path)
    }

    pub fn read_roll_names(&self) -> Result<RollNames> {
        let (table, path) = self.sheet(ROLL_NAME_SHEET)?;
        parse_roll_names(&table, &path)
    }

    pub fn read_room_capacities(&self) -> Result<RoomCapacities> {
        let (table, path) = self.sheet(ROOM_CAPACITY_SHEET)?;
        parse_room_capacities(&table, &path)
    }

    /// Read every sheet.
    pub fn load(&self) -> Result<WorkbookInputs> {
        info!(path = %self.root.display(), source = ?self.source, "reading timetable");
        let timetable = self.read_timetable()?;
        info!("reading course rolls");
        let rosters = self.read_course_rolls()?;
        info!("reading roll-name map");
        let roll_names = self.read_roll_names()?;
        info!("reading room capacities");
        let rooms = self.read_room_capacities()?;
        info!(
            slots = timetable.len(),
            courses = rosters.len(),
            students = roll_names.len(),
            rooms = rooms.len(),
            "workbook loaded"
        );
        Ok(WorkbookInputs {
            timetable,
            rosters,
            roll_names,
            rooms,
        })
    }
}

/// Everything the seating run needs from the workbook.
#[derive(Debug, Clone)]
pub struct WorkbookInputs {
    pub timetable: Vec<SessionSlot>,
    pub rosters: CourseRolls,
    pub roll_names: RollNames,
    pub rooms: RoomCapacities,
}
