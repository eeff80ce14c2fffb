pub mod csv_table;
pub mod error;
pub mod rooms;
pub mod rosters;
pub mod timetable;
pub mod workbook;
pub mod xlsx;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use rooms::{parse_capacity, parse_room_capacities};
pub use rosters::{CourseRolls, parse_roll_names};
pub use timetable::{NO_EXAM, parse_timetable, session_subjects};
pub use workbook::{
    COURSE_ROLL_SHEET, ROLL_NAME_SHEET, ROOM_CAPACITY_SHEET, TIMETABLE_SHEET, Workbook,
    WorkbookInputs, WorkbookSource,
};
pub use xlsx::read_xlsx_table;
