pub mod archive;
pub mod common;
pub mod export;
pub mod html;
pub mod tables;
pub mod xlsx;

pub use archive::{build_zip, build_zip_named};
pub use export::{
    ATTENDANCE_DIR, REMAINING_SEATS_FILE, REMAINING_SEATS_XLSX_FILE, ROOMS_DIR,
    STUDENT_SLIPS_FILE, SessionExporter,
};
pub use html::{render_attendance, render_slips};
pub use tables::{overall_frame, room_plan_frame, seats_left_frame, write_csv};
pub use xlsx::write_xlsx;
