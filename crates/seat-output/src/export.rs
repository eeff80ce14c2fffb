//! Per-slot export of every report into `<output>/<date>/<session>/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use seat_core::SlotExporter;
use seat_model::{Allocation, RollNames, SeatsLeft, SessionSlot};
use tracing::info;

use crate::archive::build_zip;
use crate::common::{ensure_output_dir, file_segment, write_file};
use crate::html::{render_attendance, render_slips};
use crate::tables::{
    overall_file_name, overall_frame, overall_xlsx_file_name, room_plan_file_name,
    room_plan_frame, seats_left_frame, write_csv,
};
use crate::xlsx::write_xlsx;

pub const REMAINING_SEATS_FILE: &str = "remaining_seats.csv";
pub const REMAINING_SEATS_XLSX_FILE: &str = "remaining_seats.xlsx";
pub const STUDENT_SLIPS_FILE: &str = "student_slips.html";
pub const ROOMS_DIR: &str = "rooms";
pub const ATTENDANCE_DIR: &str = "attendance";

/// Writes the report set for each slot under an output root.
#[derive(Debug, Clone)]
pub struct SessionExporter {
    output_root: PathBuf,
    photos_dir: Option<PathBuf>,
    archive: bool,
}

impl SessionExporter {
    pub fn new(output_root: impl Into<PathBuf>, photos_dir: Option<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            photos_dir,
            archive: true,
        }
    }

    /// Skip the zip archive.
    #[must_use]
    pub fn without_archive(mut self) -> Self {
        self.archive = false;
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Folder a slot's reports go to.
    pub fn session_dir(&self, slot: &SessionSlot) -> PathBuf {
        self.output_root
            .join(file_segment(&slot.date))
            .join(slot.session.as_str())
    }
}

impl SlotExporter for SessionExporter {
    fn export(
        &self,
        slot: &SessionSlot,
        allocation: &Allocation,
        seats_left: &SeatsLeft,
        roll_names: &RollNames,
    ) -> Result<Vec<PathBuf>> {
        let session_dir = self.session_dir(slot);
        std::fs::create_dir_all(&session_dir)
            .with_context(|| format!("create {}", session_dir.display()))?;
        info!(path = %session_dir.display(), "writing reports");
        let photos = self.photos_dir.as_deref();
        let mut written = Vec::new();

        let mut overall = overall_frame(slot, allocation)?;
        let overall_path = session_dir.join(overall_file_name(slot));
        write_csv(&mut overall, &overall_path)?;
        written.push(overall_path);
        let overall_xlsx = session_dir.join(overall_xlsx_file_name(slot));
        write_xlsx(&overall, "overall", &overall_xlsx)?;
        written.push(overall_xlsx);

        let mut seats = seats_left_frame(seats_left)?;
        let seats_path = session_dir.join(REMAINING_SEATS_FILE);
        write_csv(&mut seats, &seats_path)?;
        written.push(seats_path);
        let seats_xlsx = session_dir.join(REMAINING_SEATS_XLSX_FILE);
        write_xlsx(&seats, "remaining_seats", &seats_xlsx)?;
        written.push(seats_xlsx);

        let by_room = allocation.by_room();

        let rooms_dir = ensure_output_dir(&session_dir, ROOMS_DIR)?;
        for (room, seats) in &by_room {
            let path = rooms_dir.join(room_plan_file_name(room));
            write_csv(&mut room_plan_frame(seats, roll_names)?, &path)?;
            written.push(path);
        }
        info!(rooms = by_room.len(), "room plans written");

        let attendance_dir = ensure_output_dir(&session_dir, ATTENDANCE_DIR)?;
        for (room, seats) in &by_room {
            let path = attendance_dir.join(format!("attendance_{}.html", file_segment(room.as_str())));
            let html = render_attendance(slot, room, seats, roll_names, photos)
                .with_context(|| format!("render attendance for room {room}"))?;
            write_file(&path, html.as_bytes())?;
            written.push(path);
        }
        info!(rooms = by_room.len(), "attendance sheets written");

        let slips_path = session_dir.join(STUDENT_SLIPS_FILE);
        let slips = render_slips(slot, &by_room, roll_names, photos).context("render slips")?;
        write_file(&slips_path, slips.as_bytes())?;
        written.push(slips_path);

        if self.archive {
            let prefix = format!("seating_{}_{}", file_segment(&slot.date), slot.session);
            let zip_path = build_zip(&session_dir, &prefix)?;
            info!(path = %zip_path.display(), "archive created");
            written.push(zip_path);
        }

        Ok(written)
    }
}
