//! Tabular reports written as CSV through polars.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use seat_model::{Allocation, RollId, RollNames, RoomId, Seat, SeatsLeft, SessionSlot};

use crate::common::{ensure_parent_dir, file_segment};

/// One row per (subject, room) placement.
///
/// Columns: Date, Session, Subject, Room, Count, Roll_Numbers (`;`-joined).
pub fn overall_frame(slot: &SessionSlot, allocation: &Allocation) -> Result<DataFrame> {
    let mut subjects = Vec::new();
    let mut rooms = Vec::new();
    let mut counts: Vec<u32> = Vec::new();
    let mut rolls = Vec::new();
    for (subject, room_rolls) in allocation {
        for (room, assigned) in room_rolls {
            subjects.push(subject.to_string());
            rooms.push(room.to_string());
            counts.push(u32::try_from(assigned.len()).context("room count overflow")?);
            rolls.push(join_rolls(assigned));
        }
    }
    let height = subjects.len();
    let df = df! {
        "Date" => vec![slot.date.clone(); height],
        "Session" => vec![slot.session.to_string(); height],
        "Subject" => subjects,
        "Room" => rooms,
        "Count" => counts,
        "Roll_Numbers" => rolls,
    }?;
    Ok(df)
}

/// Columns: Room, Seats_Left.
pub fn seats_left_frame(seats_left: &SeatsLeft) -> Result<DataFrame> {
    let (rooms, left): (Vec<String>, Vec<u32>) = seats_left
        .iter()
        .map(|(room, seats)| (room.to_string(), seats))
        .unzip();
    let df = df! {
        "Room" => rooms,
        "Seats_Left" => left,
    }?;
    Ok(df)
}

/// Seating plan of one room. Columns: Seat, Subject, Roll, Name.
pub fn room_plan_frame(seats: &[Seat], names: &RollNames) -> Result<DataFrame> {
    let seat_numbers: Vec<u32> = (1..=u32::try_from(seats.len()).context("room size overflow")?)
        .collect();
    let df = df! {
        "Seat" => seat_numbers,
        "Subject" => seats.iter().map(|seat| seat.subject.to_string()).collect::<Vec<_>>(),
        "Roll" => seats.iter().map(|seat| seat.roll.to_string()).collect::<Vec<_>>(),
        "Name" => seats.iter().map(|seat| names.name(&seat.roll).to_string()).collect::<Vec<_>>(),
    }?;
    Ok(df)
}

/// Write `df` as a headed CSV file.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// File name of the overall report; spaces and separators become `_`.
pub fn overall_file_name(slot: &SessionSlot) -> String {
    file_segment(&format!("{}_{}_overall.csv", slot.date, slot.session))
}

/// Excel twin of [`overall_file_name`].
pub fn overall_xlsx_file_name(slot: &SessionSlot) -> String {
    file_segment(&format!("{}_{}_overall.xlsx", slot.date, slot.session))
}

/// File name of a room's seating plan.
pub fn room_plan_file_name(room: &RoomId) -> String {
    format!("room_{}.csv", file_segment(room.as_str()))
}

fn join_rolls(rolls: &[RollId]) -> String {
    rolls.iter().map(RollId::as_str).collect::<Vec<_>>().join(";")
}
