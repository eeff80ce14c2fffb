//! Room capacity sheet.

use std::path::Path;

use seat_model::{RoomCapacities, RoomId};
use tracing::debug;

use crate::csv_table::CsvTable;
use crate::error::Result;

/// Parse a capacity cell: a non-negative integer, or an integral float such
/// as `40.0` from a spreadsheet export.
pub fn parse_capacity(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    match raw.split_once('.') {
        None => raw.parse().ok(),
        Some((whole, fraction)) if fraction.chars().all(|ch| ch == '0') => whole.parse().ok(),
        Some(_) => None,
    }
}

/// Read `Room No.`/`Exam Capacity` rows in sheet order.
///
/// Room ids are uppercased. Rows with a blank room or an unusable capacity
/// (merged cells, text, negatives) are skipped.
pub fn parse_room_capacities(table: &CsvTable, path: &Path) -> Result<RoomCapacities> {
    let room_col = table.require_column("Room No.", path)?;
    let cap_col = table.require_column("Exam Capacity", path)?;

    let mut rooms = RoomCapacities::new();
    for row in &table.rows {
        let Ok(room) = RoomId::new(row[room_col].to_uppercase()) else {
            continue;
        };
        match parse_capacity(&row[cap_col]) {
            Some(capacity) => rooms.insert(room, capacity),
            None => debug!(room = %room, value = %row[cap_col], "invalid room capacity skipped"),
        }
    }
    Ok(rooms)
}
