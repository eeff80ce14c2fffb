use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use seat_core::{SlotOutcome, SlotStatus};

use crate::types::{AllocateResult, RoomSummary};

pub const COMPLETION_BANNER: &str = "Seating arrangement completed!";

pub fn print_summary(result: &AllocateResult) {
    println!(
        "Mode: {} (buffer {})",
        result.options.mode, result.options.buffer
    );
    println!("{}", summary_table(result));
    let failures: Vec<&SlotOutcome> = result
        .report
        .outcomes
        .iter()
        .filter(|outcome| !outcome.status.is_completed())
        .collect();
    if !failures.is_empty() {
        eprintln!("Skipped slots:");
        for outcome in failures {
            let detail = outcome.status.detail().unwrap_or_default();
            eprintln!("- {}: {} ({detail})", outcome.slot, outcome.status.label());
        }
    }
    println!();
    println!("{COMPLETION_BANNER}");
    println!("Output: {}", result.output_dir.display());
}

/// One row per slot plus a TOTAL row.
pub fn summary_table(result: &AllocateResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Session"),
        header_cell("Subjects"),
        header_cell("Assigned"),
        header_cell("Unplaced"),
        header_cell("Files"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);

    for outcome in &result.report.outcomes {
        let subjects = outcome
            .slot
            .subjects
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&outcome.slot.date),
            Cell::new(outcome.slot.session),
            Cell::new(subjects),
            Cell::new(outcome.assigned_total),
            count_cell(outcome.unplaced_total(), Color::Yellow),
            count_cell(outcome.artifacts.len(), Color::Green),
            status_cell(&outcome.status),
        ]);
    }

    let report = &result.report;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} slots", report.outcomes.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.assigned_total()).add_attribute(Attribute::Bold),
        count_cell(report.unplaced_total(), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{}/{} ok", report.completed(), report.outcomes.len()))
            .add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_rooms(rooms: &[RoomSummary]) {
    println!("{}", rooms_table(rooms));
}

/// Rooms in fill order with raw and usable capacity.
pub fn rooms_table(rooms: &[RoomSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Room"),
        header_cell("Capacity"),
        header_cell("Usable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, room) in rooms.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&room.room),
            Cell::new(room.capacity),
            Cell::new(room.usable),
        ]);
    }
    let usable: u32 = rooms.iter().map(|room| room.usable).sum();
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(usable).add_attribute(Attribute::Bold),
    ]);
    table
}

fn status_cell(status: &SlotStatus) -> Cell {
    let color = if status.is_completed() {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(status.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}
