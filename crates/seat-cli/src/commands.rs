use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use seat_core::{SeatPool, SessionPipeline, normalize_allocation};
use seat_ingest::Workbook;
use seat_model::AllocationOptions;
use seat_output::SessionExporter;

use crate::cli::{AllocateArgs, NormalizeArgs, RoomsArgs};
use crate::types::{AllocateResult, RoomSummary};

pub fn run_allocate(args: &AllocateArgs) -> Result<AllocateResult> {
    let span = info_span!("allocate", input = %args.input.display());
    let _guard = span.enter();

    let workbook = Workbook::open(&args.input)
        .with_context(|| format!("open input {}", args.input.display()))?;
    let inputs = workbook.load().context("read input sheets")?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("create output folder {}", args.output.display()))?;
    if let Some(photos) = &args.photos
        && !photos.is_dir()
    {
        warn!(path = %photos.display(), "photo folder not found; sheets will show placeholders");
    }

    let options = AllocationOptions::new()
        .with_buffer(args.buffer)
        .with_mode(args.mode.into());
    let mut exporter = SessionExporter::new(&args.output, args.photos.clone());
    if args.no_archive {
        exporter = exporter.without_archive();
    }

    info!(
        slots = inputs.timetable.len(),
        buffer = options.buffer,
        mode = %options.mode,
        "starting allocation"
    );
    let report = SessionPipeline::new(&inputs.rooms, &inputs.roll_names, options).run(
        &inputs.timetable,
        &inputs.rosters,
        &exporter,
    );
    info!(
        completed = report.completed(),
        failed = report.failed(),
        assigned = report.assigned_total(),
        unplaced = report.unplaced_total(),
        "allocation finished"
    );

    Ok(AllocateResult {
        output_dir: args.output.clone(),
        options,
        report,
    })
}

/// Rooms in the order the allocator fills them.
pub fn run_rooms(args: &RoomsArgs) -> Result<Vec<RoomSummary>> {
    let workbook = Workbook::open(&args.input)
        .with_context(|| format!("open input {}", args.input.display()))?;
    let rooms = workbook
        .read_room_capacities()
        .context("read room capacities")?;
    let pool = SeatPool::new(&rooms, args.buffer);
    let summaries = pool
        .fill_order()
        .map(|(room, usable)| RoomSummary {
            room: room.clone(),
            capacity: rooms.get(room).unwrap_or(usable),
            usable,
        })
        .collect();
    Ok(summaries)
}

/// Canonical JSON for an allocation file in any supported shape.
pub fn run_normalize(args: &NormalizeArgs) -> Result<String> {
    let path = &args.file;
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let allocation = normalize_allocation(&raw)
        .with_context(|| format!("normalize {}", path.display()))?;
    serde_json::to_string_pretty(&allocation).context("serialize allocation")
}
