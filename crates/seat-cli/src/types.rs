use std::path::PathBuf;

use seat_core::PipelineReport;
use seat_model::{AllocationOptions, RoomId};

#[derive(Debug)]
pub struct AllocateResult {
    pub output_dir: PathBuf,
    pub options: AllocationOptions,
    pub report: PipelineReport,
}

/// One room as the allocator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomId,
    pub capacity: u32,
    pub usable: u32,
}
