pub mod allocator;
pub mod clash;
pub mod normalizer;
pub mod pipeline;

pub use allocator::{RoomAllocator, SeatPool, adjusted_capacity};
pub use clash::check_clashes;
pub use normalizer::{
    AllocationNormalizer, FlatRoomDecoder, NestedMappingDecoder, RecordSequenceDecoder,
    ShapeDecoder, TupleSequenceDecoder, normalize_allocation,
};
pub use pipeline::{
    PipelineReport, RosterSource, SessionPipeline, SlotExporter, SlotOutcome, SlotStatus,
};
