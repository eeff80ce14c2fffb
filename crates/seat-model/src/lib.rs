pub mod allocation;
pub mod enums;
pub mod error;
pub mod ids;
pub mod options;
pub mod slot;

pub use allocation::{
    Allocation, AllocationResult, Clash, Deficiency, RollNames, RoomCapacities, RoomRolls, Seat,
    SeatsLeft, SubjectRolls,
};
pub use enums::{SeatingMode, SessionLabel};
pub use error::{AllocationError, ModelError, Result, ShapeError};
pub use ids::{MIXED_KEY, RollId, RoomId, SubjectCode};
pub use options::AllocationOptions;
pub use slot::SessionSlot;
