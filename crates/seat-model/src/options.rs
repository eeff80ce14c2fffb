//! Configuration options for seat allocation.

use serde::{Deserialize, Serialize};

use crate::SeatingMode;

/// Options controlling one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationOptions {
    /// Seats held back in every room as a safety margin.
    ///
    /// A room always keeps at least one usable seat, however large the buffer.
    pub buffer: u32,

    /// Density policy for each placement pass.
    pub mode: SeatingMode,
}

impl AllocationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SeatingMode) -> Self {
        self.mode = mode;
        self
    }
}
