//! Closed sets used by the allocator and the timetable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AllocationError, ModelError};

/// Seating density policy.
///
/// Each mode decides how many of a room's remaining seats a single
/// placement pass may use. Placement order is the same for every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatingMode {
    /// Use every remaining seat.
    #[default]
    Dense,
    /// Use half of the remaining seats.
    Sparse,
    /// Use 70% of the remaining seats.
    Mixed,
}

impl SeatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingMode::Dense => "dense",
            SeatingMode::Sparse => "sparse",
            SeatingMode::Mixed => "mixed",
        }
    }

    /// Seats one pass may take from a room with `seats_left` free seats.
    ///
    /// Never returns 0 while the room still has a free seat.
    pub fn usable_capacity(self, seats_left: u32) -> u32 {
        if seats_left == 0 {
            return 0;
        }
        match self {
            SeatingMode::Dense => dense_capacity(seats_left),
            SeatingMode::Sparse => sparse_capacity(seats_left),
            SeatingMode::Mixed => mixed_capacity(seats_left),
        }
    }
}

fn dense_capacity(seats_left: u32) -> u32 {
    seats_left
}

fn sparse_capacity(seats_left: u32) -> u32 {
    (seats_left / 2).max(1)
}

fn mixed_capacity(seats_left: u32) -> u32 {
    // floor(0.7 * seats) without float rounding error
    let scaled = u64::from(seats_left) * 7 / 10;
    u32::try_from(scaled).unwrap_or(seats_left).max(1)
}

impl fmt::Display for SeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatingMode {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dense" => Ok(SeatingMode::Dense),
            "sparse" => Ok(SeatingMode::Sparse),
            "mixed" => Ok(SeatingMode::Mixed),
            _ => Err(AllocationError::InvalidMode(s.to_string())),
        }
    }
}

/// Exam session within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionLabel {
    Morning,
    Evening,
}

impl SessionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionLabel::Morning => "morning",
            SessionLabel::Evening => "evening",
        }
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(SessionLabel::Morning),
            "evening" => Ok(SessionLabel::Evening),
            _ => Err(ModelError::UnknownSession(s.to_string())),
        }
    }
}
