//! Greedy largest-first room allocation.
//!
//! Rooms are ordered once per call by buffered capacity, largest first, and
//! every subject draws from the same shrinking pool of seats. The density
//! mode only changes how many free seats one placement pass may use.

use seat_model::{
    Allocation, AllocationError, AllocationOptions, AllocationResult, Deficiency, RollId,
    RoomCapacities, RoomId, SeatingMode, SeatsLeft, SubjectRolls,
};
use tracing::{debug, error, info};

/// Capacity after holding back `buffer` seats, never below one seat.
pub fn adjusted_capacity(base: u32, buffer: u32) -> u32 {
    base.saturating_sub(buffer).max(1)
}

#[derive(Debug, Clone)]
struct PoolRoom {
    id: RoomId,
    adjusted: u32,
    seats_left: u32,
}

/// Free seats per room for one allocation call, in fill order.
///
/// The pool is owned by a single call and moved through each subject's fill
/// step, so seats drawn by one subject are gone for the next.
#[derive(Debug, Clone)]
pub struct SeatPool {
    rooms: Vec<PoolRoom>,
}

/// Placements made for one subject.
#[derive(Debug, Default)]
struct SubjectFill {
    placements: Vec<(RoomId, Vec<RollId>)>,
    unplaced: Vec<RollId>,
}

impl SeatPool {
    pub fn new(rooms: &RoomCapacities, buffer: u32) -> Self {
        let mut pool: Vec<PoolRoom> = rooms
            .iter()
            .map(|(id, base)| {
                let adjusted = adjusted_capacity(base, buffer);
                PoolRoom {
                    id: id.clone(),
                    adjusted,
                    seats_left: adjusted,
                }
            })
            .collect();
        // sort_by is stable: equal capacities keep enumeration order
        pool.sort_by(|a, b| b.adjusted.cmp(&a.adjusted));
        Self { rooms: pool }
    }

    /// Rooms in fill order with their buffered capacity.
    pub fn fill_order(&self) -> impl Iterator<Item = (&RoomId, u32)> {
        self.rooms.iter().map(|room| (&room.id, room.adjusted))
    }

    pub fn seats_left(&self) -> SeatsLeft {
        self.rooms
            .iter()
            .map(|room| (room.id.clone(), room.seats_left))
            .collect()
    }

    fn fill_subject(mut self, rolls: &[RollId], mode: SeatingMode) -> (Self, SubjectFill) {
        let mut fill = SubjectFill::default();
        let mut remaining = rolls;
        let mut cursor = 0usize;

        while !remaining.is_empty() && cursor < self.rooms.len() {
            let room = &mut self.rooms[cursor];
            if room.seats_left == 0 {
                cursor += 1;
                continue;
            }
            let usable = mode.usable_capacity(room.seats_left) as usize;
            let count = usable.min(remaining.len());
            let (assigned, rest) = remaining.split_at(count);
            // count <= usable <= seats_left, so this fits in u32
            let taken = u32::try_from(count).unwrap_or(room.seats_left);
            room.seats_left -= taken;
            fill.placements.push((room.id.clone(), assigned.to_vec()));
            remaining = rest;
        }

        fill.unplaced = remaining.to_vec();
        (self, fill)
    }
}

/// Greedy bin-packing of subject rosters into rooms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomAllocator {
    options: AllocationOptions,
}

impl RoomAllocator {
    pub fn new(options: AllocationOptions) -> Self {
        Self { options }
    }

    /// Build an allocator from a textual mode, failing before any work on an
    /// unknown mode.
    pub fn from_mode_name(buffer: u32, mode: &str) -> Result<Self, AllocationError> {
        let mode: SeatingMode = mode.parse()?;
        Ok(Self::new(AllocationOptions { buffer, mode }))
    }

    pub fn options(&self) -> AllocationOptions {
        self.options
    }

    /// Seat every subject in input order.
    ///
    /// A subject that runs out of rooms is reported as a [`Deficiency`] and the
    /// run carries on with the next subject; rooms are not reset between
    /// subjects.
    pub fn allocate(&self, subject_rolls: &SubjectRolls, rooms: &RoomCapacities) -> AllocationResult {
        let AllocationOptions { buffer, mode } = self.options;
        let mut pool = SeatPool::new(rooms, buffer);
        for (room, capacity) in pool.fill_order() {
            debug!(room = %room, capacity, buffer, "room capacity after buffer");
        }

        let mut allocation = Allocation::new();
        let mut deficiencies = Vec::new();

        for (subject, rolls) in subject_rolls.iter() {
            info!(subject = %subject, students = rolls.len(), mode = %mode, "allocating subject");
            allocation.ensure_subject(subject.clone());

            let (next_pool, fill) = pool.fill_subject(rolls, mode);
            pool = next_pool;

            for (room, assigned) in fill.placements {
                debug!(
                    subject = %subject,
                    room = %room,
                    assigned = assigned.len(),
                    "assigned students to room"
                );
                allocation.assign(subject.clone(), room, assigned);
            }

            if !fill.unplaced.is_empty() {
                error!(
                    subject = %subject,
                    unassigned = fill.unplaced.len(),
                    "not enough rooms for subject"
                );
                deficiencies.push(Deficiency {
                    subject: subject.clone(),
                    unplaced: fill.unplaced,
                });
            }
        }

        AllocationResult {
            allocation,
            seats_left: pool.seats_left(),
            deficiencies,
        }
    }
}
