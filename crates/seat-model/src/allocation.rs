//! Allocation inputs and outputs.
//!
//! Input collections ([`RoomCapacities`], [`SubjectRolls`]) keep insertion
//! order because the allocator's tie-breaks depend on it. [`Allocation`]
//! keeps fill order at both levels, so seat numbers follow placement order.
//! [`SeatsLeft`] and [`RollNames`] are sorted lookups.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

use crate::{RollId, RoomId, SubjectCode};

/// Base (pre-buffer) exam capacity per room, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCapacities {
    rooms: Vec<(RoomId, u32)>,
}

impl RoomCapacities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a room's capacity. An existing room keeps its position.
    pub fn insert(&mut self, room: RoomId, capacity: u32) {
        match self.rooms.iter_mut().find(|(id, _)| *id == room) {
            Some(entry) => entry.1 = capacity,
            None => self.rooms.push((room, capacity)),
        }
    }

    pub fn get(&self, room: &RoomId) -> Option<u32> {
        self.rooms
            .iter()
            .find(|(id, _)| id == room)
            .map(|(_, capacity)| *capacity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, u32)> {
        self.rooms.iter().map(|(id, capacity)| (id, *capacity))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rooms.iter().map(|(_, c)| u64::from(*c)).sum()
    }
}

impl FromIterator<(RoomId, u32)> for RoomCapacities {
    fn from_iter<I: IntoIterator<Item = (RoomId, u32)>>(iter: I) -> Self {
        let mut rooms = Self::new();
        for (room, capacity) in iter {
            rooms.insert(room, capacity);
        }
        rooms
    }
}

/// Roster per subject, in processing order.
///
/// Roll lists are kept as given; duplicates are not removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRolls {
    subjects: Vec<(SubjectCode, Vec<RollId>)>,
}

impl SubjectRolls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a subject's roster. An existing subject keeps its position.
    pub fn insert(&mut self, subject: SubjectCode, rolls: Vec<RollId>) {
        match self.subjects.iter_mut().find(|(code, _)| *code == subject) {
            Some(entry) => entry.1 = rolls,
            None => self.subjects.push((subject, rolls)),
        }
    }

    pub fn get(&self, subject: &SubjectCode) -> Option<&[RollId]> {
        self.subjects
            .iter()
            .find(|(code, _)| code == subject)
            .map(|(_, rolls)| rolls.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubjectCode, &[RollId])> {
        self.subjects
            .iter()
            .map(|(code, rolls)| (code, rolls.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn roll_count(&self) -> usize {
        self.subjects.iter().map(|(_, rolls)| rolls.len()).sum()
    }
}

impl FromIterator<(SubjectCode, Vec<RollId>)> for SubjectRolls {
    fn from_iter<I: IntoIterator<Item = (SubjectCode, Vec<RollId>)>>(iter: I) -> Self {
        let mut subjects = Self::new();
        for (subject, rolls) in iter {
            subjects.insert(subject, rolls);
        }
        subjects
    }
}

/// Rolls seated per room for one subject, rooms in fill order.
pub type RoomRolls = IndexMap<RoomId, Vec<RollId>>;

/// Canonical allocation: subject -> room -> ordered rolls.
///
/// Subjects and rooms iterate in the order they were first assigned.
/// Equality compares contents and ignores that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    subjects: IndexMap<SubjectCode, RoomRolls>,
}

/// One occupied seat in a room-wise view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub subject: SubjectCode,
    pub roll: RollId,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `subject` has an entry, even if nothing gets seated.
    pub fn ensure_subject(&mut self, subject: SubjectCode) -> &mut RoomRolls {
        self.subjects.entry(subject).or_default()
    }

    /// Append rolls to a subject/room cell.
    pub fn assign<I>(&mut self, subject: SubjectCode, room: RoomId, rolls: I)
    where
        I: IntoIterator<Item = RollId>,
    {
        self.ensure_subject(subject)
            .entry(room)
            .or_default()
            .extend(rolls);
    }

    pub fn subject(&self, subject: &SubjectCode) -> Option<&RoomRolls> {
        self.subjects.get(subject)
    }

    pub fn iter(&self) -> Iter<'_, SubjectCode, RoomRolls> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Sum of every roll list length.
    pub fn assigned_total(&self) -> usize {
        self.subjects
            .values()
            .flat_map(IndexMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn subject_total(&self, subject: &SubjectCode) -> usize {
        self.subjects
            .get(subject)
            .map(|rooms| rooms.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Rolls seated in `room` across all subjects.
    pub fn room_total(&self, room: &RoomId) -> usize {
        self.subjects
            .values()
            .filter_map(|rooms| rooms.get(room))
            .map(Vec::len)
            .sum()
    }

    /// Room-wise view in placement order.
    ///
    /// Rooms appear in the order they were first filled; each room lists its
    /// seats in the order they were assigned.
    pub fn by_room(&self) -> IndexMap<RoomId, Vec<Seat>> {
        let mut rooms: IndexMap<RoomId, Vec<Seat>> = IndexMap::new();
        for (subject, room_rolls) in &self.subjects {
            for (room, rolls) in room_rolls {
                rooms
                    .entry(room.clone())
                    .or_default()
                    .extend(rolls.iter().map(|roll| Seat {
                        subject: subject.clone(),
                        roll: roll.clone(),
                    }));
            }
        }
        rooms
    }

    pub fn into_inner(self) -> IndexMap<SubjectCode, RoomRolls> {
        self.subjects
    }
}

impl From<IndexMap<SubjectCode, RoomRolls>> for Allocation {
    fn from(subjects: IndexMap<SubjectCode, RoomRolls>) -> Self {
        Self { subjects }
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = (&'a SubjectCode, &'a RoomRolls);
    type IntoIter = Iter<'a, SubjectCode, RoomRolls>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}

/// Free seats per room after an allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatsLeft(BTreeMap<RoomId, u32>);

impl SeatsLeft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, room: RoomId, seats: u32) {
        self.0.insert(room, seats);
    }

    pub fn get(&self, room: &RoomId) -> Option<u32> {
        self.0.get(room).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, u32)> {
        self.0.iter().map(|(room, seats)| (room, *seats))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|seats| u64::from(*seats)).sum()
    }
}

impl FromIterator<(RoomId, u32)> for SeatsLeft {
    fn from_iter<I: IntoIterator<Item = (RoomId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Student names keyed by roll number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNames(BTreeMap<RollId, String>);

impl RollNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, roll: RollId, name: impl Into<String>) {
        self.0.insert(roll, name.into());
    }

    /// Name for `roll`, or an empty string when unknown.
    pub fn name(&self, roll: &RollId) -> &str {
        self.0.get(roll).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RollId, String)> for RollNames {
    fn from_iter<I: IntoIterator<Item = (RollId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Two subjects in one slot that share at least one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clash {
    pub subject1: SubjectCode,
    pub subject2: SubjectCode,
    pub roll_numbers: BTreeSet<RollId>,
}

impl fmt::Display for Clash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rolls: Vec<&str> = self.roll_numbers.iter().map(RollId::as_str).collect();
        write!(
            f,
            "{} and {} share {} student(s): {}",
            self.subject1,
            self.subject2,
            rolls.len(),
            rolls.join(", ")
        )
    }
}

/// Rolls of a subject left without a seat once rooms ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deficiency {
    pub subject: SubjectCode,
    pub unplaced: Vec<RollId>,
}

impl Deficiency {
    pub fn count(&self) -> usize {
        self.unplaced.len()
    }
}

/// Output of one allocator call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationResult {
    pub allocation: Allocation,
    pub seats_left: SeatsLeft,
    pub deficiencies: Vec<Deficiency>,
}

impl AllocationResult {
    pub fn unplaced_total(&self) -> usize {
        self.deficiencies.iter().map(Deficiency::count).sum()
    }

    pub fn into_parts(self) -> (Allocation, SeatsLeft) {
        (self.allocation, self.seats_left)
    }
}
