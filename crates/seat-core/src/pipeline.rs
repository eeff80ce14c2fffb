//! Per-slot seating pipeline.
//!
//! Each timetable slot runs through these stages in order:
//! 1. **Rosters**: fetch the roll list of every subject in the slot
//! 2. **Clash check**: skip the slot if a student sits two papers at once
//! 3. **Allocate**: greedy room allocation with a fresh seat pool
//! 4. **Normalize**: coerce the allocation into the canonical shape
//! 5. **Validate**: recount seated students
//! 6. **Export**: hand the result to the report collaborator
//!
//! A failure in one slot is logged and recorded in its [`SlotOutcome`]; the
//! remaining slots still run.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info, info_span, warn};

use seat_model::{
    Allocation, AllocationOptions, Clash, Deficiency, RollId, RollNames, RoomCapacities,
    SeatsLeft, SessionSlot, SubjectCode, SubjectRolls,
};

use crate::allocator::RoomAllocator;
use crate::clash::check_clashes;
use crate::normalizer::AllocationNormalizer;

/// Supplies the roster of a subject.
pub trait RosterSource {
    fn roster(&self, subject: &SubjectCode) -> Result<Vec<RollId>>;
}

impl RosterSource for SubjectRolls {
    fn roster(&self, subject: &SubjectCode) -> Result<Vec<RollId>> {
        Ok(self.get(subject).map(<[RollId]>::to_vec).unwrap_or_default())
    }
}

/// Renders one allocated slot and returns the files it produced.
pub trait SlotExporter {
    fn export(
        &self,
        slot: &SessionSlot,
        allocation: &Allocation,
        seats_left: &SeatsLeft,
        roll_names: &RollNames,
    ) -> Result<Vec<PathBuf>>;
}

/// How a slot ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Allocated and exported.
    Completed,
    /// Skipped before allocation because two subjects share students.
    Clash(Clash),
    /// A roster could not be fetched.
    RosterFailed(String),
    /// Allocation output could not be normalized.
    AllocationFailed(String),
    /// The exporter failed.
    ExportFailed(String),
}

impl SlotStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, SlotStatus::Completed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Completed => "completed",
            SlotStatus::Clash(_) => "clash",
            SlotStatus::RosterFailed(_) => "roster failed",
            SlotStatus::AllocationFailed(_) => "allocation failed",
            SlotStatus::ExportFailed(_) => "export failed",
        }
    }

    /// Diagnostic text for non-completed slots.
    pub fn detail(&self) -> Option<String> {
        match self {
            SlotStatus::Completed => None,
            SlotStatus::Clash(clash) => Some(clash.to_string()),
            SlotStatus::RosterFailed(message)
            | SlotStatus::AllocationFailed(message)
            | SlotStatus::ExportFailed(message) => Some(message.clone()),
        }
    }
}

/// Result of running one slot.
#[derive(Debug, Clone)]
pub struct SlotOutcome {
    pub slot: SessionSlot,
    pub status: SlotStatus,
    pub assigned_total: usize,
    pub deficiencies: Vec<Deficiency>,
    pub artifacts: Vec<PathBuf>,
}

impl SlotOutcome {
    fn new(slot: &SessionSlot, status: SlotStatus) -> Self {
        Self {
            slot: slot.clone(),
            status,
            assigned_total: 0,
            deficiencies: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn unplaced_total(&self) -> usize {
        self.deficiencies.iter().map(Deficiency::count).sum()
    }
}

/// Outcomes of every slot, in timetable order.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub outcomes: Vec<SlotOutcome>,
}

impl PipelineReport {
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_completed())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    pub fn assigned_total(&self) -> usize {
        self.outcomes.iter().map(|o| o.assigned_total).sum()
    }

    pub fn unplaced_total(&self) -> usize {
        self.outcomes.iter().map(SlotOutcome::unplaced_total).sum()
    }
}

/// Runs slots one after another against a shared room list.
pub struct SessionPipeline<'a> {
    rooms: &'a RoomCapacities,
    roll_names: &'a RollNames,
    allocator: RoomAllocator,
    normalizer: AllocationNormalizer,
}

impl<'a> SessionPipeline<'a> {
    pub fn new(
        rooms: &'a RoomCapacities,
        roll_names: &'a RollNames,
        options: AllocationOptions,
    ) -> Self {
        Self {
            rooms,
            roll_names,
            allocator: RoomAllocator::new(options),
            normalizer: AllocationNormalizer::default(),
        }
    }

    /// Replace the default normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: AllocationNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run every slot in order.
    pub fn run(
        &self,
        timetable: &[SessionSlot],
        rosters: &dyn RosterSource,
        exporter: &dyn SlotExporter,
    ) -> PipelineReport {
        let outcomes = timetable
            .iter()
            .map(|slot| self.run_slot(slot, rosters, exporter))
            .collect();
        PipelineReport { outcomes }
    }

    /// Run a single slot. Failures are captured in the outcome.
    pub fn run_slot(
        &self,
        slot: &SessionSlot,
        rosters: &dyn RosterSource,
        exporter: &dyn SlotExporter,
    ) -> SlotOutcome {
        let span = info_span!("slot", date = %slot.date, session = %slot.session);
        let _guard = span.enter();
        info!(subjects = slot.subjects.len(), "processing slot");

        let mut subject_rolls = SubjectRolls::new();
        for subject in &slot.subjects {
            match rosters.roster(subject) {
                Ok(rolls) => subject_rolls.insert(subject.clone(), rolls),
                Err(err) => {
                    error!(subject = %subject, error = %format!("{err:#}"), "roster lookup failed");
                    return SlotOutcome::new(
                        slot,
                        SlotStatus::RosterFailed(format!("{subject}: {err:#}")),
                    );
                }
            }
        }

        if let Some(clash) = check_clashes(&slot.subjects, &subject_rolls) {
            error!(
                subject1 = %clash.subject1,
                subject2 = %clash.subject2,
                students = clash.roll_numbers.len(),
                "clash detected; skipping slot"
            );
            return SlotOutcome::new(slot, SlotStatus::Clash(clash));
        }

        let result = self.allocator.allocate(&subject_rolls, self.rooms);
        let unplaced = result.unplaced_total();
        let deficiencies = result.deficiencies;

        let allocation = match serde_json::to_value(&result.allocation)
            .map_err(|err| err.to_string())
            .and_then(|raw| self.normalizer.normalize(&raw).map_err(|err| err.to_string()))
        {
            Ok(allocation) => allocation,
            Err(message) => {
                error!(error = %message, "allocation normalization failed");
                let mut outcome = SlotOutcome::new(slot, SlotStatus::AllocationFailed(message));
                outcome.deficiencies = deficiencies;
                return outcome;
            }
        };

        let assigned_total = allocation.assigned_total();
        info!(assigned_total, unplaced, "allocation complete");
        if assigned_total + unplaced != subject_rolls.roll_count() {
            warn!(
                assigned_total,
                unplaced,
                rostered = subject_rolls.roll_count(),
                "seated count does not match roster size"
            );
        }

        let mut outcome = SlotOutcome::new(slot, SlotStatus::Completed);
        outcome.assigned_total = assigned_total;
        outcome.deficiencies = deficiencies;

        match exporter.export(slot, &allocation, &result.seats_left, self.roll_names) {
            Ok(artifacts) => {
                info!(files = artifacts.len(), "slot exported");
                outcome.artifacts = artifacts;
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "export failed");
                outcome.status = SlotStatus::ExportFailed(format!("{err:#}"));
            }
        }
        outcome
    }
}
