//! Tests for greedy room allocation.

use proptest::prelude::*;
use seat_core::{RoomAllocator, SeatPool, adjusted_capacity};
use seat_model::{
    AllocationOptions, RollId, RoomCapacities, RoomId, SeatingMode, SubjectCode, SubjectRolls,
};

fn rooms(entries: &[(&str, u32)]) -> RoomCapacities {
    entries
        .iter()
        .map(|(id, cap)| (RoomId::new(*id).unwrap(), *cap))
        .collect()
}

fn roster(prefix: &str, count: usize) -> Vec<RollId> {
    (1..=count)
        .map(|n| RollId::new(format!("{prefix}{n:02}")).unwrap())
        .collect()
}

fn subjects(entries: Vec<(&str, Vec<RollId>)>) -> SubjectRolls {
    entries
        .into_iter()
        .map(|(code, rolls)| (SubjectCode::new(code).unwrap(), rolls))
        .collect()
}

fn room(id: &str) -> RoomId {
    RoomId::new(id).unwrap()
}

fn subject(code: &str) -> SubjectCode {
    SubjectCode::new(code).unwrap()
}

fn allocator(buffer: u32, mode: SeatingMode) -> RoomAllocator {
    RoomAllocator::new(AllocationOptions::new().with_buffer(buffer).with_mode(mode))
}

// ============================================================================
// Dense fill
// ============================================================================

#[test]
fn dense_fills_largest_room_first() {
    let rolls = roster("X", 12);
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("X", rolls.clone())]),
        &rooms(&[("A", 10), ("B", 5)]),
    );

    let x = result.allocation.subject(&subject("X")).unwrap();
    assert_eq!(x.len(), 2);
    assert_eq!(x[&room("A")], rolls[0..10].to_vec());
    assert_eq!(x[&room("B")], rolls[10..12].to_vec());
    assert_eq!(result.seats_left.get(&room("A")), Some(0));
    assert_eq!(result.seats_left.get(&room("B")), Some(3));
    assert!(result.deficiencies.is_empty());
}

#[test]
fn rooms_are_shared_between_subjects() {
    let first = roster("P", 7);
    let second = roster("Q", 6);
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("CS249", first.clone()), ("MM304", second.clone())]),
        &rooms(&[("A", 10), ("B", 5)]),
    );

    let cs = result.allocation.subject(&subject("CS249")).unwrap();
    assert_eq!(cs[&room("A")], first);
    assert!(!cs.contains_key(&room("B")));

    // cursor restarts at A, which still has three seats
    let mm = result.allocation.subject(&subject("MM304")).unwrap();
    assert_eq!(mm[&room("A")], second[0..3].to_vec());
    assert_eq!(mm[&room("B")], second[3..6].to_vec());
    assert_eq!(result.seats_left.get(&room("A")), Some(0));
    assert_eq!(result.seats_left.get(&room("B")), Some(2));
}

#[test]
fn shortage_is_reported_as_deficiency() {
    let rolls = roster("X", 20);
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("X", rolls.clone()), ("Y", roster("Y", 2))]),
        &rooms(&[("A", 10), ("B", 5)]),
    );

    assert_eq!(result.deficiencies.len(), 2);
    assert_eq!(result.deficiencies[0].subject, subject("X"));
    assert_eq!(result.deficiencies[0].unplaced, rolls[15..20].to_vec());
    assert_eq!(result.deficiencies[1].subject, subject("Y"));
    assert_eq!(result.deficiencies[1].count(), 2);
    assert_eq!(result.unplaced_total(), 7);

    // the starved subject still has an (empty) entry
    let y = result.allocation.subject(&subject("Y")).unwrap();
    assert!(y.is_empty());
    assert_eq!(result.seats_left.total(), 0);
}

#[test]
fn empty_roster_gets_empty_entry() {
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("EE101", Vec::new())]),
        &rooms(&[("A", 10)]),
    );
    assert!(result.allocation.subject(&subject("EE101")).unwrap().is_empty());
    assert_eq!(result.seats_left.get(&room("A")), Some(10));
}

#[test]
fn no_rooms_leaves_everyone_unplaced() {
    let result = allocator(0, SeatingMode::Dense)
        .allocate(&subjects(vec![("X", roster("X", 3))]), &RoomCapacities::new());
    assert_eq!(result.unplaced_total(), 3);
    assert!(result.seats_left.is_empty());
    assert_eq!(result.allocation.assigned_total(), 0);
}

#[test]
fn duplicate_rolls_are_not_deduplicated() {
    let roll = RollId::new("1401AI01").unwrap();
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("X", vec![roll.clone(), roll.clone()])]),
        &rooms(&[("A", 10)]),
    );
    let x = result.allocation.subject(&subject("X")).unwrap();
    assert_eq!(x[&room("A")], vec![roll.clone(), roll]);
    assert_eq!(result.seats_left.get(&room("A")), Some(8));
}

#[test]
fn room_plan_follows_placement_order() {
    let zz = roster("Z", 11);
    let aa = roster("A", 1);
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("ZZ9", zz.clone()), ("AA1", aa.clone())]),
        &rooms(&[("LT1", 10), ("6101", 3)]),
    );
    let allocation = &result.allocation;

    let order: Vec<&str> = allocation.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(order, vec!["ZZ9", "AA1"]);
    let zz_rooms: Vec<&str> = allocation
        .subject(&subject("ZZ9"))
        .unwrap()
        .keys()
        .map(RoomId::as_str)
        .collect();
    assert_eq!(zz_rooms, vec!["LT1", "6101"]);

    let by_room = allocation.by_room();
    let plan_rooms: Vec<&str> = by_room.keys().map(RoomId::as_str).collect();
    assert_eq!(plan_rooms, vec!["LT1", "6101"]);
    let seats: Vec<(&str, &RollId)> = by_room[&room("6101")]
        .iter()
        .map(|seat| (seat.subject.as_str(), &seat.roll))
        .collect();
    assert_eq!(seats, vec![("ZZ9", &zz[10]), ("AA1", &aa[0])]);
}

// ============================================================================
// Buffer and modes
// ============================================================================

#[test]
fn buffer_reduces_capacity_but_keeps_one_seat() {
    let result = allocator(8, SeatingMode::Dense).allocate(
        &subjects(vec![("X", roster("X", 3))]),
        &rooms(&[("A", 5), ("B", 12)]),
    );
    let x = result.allocation.subject(&subject("X")).unwrap();
    // B adjusts to 4, A to 1
    assert_eq!(x[&room("B")].len(), 3);
    assert_eq!(result.seats_left.get(&room("B")), Some(1));
    assert_eq!(result.seats_left.get(&room("A")), Some(1));
}

#[test]
fn sparse_revisits_room_until_exhausted() {
    let rolls = roster("X", 12);
    let sparse = allocator(0, SeatingMode::Sparse).allocate(
        &subjects(vec![("X", rolls.clone())]),
        &rooms(&[("A", 10), ("B", 5)]),
    );
    let dense = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("X", rolls)]),
        &rooms(&[("A", 10), ("B", 5)]),
    );
    // passes of 5, 2, 1, 1, 1 all land in A before the cursor moves on
    assert_eq!(sparse.allocation, dense.allocation);
    assert_eq!(sparse.seats_left, dense.seats_left);
}

#[test]
fn mixed_mode_places_whole_roster_in_one_room() {
    let rolls = roster("X", 9);
    let result = allocator(0, SeatingMode::Mixed).allocate(
        &subjects(vec![("X", rolls.clone())]),
        &rooms(&[("A", 10), ("B", 5)]),
    );
    let x = result.allocation.subject(&subject("X")).unwrap();
    assert_eq!(x[&room("A")], rolls);
    assert_eq!(result.seats_left.get(&room("A")), Some(1));
    assert_eq!(result.seats_left.get(&room("B")), Some(5));
}

#[test]
fn equal_rooms_fill_in_input_order() {
    let result = allocator(0, SeatingMode::Dense).allocate(
        &subjects(vec![("X", roster("X", 12))]),
        &rooms(&[("R2", 10), ("R1", 10)]),
    );
    let x = result.allocation.subject(&subject("X")).unwrap();
    assert_eq!(x[&room("R2")].len(), 10);
    assert_eq!(x[&room("R1")].len(), 2);

    let pool = SeatPool::new(&rooms(&[("R2", 10), ("R1", 10)]), 0);
    let order: Vec<&str> = pool.fill_order().map(|(id, _)| id.as_str()).collect();
    assert_eq!(order, vec!["R2", "R1"]);
}

#[test]
fn allocation_is_deterministic() {
    let input = subjects(vec![("X", roster("X", 17)), ("Y", roster("Y", 9))]);
    let caps = rooms(&[("A", 8), ("B", 8), ("C", 6)]);
    let allocator = allocator(1, SeatingMode::Sparse);
    assert_eq!(allocator.allocate(&input, &caps), allocator.allocate(&input, &caps));
}

// ============================================================================
// Invariants
// ============================================================================

fn arb_rooms() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..40, 0..6)
}

fn arb_roster_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..50, 1..5)
}

fn arb_mode() -> impl Strategy<Value = SeatingMode> {
    prop_oneof![
        Just(SeatingMode::Dense),
        Just(SeatingMode::Sparse),
        Just(SeatingMode::Mixed),
    ]
}

proptest! {
    #[test]
    fn adjusted_capacity_matches_formula(base in 0u32..1_000, buffer in 0u32..1_000) {
        let adjusted = adjusted_capacity(base, buffer);
        prop_assert!(adjusted >= 1);
        prop_assert_eq!(i64::from(adjusted), (i64::from(base) - i64::from(buffer)).max(1));
    }

    #[test]
    fn no_roll_is_duplicated_or_invented(
        caps in arb_rooms(),
        sizes in arb_roster_sizes(),
        buffer in 0u32..10,
        mode in arb_mode(),
    ) {
        let caps: RoomCapacities = caps
            .iter()
            .enumerate()
            .map(|(i, cap)| (RoomId::new(format!("R{i}")).unwrap(), *cap))
            .collect();
        let input: SubjectRolls = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let code = format!("S{i}");
                let rolls = roster(&code, *size);
                (SubjectCode::new(code).unwrap(), rolls)
            })
            .collect();

        let result = allocator(buffer, mode).allocate(&input, &caps);

        for (code, rolls) in input.iter() {
            let placed: Vec<&RollId> = result
                .allocation
                .subject(code)
                .unwrap()
                .values()
                .flatten()
                .collect();
            prop_assert!(placed.len() <= rolls.len());
            prop_assert!(placed.iter().all(|roll| rolls.contains(roll)));
            let unplaced = result
                .deficiencies
                .iter()
                .find(|d| &d.subject == code)
                .map_or(0, |d| d.count());
            prop_assert_eq!(placed.len() + unplaced, rolls.len());
        }

        for (id, base) in caps.iter() {
            let left = result.seats_left.get(id).unwrap();
            let used = u32::try_from(result.allocation.room_total(id)).unwrap();
            prop_assert_eq!(left + used, adjusted_capacity(base, buffer));
        }
    }
}
