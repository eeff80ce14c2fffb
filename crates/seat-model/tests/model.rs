use seat_model::{
    Allocation, Clash, RollId, RollNames, RoomCapacities, RoomId, SeatsLeft, SessionLabel,
    SessionSlot, SubjectCode, SubjectRolls,
};

fn room(value: &str) -> RoomId {
    RoomId::new(value).unwrap()
}

fn subject(value: &str) -> SubjectCode {
    SubjectCode::new(value).unwrap()
}

fn roll(value: &str) -> RollId {
    RollId::new(value).unwrap()
}

#[test]
fn room_capacities_keep_first_position_on_reinsert() {
    let mut rooms = RoomCapacities::new();
    rooms.insert(room("A"), 10);
    rooms.insert(room("B"), 5);
    rooms.insert(room("A"), 12);

    let order: Vec<(&str, u32)> = rooms.iter().map(|(id, cap)| (id.as_str(), cap)).collect();
    assert_eq!(order, vec![("A", 12), ("B", 5)]);
    assert_eq!(rooms.get(&room("B")), Some(5));
    assert_eq!(rooms.total(), 17);
}

#[test]
fn subject_rolls_preserve_order_and_duplicates() {
    let rolls: SubjectRolls = vec![
        (subject("MM304"), vec![roll("2"), roll("2")]),
        (subject("CS249"), vec![roll("1")]),
    ]
    .into_iter()
    .collect();

    let codes: Vec<&str> = rolls.iter().map(|(code, _)| code.as_str()).collect();
    assert_eq!(codes, vec!["MM304", "CS249"]);
    assert_eq!(rolls.get(&subject("MM304")).map(<[RollId]>::len), Some(2));
    assert_eq!(rolls.roll_count(), 3);
}

#[test]
fn by_room_groups_seats_across_subjects() {
    let mut allocation = Allocation::new();
    allocation.assign(subject("CS249"), room("6101"), vec![roll("A1"), roll("A2")]);
    allocation.assign(subject("MM304"), room("6101"), vec![roll("B1")]);
    allocation.assign(subject("MM304"), room("6102"), vec![roll("B2")]);

    let rooms = allocation.by_room();
    let first: Vec<(&str, &str)> = rooms[&room("6101")]
        .iter()
        .map(|seat| (seat.subject.as_str(), seat.roll.as_str()))
        .collect();
    assert_eq!(
        first,
        vec![("CS249", "A1"), ("CS249", "A2"), ("MM304", "B1")]
    );
    assert_eq!(rooms[&room("6102")].len(), 1);
}

#[test]
fn allocation_keeps_assignment_order() {
    let mut allocation = Allocation::new();
    allocation.assign(subject("ZZ9"), room("LT1"), vec![roll("Z1")]);
    allocation.assign(subject("ZZ9"), room("6101"), vec![roll("Z2")]);
    allocation.assign(subject("AA1"), room("6101"), vec![roll("A1")]);

    let json = serde_json::to_string(&allocation).unwrap();
    assert_eq!(
        json,
        r#"{"ZZ9":{"LT1":["Z1"],"6101":["Z2"]},"AA1":{"6101":["A1"]}}"#
    );
    let by_room = allocation.by_room();
    let rooms: Vec<&str> = by_room.keys().map(RoomId::as_str).collect();
    assert_eq!(rooms, vec!["LT1", "6101"]);
}

#[test]
fn seats_left_and_names() {
    let seats: SeatsLeft = vec![(room("A"), 0), (room("B"), 3)].into_iter().collect();
    assert_eq!(seats.get(&room("B")), Some(3));
    assert_eq!(seats.total(), 3);

    let mut names = RollNames::new();
    names.insert(roll("1401AI01"), "Asha Rao");
    assert_eq!(names.name(&roll("1401AI01")), "Asha Rao");
    assert_eq!(names.name(&roll("missing")), "");
}

#[test]
fn clash_display_lists_rolls() {
    let clash = Clash {
        subject1: subject("CS249"),
        subject2: subject("MM304"),
        roll_numbers: [roll("B"), roll("A")].into_iter().collect(),
    };
    assert_eq!(
        clash.to_string(),
        "CS249 and MM304 share 2 student(s): A, B"
    );
}

#[test]
fn session_slot_display() {
    let slot = SessionSlot::new("2025-12-01", SessionLabel::Morning, vec![subject("CS249")]);
    assert_eq!(slot.to_string(), "2025-12-01 / morning");
}
