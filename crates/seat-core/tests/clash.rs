//! Tests for same-session clash detection.

use std::collections::BTreeSet;

use seat_core::check_clashes;
use seat_model::{RollId, SubjectCode, SubjectRolls};

fn code(value: &str) -> SubjectCode {
    SubjectCode::new(value).unwrap()
}

fn rolls(values: &[&str]) -> Vec<RollId> {
    values.iter().map(|v| RollId::new(*v).unwrap()).collect()
}

fn rosters(entries: &[(&str, &str)]) -> SubjectRolls {
    entries
        .iter()
        .map(|(subject, values)| {
            let values: Vec<&str> = values.split_whitespace().collect();
            (code(subject), rolls(&values))
        })
        .collect()
}

#[test]
fn reports_exact_shared_rolls() {
    let subjects = vec![code("CS249"), code("MM304")];
    let rosters = rosters(&[
        ("CS249", "1401AI01 1401AI02 1401AI03"),
        ("MM304", "1401AI03 1401AI02 1401CS99"),
    ]);

    let clash = check_clashes(&subjects, &rosters).unwrap();
    assert_eq!(clash.subject1, code("CS249"));
    assert_eq!(clash.subject2, code("MM304"));
    let expected: BTreeSet<RollId> = rolls(&["1401AI02", "1401AI03"]).into_iter().collect();
    assert_eq!(clash.roll_numbers, expected);
    assert_eq!(
        clash.to_string(),
        "CS249 and MM304 share 2 student(s): 1401AI02, 1401AI03"
    );
}

#[test]
fn first_pair_in_slot_order_wins() {
    // (B, C) overlaps more, but (A, C) is visited first
    let subjects = vec![code("A"), code("B"), code("C")];
    let rosters = rosters(&[
        ("A", "1"),
        ("B", "2 3 4"),
        ("C", "1 2 3 4"),
    ]);

    let clash = check_clashes(&subjects, &rosters).unwrap();
    assert_eq!(clash.subject1, code("A"));
    assert_eq!(clash.subject2, code("C"));
    assert_eq!(clash.roll_numbers.len(), 1);
}

#[test]
fn slot_order_not_roster_order_decides() {
    let subjects = vec![code("B"), code("A")];
    let rosters = rosters(&[("A", "1"), ("B", "1")]);

    let clash = check_clashes(&subjects, &rosters).unwrap();
    assert_eq!(clash.subject1, code("B"));
    assert_eq!(clash.subject2, code("A"));
}

#[test]
fn pairwise_disjoint_rosters_pass() {
    let subjects = vec![code("A"), code("B"), code("C")];
    let rosters = rosters(&[("A", "1 2"), ("B", "3"), ("C", "4 5")]);
    assert!(check_clashes(&subjects, &rosters).is_none());
}

#[test]
fn empty_slot_has_no_clash() {
    assert!(check_clashes(&[], &SubjectRolls::new()).is_none());
}
