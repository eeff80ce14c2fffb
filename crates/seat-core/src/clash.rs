//! Same-session clash detection.

use std::collections::BTreeSet;

use seat_model::{Clash, RollId, SubjectCode, SubjectRolls};

/// Find the first pair of subjects in `subjects` whose rosters overlap.
///
/// Pairs are visited as `(i, j)` with `i < j` in slot order, so the result is
/// the first offending pair, not the pair with the largest overlap. A subject
/// with no roster in `rosters` counts as empty.
pub fn check_clashes(subjects: &[SubjectCode], rosters: &SubjectRolls) -> Option<Clash> {
    let sets: Vec<BTreeSet<&RollId>> = subjects
        .iter()
        .map(|subject| {
            rosters
                .get(subject)
                .map(|rolls| rolls.iter().collect::<BTreeSet<_>>())
                .unwrap_or_default()
        })
        .collect();

    for i in 0..subjects.len() {
        for j in (i + 1)..subjects.len() {
            let shared: BTreeSet<RollId> = sets[i]
                .intersection(&sets[j])
                .map(|roll| (*roll).clone())
                .collect();
            if !shared.is_empty() {
                return Some(Clash {
                    subject1: subjects[i].clone(),
                    subject2: subjects[j].clone(),
                    roll_numbers: shared,
                });
            }
        }
    }
    None
}
