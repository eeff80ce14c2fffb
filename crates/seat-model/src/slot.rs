use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{SessionLabel, SubjectCode};

/// One timetable unit: a date and session with the papers sat in it.
///
/// Each slot gets its own room pool; nothing carries over between slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSlot {
    pub date: String,
    pub session: SessionLabel,
    pub subjects: Vec<SubjectCode>,
}

impl SessionSlot {
    pub fn new(date: impl Into<String>, session: SessionLabel, subjects: Vec<SubjectCode>) -> Self {
        Self {
            date: date.into(),
            session,
            subjects,
        }
    }
}

impl fmt::Display for SessionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.date, self.session)
    }
}
