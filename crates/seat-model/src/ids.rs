//! String identifiers for students, subjects and rooms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Student roll number, unique within a subject roster.
    RollId,
    "roll number"
);

string_id!(
    /// Course code of one exam paper.
    SubjectCode,
    "subject code"
);

string_id!(
    /// Physical exam room.
    RoomId,
    "room id"
);

/// Key used when an allocation arrives without subject or room identity.
pub const MIXED_KEY: &str = "MIXED";

impl SubjectCode {
    /// Fallback subject for allocations that lost subject identity.
    pub fn mixed() -> Self {
        Self(MIXED_KEY.to_string())
    }
}

impl RoomId {
    /// Fallback room for roll lists that arrive without a room.
    pub fn mixed() -> Self {
        Self(MIXED_KEY.to_string())
    }
}
