//! Coerce allocation values into the canonical `subject -> room -> rolls` shape.
//!
//! Allocations may arrive from older allocators or hand-edited dumps in a few
//! tolerated layouts. Each layout has one [`ShapeDecoder`]; decoders are tried
//! in a fixed priority order and the first one that recognises the value owns
//! the decode, success or failure.
//!
//! # Tolerated shapes
//!
//! 1. **Nested mapping** `{subject: {room: [rolls]}}`. A `null` subject becomes
//!    an empty room map; a bare roll list is filed under room `MIXED`.
//! 2. **Flat room mapping** `{room: [rolls]}`, filed under subject `MIXED`.
//! 3. **Tuple sequence** `[[room, rolls]]` or `[[subject, room, rolls]]`.
//! 4. **Record sequence** `[{subject, room, rolls}]`, or single-pair records
//!    `[{room: rolls}]`.
//!
//! Repeated subject/room pairs in sequences are concatenated in order.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use seat_model::{Allocation, MIXED_KEY, RollId, RoomId, ShapeError, SubjectCode};

/// One recognised allocation layout.
pub trait ShapeDecoder: Send + Sync {
    /// Human-readable name for this shape (for logging/debugging).
    fn shape_name(&self) -> &str;

    /// Whether `raw` has this decoder's layout.
    fn matches(&self, raw: &Value) -> bool;

    /// Decode `raw` into a canonical allocation.
    fn decode(&self, raw: &Value) -> Result<Allocation, ShapeError>;
}

/// Ordered set of shape decoders.
pub struct AllocationNormalizer {
    decoders: Vec<Box<dyn ShapeDecoder>>,
}

impl Default for AllocationNormalizer {
    fn default() -> Self {
        Self::new()
            .add_decoder(Box::new(NestedMappingDecoder))
            .add_decoder(Box::new(FlatRoomDecoder))
            .add_decoder(Box::new(TupleSequenceDecoder))
            .add_decoder(Box::new(RecordSequenceDecoder))
    }
}

impl AllocationNormalizer {
    /// Create a normalizer with no decoders.
    pub fn new() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Add a decoder after the existing ones.
    pub fn add_decoder(mut self, decoder: Box<dyn ShapeDecoder>) -> Self {
        self.decoders.push(decoder);
        self
    }

    pub fn shape_names(&self) -> Vec<&str> {
        self.decoders.iter().map(|d| d.shape_name()).collect()
    }

    /// Normalize `raw` with the first matching decoder.
    ///
    /// An empty sequence is an empty allocation.
    pub fn normalize(&self, raw: &Value) -> Result<Allocation, ShapeError> {
        if matches!(raw, Value::Array(items) if items.is_empty()) {
            return Ok(Allocation::new());
        }
        for decoder in &self.decoders {
            if decoder.matches(raw) {
                debug!(shape = decoder.shape_name(), "normalizing allocation");
                return decoder.decode(raw);
            }
        }
        Err(ShapeError::unsupported(describe(raw)))
    }
}

/// Normalize with the default decoder order.
pub fn normalize_allocation(raw: &Value) -> Result<Allocation, ShapeError> {
    AllocationNormalizer::default().normalize(raw)
}

/// `{subject: {room: [rolls]}}`.
pub struct NestedMappingDecoder;

impl ShapeDecoder for NestedMappingDecoder {
    fn shape_name(&self) -> &str {
        "nested mapping"
    }

    fn matches(&self, raw: &Value) -> bool {
        match raw {
            Value::Object(map) => match map.values().next() {
                None => true,
                Some(first) => first.is_object() || first.is_null(),
            },
            _ => false,
        }
    }

    fn decode(&self, raw: &Value) -> Result<Allocation, ShapeError> {
        let map = expect_object(raw)?;
        let mut allocation = Allocation::new();
        for (subject, rooms) in map {
            let code = subject_code(subject, "*")?;
            match rooms {
                Value::Null => {
                    allocation.ensure_subject(code);
                }
                Value::Array(_) => {
                    let rolls = decode_rolls(rooms, subject, MIXED_KEY)?;
                    allocation.assign(code, RoomId::mixed(), rolls);
                }
                Value::Object(room_map) => {
                    allocation.ensure_subject(code.clone());
                    for (room, rolls) in room_map {
                        let rolls = decode_rolls(rolls, subject, room)?;
                        allocation.assign(code.clone(), room_id(subject, room)?, rolls);
                    }
                }
                other => {
                    return Err(ShapeError::type_mismatch(
                        subject.as_str(),
                        "*",
                        "mapping of rooms",
                        kind(other),
                    ));
                }
            }
        }
        Ok(allocation)
    }
}

/// `{room: [rolls]}`; subject identity is lost.
pub struct FlatRoomDecoder;

impl ShapeDecoder for FlatRoomDecoder {
    fn shape_name(&self) -> &str {
        "flat room mapping"
    }

    fn matches(&self, raw: &Value) -> bool {
        match raw {
            Value::Object(map) => map.values().next().is_some_and(Value::is_array),
            _ => false,
        }
    }

    fn decode(&self, raw: &Value) -> Result<Allocation, ShapeError> {
        let map = expect_object(raw)?;
        warn!(
            rooms = map.len(),
            "allocation is a flat room mapping; filing rolls under subject {MIXED_KEY}"
        );
        let mut allocation = Allocation::new();
        for (room, rolls) in map {
            let rolls = decode_rolls(rolls, MIXED_KEY, room)?;
            allocation.assign(SubjectCode::mixed(), room_id(MIXED_KEY, room)?, rolls);
        }
        Ok(allocation)
    }
}

/// `[[room, rolls]]` or `[[subject, room, rolls]]`.
pub struct TupleSequenceDecoder;

impl ShapeDecoder for TupleSequenceDecoder {
    fn shape_name(&self) -> &str {
        "tuple sequence"
    }

    fn matches(&self, raw: &Value) -> bool {
        match raw {
            Value::Array(items) => items
                .first()
                .and_then(Value::as_array)
                .is_some_and(|tuple| (2..=3).contains(&tuple.len())),
            _ => false,
        }
    }

    fn decode(&self, raw: &Value) -> Result<Allocation, ShapeError> {
        let items = expect_array(raw)?;
        let mut allocation = Allocation::new();
        for item in items {
            let (subject, room, rolls) = match item.as_array().map(Vec::as_slice) {
                Some([subject, room, rolls]) => (
                    key_text(subject, MIXED_KEY, "?", "subject code")?,
                    room,
                    rolls,
                ),
                Some([room, rolls]) => (MIXED_KEY.to_string(), room, rolls),
                _ => {
                    return Err(ShapeError::type_mismatch(
                        MIXED_KEY,
                        "?",
                        "2- or 3-element tuple",
                        kind(item),
                    ));
                }
            };
            let room = key_text(room, &subject, "?", "room id")?;
            let rolls = decode_rolls(rolls, &subject, &room)?;
            allocation.assign(subject_code(&subject, &room)?, room_id(&subject, &room)?, rolls);
        }
        Ok(allocation)
    }
}

/// `[{subject, room, rolls}]` records.
///
/// Subject comes from `subject` or `subj` (default `MIXED`), rolls from
/// `rolls` or `roll`. A record without room or rolls may still be a single
/// `{room: rolls}` pair.
pub struct RecordSequenceDecoder;

impl ShapeDecoder for RecordSequenceDecoder {
    fn shape_name(&self) -> &str {
        "record sequence"
    }

    fn matches(&self, raw: &Value) -> bool {
        match raw {
            Value::Array(items) => items.first().is_some_and(Value::is_object),
            _ => false,
        }
    }

    fn decode(&self, raw: &Value) -> Result<Allocation, ShapeError> {
        let items = expect_array(raw)?;
        let mut allocation = Allocation::new();
        for item in items {
            let Value::Object(record) = item else {
                return Err(ShapeError::type_mismatch(
                    MIXED_KEY,
                    "?",
                    "allocation record",
                    kind(item),
                ));
            };
            let subject = first_present(record, &["subject", "subj"])
                .and_then(scalar_text)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| MIXED_KEY.to_string());

            let (room, rolls) = match (
                first_present(record, &["room"]),
                first_present(record, &["rolls", "roll"]),
            ) {
                (Some(room), Some(rolls)) => (key_text(room, &subject, "?", "room id")?, rolls),
                _ => match record.iter().next() {
                    Some((room, rolls)) if record.len() == 1 => (room.clone(), rolls),
                    _ => {
                        return Err(ShapeError::type_mismatch(
                            subject,
                            "?",
                            "record with room and rolls",
                            "mapping",
                        ));
                    }
                },
            };
            let rolls = decode_rolls(rolls, &subject, &room)?;
            allocation.assign(subject_code(&subject, &room)?, room_id(&subject, &room)?, rolls);
        }
        Ok(allocation)
    }
}

fn expect_object(raw: &Value) -> Result<&Map<String, Value>, ShapeError> {
    raw.as_object()
        .ok_or_else(|| ShapeError::unsupported(describe(raw)))
}

fn expect_array(raw: &Value) -> Result<&Vec<Value>, ShapeError> {
    raw.as_array()
        .ok_or_else(|| ShapeError::unsupported(describe(raw)))
}

fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn decode_rolls(value: &Value, subject: &str, room: &str) -> Result<Vec<RollId>, ShapeError> {
    let Value::Array(items) = value else {
        return Err(ShapeError::type_mismatch(
            subject,
            room,
            "list of rolls",
            kind(value),
        ));
    };
    items
        .iter()
        .map(|item| {
            let text = scalar_text(item).ok_or_else(|| {
                ShapeError::type_mismatch(subject, room, "roll number", kind(item))
            })?;
            RollId::new(text)
                .map_err(|_| ShapeError::type_mismatch(subject, room, "roll number", "blank string"))
        })
        .collect()
}

fn key_text(
    value: &Value,
    subject: &str,
    room: &str,
    expected: &'static str,
) -> Result<String, ShapeError> {
    scalar_text(value).ok_or_else(|| ShapeError::type_mismatch(subject, room, expected, kind(value)))
}

fn subject_code(subject: &str, room: &str) -> Result<SubjectCode, ShapeError> {
    SubjectCode::new(subject)
        .map_err(|_| ShapeError::type_mismatch(subject, room, "subject code", "blank string"))
}

fn room_id(subject: &str, room: &str) -> Result<RoomId, ShapeError> {
    RoomId::new(room).map_err(|_| ShapeError::type_mismatch(subject, room, "room id", "blank string"))
}

/// Strings and integers are accepted as identifiers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Some(number.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Object(map) => match map.values().next() {
            Some(first) => format!("mapping of {}", kind(first)),
            None => "mapping".to_string(),
        },
        Value::Array(items) => match items.first() {
            Some(first) => format!("list of {}", kind(first)),
            None => "list".to_string(),
        },
        other => kind(other).to_string(),
    }
}
