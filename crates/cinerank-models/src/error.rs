use thiserror::Error;

/// Caller-side validation failures for a [`MovieRecord`](crate::MovieRecord).
///
/// The engines never return these; they are for the layer that owns the
/// records and wants to reject bad input before it reaches the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record {id}: priority {value} is outside 1-5")]
    PriorityOutOfRange { id: String, value: u8 },

    #[error("record {id}: fun {value} is outside 1-5")]
    FunOutOfRange { id: String, value: u8 },

    #[error("record {id}: watched without a watch date")]
    MissingWatchDate { id: String },

    #[error("record {id}: queued record carries a watch date")]
    UnexpectedWatchDate { id: String },
}

/// Returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
