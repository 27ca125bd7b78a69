/*
[INPUT]:  Field lookups, enum matches, rounding and list access failures
[OUTPUT]: Typed model errors naming the offending field or value
[POS]:    Decode layer - error taxonomy for record decoding and row lists
[UPDATE]: When adding new decode failure modes
*/

use thiserror::Error;

/// Errors raised while decoding records or accessing decoded values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A field required for the entity's identity is absent
    #[error("missing mandatory field `{field}`")]
    MissingMandatoryField { field: &'static str },

    /// An enum-typed field holds a value that is not a declared member
    #[error("unknown value `{value}` for enum field `{field}`")]
    UnknownEnumValue { field: &'static str, value: String },

    /// A field is present but has the wrong JSON type or cannot be parsed
    #[error("invalid value for field `{field}`: {value}")]
    InvalidFieldValue { field: &'static str, value: String },

    /// The payload is not the JSON shape the decoder expects
    #[error("unexpected payload shape, expected {expected}")]
    UnexpectedShape { expected: &'static str },

    /// A rounding accessor was called with a negative digit count
    #[error("invalid rounding digits: {digits}")]
    InvalidRoundingDigits { digits: i32 },

    /// Row list accessed past its end
    #[error("row index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for decode operations
pub type DecodeResult<T> = std::result::Result<T, ModelError>;
