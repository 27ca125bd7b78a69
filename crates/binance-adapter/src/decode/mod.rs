/*
[INPUT]:  Parsed JSON response bodies
[OUTPUT]: Decoded entities, shaped order responses and paged row lists
[POS]:    Decode layer - pure decoding from raw records to typed values
[UPDATE]: When adding decode helpers or changing the Decode contract
*/

pub mod error;
pub mod format;
pub mod record;
pub mod rounding;
pub mod rows;
pub mod shape;

use serde_json::Value;

pub use error::{DecodeResult, ModelError};
pub use format::{FormattedResponse, ResponseFormat};
pub use record::RawRecord;
pub use rounding::round_to;
pub use rows::PagedRowList;
pub use shape::{Layered, OrderResponse, ResponseShape};

/// A typed entity decoded from one raw record.
///
/// Decoding is pure: it reads only the record and either returns a fully
/// populated value or fails without producing a partial one.
pub trait Decode: Sized {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self>;
}

/// Decode a JSON object as `T`
pub fn decode_value<T: Decode>(value: &Value) -> DecodeResult<T> {
    RawRecord::from_value(value)?.decode()
}
