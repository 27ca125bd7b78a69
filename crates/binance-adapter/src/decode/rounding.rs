/*
[INPUT]:  Decoded decimal values and a requested number of decimal digits
[OUTPUT]: Rounded copies of the values
[POS]:    Decode layer - rounding accessors shared by decoded entities
[UPDATE]: When changing the rounding strategy
*/

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{DecodeResult, ModelError};

/// Round half away from zero to `digits` decimal places.
///
/// Returns a copy; the input is never modified.
pub fn round_to(value: Decimal, digits: i32) -> DecodeResult<Decimal> {
    let dp = u32::try_from(digits).map_err(|_| ModelError::InvalidRoundingDigits { digits })?;
    Ok(value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}
