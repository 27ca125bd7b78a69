/*
[INPUT]:  One raw order response record and the requested detail level
[OUTPUT]: OrderResponse holding the ACK, RESULT or FULL shaped record
[POS]:    Decode layer - tiered response-shape resolution
[UPDATE]: When adding shape levels or new shaped response families
*/

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::Decode;
use super::error::DecodeResult;
use super::record::RawRecord;

/// Detail level of an order-placement response, ordered from leanest to richest
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ResponseShape {
    Ack,
    Result,
    #[default]
    Full,
}

/// A shaped record that embeds the next-leaner shape unchanged.
///
/// RESULT records embed their ACK record and FULL records embed their
/// RESULT record, so each level's decode runs exactly once.
pub trait Layered {
    type Lower;

    fn lower(&self) -> &Self::Lower;
}

/// Order response decoded at one of the three shape levels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "response", rename_all = "UPPERCASE")]
pub enum OrderResponse<A, R, F> {
    Ack(A),
    Result(R),
    Full(F),
}

impl<A, R, F> OrderResponse<A, R, F>
where
    A: Decode,
    R: Decode,
    F: Decode,
{
    /// Decode `record` at `shape`
    pub fn resolve(record: &RawRecord<'_>, shape: ResponseShape) -> DecodeResult<Self> {
        let response = match shape {
            ResponseShape::Ack => Self::Ack(A::decode(record)?),
            ResponseShape::Result => Self::Result(R::decode(record)?),
            ResponseShape::Full => Self::Full(F::decode(record)?),
        };
        Ok(response)
    }
}

impl<A, R, F> OrderResponse<A, R, F> {
    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::Ack(_) => ResponseShape::Ack,
            Self::Result(_) => ResponseShape::Result,
            Self::Full(_) => ResponseShape::Full,
        }
    }
}

impl<A, R, F> OrderResponse<A, R, F>
where
    R: Layered<Lower = A>,
    F: Layered<Lower = R>,
{
    /// ACK-level fields, present at every shape
    pub fn ack(&self) -> &A {
        match self {
            Self::Ack(ack) => ack,
            Self::Result(result) => result.lower(),
            Self::Full(full) => full.lower().lower(),
        }
    }

    /// RESULT-level fields, present at RESULT and FULL
    pub fn result(&self) -> Option<&R> {
        match self {
            Self::Ack(_) => None,
            Self::Result(result) => Some(result),
            Self::Full(full) => Some(full.lower()),
        }
    }

    pub fn full(&self) -> Option<&F> {
        match self {
            Self::Full(full) => Some(full),
            _ => None,
        }
    }
}
