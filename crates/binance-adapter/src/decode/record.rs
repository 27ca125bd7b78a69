/*
[INPUT]:  One parsed JSON object from a Binance response
[OUTPUT]: Typed field values with defaults, mandatory checks and enum matching
[POS]:    Decode layer - shared field extraction helpers
[UPDATE]: When adding new field kinds or default policies
*/

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::Decode;
use super::error::{DecodeResult, ModelError};

/// Borrowed view over one JSON object awaiting decode.
///
/// `null` values are treated exactly like absent keys, so every
/// defaulting accessor below yields its default for both.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// View a JSON value as a record; fails unless it is an object
    pub fn from_value(value: &'a Value) -> DecodeResult<Self> {
        value
            .as_object()
            .map(Self::new)
            .ok_or(ModelError::UnexpectedShape {
                expected: "JSON object",
            })
    }

    /// Underlying key-value mapping
    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Decode this record as `T`
    pub fn decode<T: Decode>(&self) -> DecodeResult<T> {
        T::decode(self)
    }

    pub fn mandatory_str(&self, field: &'static str) -> DecodeResult<String> {
        let value = self
            .get(field)
            .ok_or(ModelError::MissingMandatoryField { field })?;
        as_string(field, value)
    }

    pub fn mandatory_i64(&self, field: &'static str) -> DecodeResult<i64> {
        let value = self
            .get(field)
            .ok_or(ModelError::MissingMandatoryField { field })?;
        as_i64(field, value)
    }

    pub fn i64_or(&self, field: &'static str, default: i64) -> DecodeResult<i64> {
        match self.get(field) {
            Some(value) => as_i64(field, value),
            None => Ok(default),
        }
    }

    pub fn i64_or_zero(&self, field: &'static str) -> DecodeResult<i64> {
        self.i64_or(field, 0)
    }

    pub fn u64_or_zero(&self, field: &'static str) -> DecodeResult<u64> {
        let value = self.i64_or_zero(field)?;
        u64::try_from(value).map_err(|_| ModelError::InvalidFieldValue {
            field,
            value: value.to_string(),
        })
    }

    /// Decimal from a JSON string or number; absent, null and blank give zero
    pub fn decimal_or_zero(&self, field: &'static str) -> DecodeResult<Decimal> {
        Ok(self.opt_decimal(field)?.unwrap_or(Decimal::ZERO))
    }

    pub fn opt_decimal(&self, field: &'static str) -> DecodeResult<Option<Decimal>> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };

        match value {
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => parse_decimal(field, raw.trim()).map(Some),
            Value::Number(number) => parse_decimal(field, &number.to_string()).map(Some),
            other => Err(invalid(field, other)),
        }
    }

    pub fn bool_or_false(&self, field: &'static str) -> DecodeResult<bool> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(Value::String(raw)) if raw == "true" => Ok(true),
            Some(Value::String(raw)) if raw == "false" => Ok(false),
            Some(other) => Err(invalid(field, other)),
        }
    }

    pub fn str_or_empty(&self, field: &'static str) -> DecodeResult<String> {
        Ok(self.opt_str(field)?.unwrap_or_default())
    }

    pub fn opt_str(&self, field: &'static str) -> DecodeResult<Option<String>> {
        self.get(field).map(|value| as_string(field, value)).transpose()
    }

    /// Required enum field, matched exactly against the declared members
    pub fn enum_field<E: FromStr>(&self, field: &'static str) -> DecodeResult<E> {
        self.opt_enum(field)?
            .ok_or(ModelError::MissingMandatoryField { field })
    }

    pub fn opt_enum<E: FromStr>(&self, field: &'static str) -> DecodeResult<Option<E>> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };
        let raw = value.as_str().ok_or_else(|| invalid(field, value))?;
        raw.parse::<E>()
            .map(Some)
            .map_err(|_| ModelError::UnknownEnumValue {
                field,
                value: raw.to_string(),
            })
    }

    /// Array field; absent or null yields an empty slice
    pub fn array(&self, field: &'static str) -> DecodeResult<&'a [Value]> {
        match self.get(field) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(invalid(field, other)),
        }
    }

    /// Decode every object in an array field with `decoder`
    pub fn records<T, F>(&self, field: &'static str, mut decoder: F) -> DecodeResult<Vec<T>>
    where
        F: FnMut(&RawRecord<'a>) -> DecodeResult<T>,
    {
        self.array(field)?
            .iter()
            .map(|item| RawRecord::from_value(item).and_then(|row| decoder(&row)))
            .collect()
    }

    /// Object field whose values are all decimals, keyed by their labels
    pub fn decimal_map(&self, field: &'static str) -> DecodeResult<BTreeMap<String, Decimal>> {
        let Some(value) = self.get(field) else {
            return Ok(BTreeMap::new());
        };
        let entries = value.as_object().ok_or_else(|| invalid(field, value))?;

        entries
            .iter()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(label, entry)| {
                let raw = match entry {
                    Value::String(raw) => raw.clone(),
                    Value::Number(number) => number.to_string(),
                    other => return Err(invalid(field, other)),
                };
                parse_decimal(field, raw.trim()).map(|parsed| (label.clone(), parsed))
            })
            .collect()
    }

    /// Nested object field decoded as `T`
    pub fn nested<T: Decode>(&self, field: &'static str) -> DecodeResult<T> {
        let value = self
            .get(field)
            .ok_or(ModelError::MissingMandatoryField { field })?;
        RawRecord::from_value(value)?.decode()
    }
}

fn as_string(field: &'static str, value: &Value) -> DecodeResult<String> {
    match value {
        Value::String(raw) => Ok(raw.clone()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(invalid(field, other)),
    }
}

fn as_i64(field: &'static str, value: &Value) -> DecodeResult<i64> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| invalid(field, value)),
        Value::String(raw) => raw.trim().parse::<i64>().map_err(|_| invalid(field, value)),
        other => Err(invalid(field, other)),
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> DecodeResult<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ModelError::InvalidFieldValue {
            field,
            value: raw.to_string(),
        })
}

fn invalid(field: &'static str, value: &Value) -> ModelError {
    ModelError::InvalidFieldValue {
        field,
        value: value.to_string(),
    }
}
