/*
[INPUT]:  Fully received response body and the caller's format choice
[OUTPUT]: Raw text, parsed JSON, or a decoded entity
[POS]:    Decode layer - format selection shared by every endpoint wrapper
[UPDATE]: When adding new output formats
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// What an endpoint call hands back to the caller
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseFormat {
    /// The body exactly as received
    RawString,
    /// The body parsed into JSON but not decoded
    RawJson,
    /// A decoded entity or row list
    #[default]
    Decoded,
}

/// Endpoint output in the format the caller selected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedResponse<T> {
    RawText(String),
    RawJson(Value),
    Decoded(T),
}

impl<T> FormattedResponse<T> {
    /// Shape `body` per `format`; `decode` only runs for `Decoded`
    pub fn from_body<E, D>(body: String, format: ResponseFormat, decode: D) -> Result<Self, E>
    where
        E: From<serde_json::Error>,
        D: FnOnce(&Value) -> Result<T, E>,
    {
        match format {
            ResponseFormat::RawString => Ok(Self::RawText(body)),
            ResponseFormat::RawJson => Ok(Self::RawJson(serde_json::from_str(&body)?)),
            ResponseFormat::Decoded => {
                let value: Value = serde_json::from_str(&body)?;
                decode(&value).map(Self::Decoded)
            }
        }
    }

    pub fn format(&self) -> ResponseFormat {
        match self {
            Self::RawText(_) => ResponseFormat::RawString,
            Self::RawJson(_) => ResponseFormat::RawJson,
            Self::Decoded(_) => ResponseFormat::Decoded,
        }
    }

    pub fn as_decoded(&self) -> Option<&T> {
        match self {
            Self::Decoded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_decoded(self) -> Option<T> {
        match self {
            Self::Decoded(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_raw_text(&self) -> Option<&str> {
        match self {
            Self::RawText(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_raw_json(&self) -> Option<&Value> {
        match self {
            Self::RawJson(value) => Some(value),
            _ => None,
        }
    }

    /// Map the decoded value, leaving raw variants untouched
    pub fn map<U, M>(self, f: M) -> FormattedResponse<U>
    where
        M: FnOnce(T) -> U,
    {
        match self {
            Self::RawText(text) => FormattedResponse::RawText(text),
            Self::RawJson(value) => FormattedResponse::RawJson(value),
            Self::Decoded(value) => FormattedResponse::Decoded(f(value)),
        }
    }
}
