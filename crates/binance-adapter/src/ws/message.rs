/*
[INPUT]:  Raw WebSocket text frames from combined streams
[OUTPUT]: Parsed StreamMessage values and decoded event payloads
[POS]:    WebSocket layer - message parsing and validation
[UPDATE]: When adding new message types or changing format
*/

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::decode::{Decode, DecodeResult, RawRecord, decode_value};

/// One frame received from the stream endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamMessage {
    /// Market event wrapped as `{"stream": .., "data": ..}`
    Event { stream: String, data: Value },
    /// Reply to a SUBSCRIBE / UNSUBSCRIBE / LIST_SUBSCRIPTIONS request
    Response { id: u64, result: Value },
    /// Request rejected by the server
    Error { id: Option<u64>, code: i64, msg: String },
    /// Anything else, including bare payloads on raw streams
    Other { raw: Value },
}

impl StreamMessage {
    /// Classify a text frame
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(mut value: Value) -> Self {
        let id = value.get("id").and_then(Value::as_u64);

        if let Some(error) = value.get("error").filter(|error| error.is_object()) {
            return Self::Error {
                id,
                code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
                msg: error
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            };
        }

        if let (Some(id), Some(object)) = (id, value.as_object_mut())
            && object.contains_key("result")
        {
            let result = object.remove("result").unwrap_or(Value::Null);
            return Self::Response { id, result };
        }

        let stream = value
            .get("stream")
            .and_then(Value::as_str)
            .map(str::to_string);
        match stream {
            Some(stream) if value.get("data").is_some() => {
                let data = value.get_mut("data").map(Value::take).unwrap_or_default();
                Self::Event { stream, data }
            }
            _ => Self::Other { raw: value },
        }
    }

    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Event { stream, .. } => Some(stream),
            _ => None,
        }
    }

    /// Decode the payload of an event frame; `None` for any other frame
    pub fn decode_event<T: Decode>(&self) -> Option<DecodeResult<T>> {
        match self {
            Self::Event { data, .. } => Some(decode_value(data)),
            _ => None,
        }
    }
}

/// `<symbol>@miniTicker` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniTickerEvent {
    pub event_time: i64,
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub close_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub open_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_volume: Decimal,
}

impl Decode for MiniTickerEvent {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            event_time: record.i64_or_zero("E")?,
            symbol: record.mandatory_str("s")?,
            close_price: record.decimal_or_zero("c")?,
            open_price: record.decimal_or_zero("o")?,
            high_price: record.decimal_or_zero("h")?,
            low_price: record.decimal_or_zero("l")?,
            volume: record.decimal_or_zero("v")?,
            quote_volume: record.decimal_or_zero("q")?,
        })
    }
}

/// `<symbol>@aggTrade` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggTradeEvent {
    pub event_time: i64,
    pub symbol: String,
    pub agg_trade_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub trade_time: i64,
    pub is_buyer_maker: bool,
}

impl Decode for AggTradeEvent {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            event_time: record.i64_or_zero("E")?,
            symbol: record.mandatory_str("s")?,
            agg_trade_id: record.mandatory_i64("a")?,
            price: record.decimal_or_zero("p")?,
            quantity: record.decimal_or_zero("q")?,
            trade_time: record.i64_or_zero("T")?,
            is_buyer_maker: record.bool_or_false("m")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ModelError;
    use serde_json::json;

    #[test]
    fn test_parse_event_frame() {
        let text = r#"{"stream":"bnbusdt@miniTicker","data":{"e":"24hrMiniTicker","E":1672515782136,"s":"BNBUSDT","c":"0.0025","o":"0.0010","h":"0.0025","l":"0.0010","v":"10000","q":"18"}}"#;
        let message = StreamMessage::parse(text).unwrap();

        assert_eq!(message.stream(), Some("bnbusdt@miniTicker"));
        let ticker: MiniTickerEvent = message.decode_event().unwrap().unwrap();
        assert_eq!(ticker.symbol, "BNBUSDT");
        assert_eq!(ticker.close_price, "0.0025".parse::<Decimal>().unwrap());
        assert_eq!(ticker.event_time, 1_672_515_782_136);
    }

    #[test]
    fn test_parse_subscription_reply() {
        let message = StreamMessage::parse(r#"{"result":null,"id":1}"#).unwrap();
        assert_eq!(
            message,
            StreamMessage::Response {
                id: 1,
                result: Value::Null
            }
        );
        assert!(message.decode_event::<MiniTickerEvent>().is_none());
    }

    #[test]
    fn test_parse_error_reply() {
        let message =
            StreamMessage::parse(r#"{"error":{"code":2,"msg":"Invalid request: unknown variant"},"id":7}"#)
                .unwrap();
        assert_eq!(
            message,
            StreamMessage::Error {
                id: Some(7),
                code: 2,
                msg: "Invalid request: unknown variant".to_string(),
            }
        );
    }

    #[test]
    fn test_raw_payload_is_other() {
        let message = StreamMessage::parse(r#"{"e":"aggTrade","s":"BTCUSDT"}"#).unwrap();
        assert!(matches!(message, StreamMessage::Other { .. }));
    }

    #[test]
    fn test_event_decode_failure_is_reported() {
        let message = StreamMessage::from_value(json!({
            "stream": "btcusdt@aggTrade",
            "data": { "s": "BTCUSDT", "p": "1" }
        }));
        let result = message.decode_event::<AggTradeEvent>().unwrap();
        assert_eq!(result.unwrap_err(), ModelError::MissingMandatoryField { field: "a" });
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(StreamMessage::parse("not json").is_err());
    }
}
