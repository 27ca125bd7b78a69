/*
[INPUT]:  Caller order parameters and history filters
[OUTPUT]: Typed request structs serialized into Binance query strings
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When Binance adds request parameters or new endpoints
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BorrowRepayType, OrderType, SelfTradePreventionMode, Side, SideEffectType, TimeInForce};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_order_qty: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_trade_prevention_mode: Option<SelfTradePreventionMode>,
}

impl NewOrderRequest {
    /// GTC limit order with a generated client order id
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            time_in_force: Some(TimeInForce::Gtc),
            quantity: Some(quantity),
            quote_order_qty: None,
            price: Some(price),
            stop_price: None,
            new_client_order_id: Some(client_order_id()),
            self_trade_prevention_mode: None,
        }
    }

    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            time_in_force: None,
            quantity: Some(quantity),
            quote_order_qty: None,
            price: None,
            stop_price: None,
            new_client_order_id: Some(client_order_id()),
            self_trade_prevention_mode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOrderRequest {
    #[serde(flatten)]
    pub order: NewOrderRequest,
    /// Sent as the strings `"TRUE"` / `"FALSE"`
    #[serde(with = "upper_bool")]
    pub is_isolated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_effect_type: Option<SideEffectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_repay_at_cancel: Option<bool>,
}

impl MarginOrderRequest {
    pub fn cross(order: NewOrderRequest) -> Self {
        Self {
            order,
            is_isolated: false,
            side_effect_type: None,
            auto_repay_at_cancel: None,
        }
    }

    pub fn isolated(order: NewOrderRequest) -> Self {
        Self {
            is_isolated: true,
            ..Self::cross(order)
        }
    }

    pub fn with_side_effect(mut self, side_effect_type: SideEffectType) -> Self {
        self.side_effect_type = Some(side_effect_type);
        self
    }
}

/// Filters for borrow/repay history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRepayQuery {
    #[serde(rename = "type")]
    pub kind: BorrowRepayType,
    #[serde(flatten)]
    pub history: HistoryQuery,
}

/// Paging and time-window filters shared by margin history endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// 1-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl HistoryQuery {
    pub fn for_asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, current: u32, size: u32) -> Self {
        self.current = Some(current);
        self.size = Some(size);
        self
    }

    pub fn between(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindowQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolQuery {
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingWindowQuery {
    pub symbol: String,
    pub window_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexiblePositionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Fresh client order id, 32 hex chars to stay under Binance's 36-char cap
pub fn client_order_id() -> String {
    Uuid::new_v4().simple().to_string()
}

mod upper_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "TRUE" } else { "FALSE" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.eq_ignore_ascii_case("true"))
    }
}
