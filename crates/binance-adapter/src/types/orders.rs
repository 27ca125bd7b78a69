/*
[INPUT]:  Raw order-placement responses (spot and margin)
[OUTPUT]: ACK / RESULT / FULL shaped order records built by composition
[POS]:    Data layer - shaped order response types
[UPDATE]: When Binance adds fields to an order response level
*/

use rust_decimal::Decimal;
use serde::Serialize;

use crate::decode::{Decode, DecodeResult, Layered, OrderResponse, RawRecord, round_to};

use super::enums::{OrderStatus, OrderType, SelfTradePreventionMode, Side, TimeInForce};

/// Order list id Binance reports for orders outside any order list
pub const NO_ORDER_LIST: i64 = -1;

/// Spot order response at any shape level
pub type SpotOrderResponse = OrderResponse<OrderAck, OrderResult, OrderFull>;

/// Margin order response at any shape level
pub type MarginOrderResponse = OrderResponse<MarginOrderAck, MarginOrderResult, MarginOrderFull>;

/// Spot ACK: identifies the accepted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub symbol: String,
    pub order_id: i64,
    pub order_list_id: i64,
    pub client_order_id: String,
    pub transact_time: i64,
}

impl Decode for OrderAck {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            symbol: record.mandatory_str("symbol")?,
            order_id: record.mandatory_i64("orderId")?,
            order_list_id: record.i64_or("orderListId", NO_ORDER_LIST)?,
            client_order_id: record.str_or_empty("clientOrderId")?,
            transact_time: record.i64_or_zero("transactTime")?,
        })
    }
}

/// Order state fields shared by every RESULT-level response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_quote_order_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    pub working_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_trade_prevention_mode: Option<SelfTradePreventionMode>,
}

impl Decode for OrderDetails {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            price: record.decimal_or_zero("price")?,
            orig_qty: record.decimal_or_zero("origQty")?,
            executed_qty: record.decimal_or_zero("executedQty")?,
            orig_quote_order_qty: record.decimal_or_zero("origQuoteOrderQty")?,
            cummulative_quote_qty: record.decimal_or_zero("cummulativeQuoteQty")?,
            status: record.enum_field("status")?,
            time_in_force: record.enum_field("timeInForce")?,
            order_type: record.enum_field("type")?,
            side: record.enum_field("side")?,
            working_time: record.i64_or_zero("workingTime")?,
            self_trade_prevention_mode: record.opt_enum("selfTradePreventionMode")?,
        })
    }
}

impl OrderDetails {
    pub fn price_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.price, digits)
    }

    pub fn orig_qty_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.orig_qty, digits)
    }

    pub fn executed_qty_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.executed_qty, digits)
    }

    pub fn cummulative_quote_qty_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.cummulative_quote_qty, digits)
    }

    /// Average fill price, or `None` before anything executed
    pub fn average_price(&self) -> Option<Decimal> {
        if self.executed_qty.is_zero() {
            return None;
        }
        self.cummulative_quote_qty.checked_div(self.executed_qty)
    }

    /// Quantity still open on the book
    pub fn remaining_qty(&self) -> Decimal {
        (self.orig_qty - self.executed_qty).max(Decimal::ZERO)
    }
}

/// Spot RESULT: the ACK plus order state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderResult {
    #[serde(flatten)]
    pub ack: OrderAck,
    #[serde(flatten)]
    pub details: OrderDetails,
}

impl Decode for OrderResult {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            ack: OrderAck::decode(record)?,
            details: OrderDetails::decode(record)?,
        })
    }
}

impl Layered for OrderResult {
    type Lower = OrderAck;

    fn lower(&self) -> &OrderAck {
        &self.ack
    }
}

/// One execution reported in a FULL response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    pub commission_asset: String,
    pub trade_id: i64,
}

impl Decode for OrderFill {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            price: record.decimal_or_zero("price")?,
            qty: record.decimal_or_zero("qty")?,
            commission: record.decimal_or_zero("commission")?,
            commission_asset: record.str_or_empty("commissionAsset")?,
            trade_id: record.i64_or_zero("tradeId")?,
        })
    }
}

fn decode_fills(record: &RawRecord<'_>) -> DecodeResult<Vec<OrderFill>> {
    record.records("fills", OrderFill::decode)
}

/// Spot FULL: the RESULT plus its fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderFull {
    #[serde(flatten)]
    pub result: OrderResult,
    pub fills: Vec<OrderFill>,
}

impl Decode for OrderFull {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            result: OrderResult::decode(record)?,
            fills: decode_fills(record)?,
        })
    }
}

impl Layered for OrderFull {
    type Lower = OrderResult;

    fn lower(&self) -> &OrderResult {
        &self.result
    }
}

impl OrderFull {
    /// Commission paid per asset, in order of first appearance
    pub fn commission_by_asset(&self) -> Vec<(String, Decimal)> {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        for fill in &self.fills {
            match totals
                .iter_mut()
                .find(|(asset, _)| *asset == fill.commission_asset)
            {
                Some((_, total)) => *total += fill.commission,
                None => totals.push((fill.commission_asset.clone(), fill.commission)),
            }
        }
        totals
    }
}

/// Margin ACK; margin responses carry no order list id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOrderAck {
    pub symbol: String,
    pub order_id: i64,
    pub client_order_id: String,
    pub is_isolated: bool,
    pub transact_time: i64,
}

impl Decode for MarginOrderAck {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            symbol: record.mandatory_str("symbol")?,
            order_id: record.mandatory_i64("orderId")?,
            client_order_id: record.str_or_empty("clientOrderId")?,
            is_isolated: record.bool_or_false("isIsolated")?,
            transact_time: record.i64_or_zero("transactTime")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarginOrderResult {
    #[serde(flatten)]
    pub ack: MarginOrderAck,
    #[serde(flatten)]
    pub details: OrderDetails,
}

impl Decode for MarginOrderResult {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            ack: MarginOrderAck::decode(record)?,
            details: OrderDetails::decode(record)?,
        })
    }
}

impl Layered for MarginOrderResult {
    type Lower = MarginOrderAck;

    fn lower(&self) -> &MarginOrderAck {
        &self.ack
    }
}

/// Margin FULL: adds the automatic borrow made for `MARGIN_BUY` orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginOrderFull {
    #[serde(flatten)]
    pub result: MarginOrderResult,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_buy_borrow_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_buy_borrow_asset: Option<String>,
    pub fills: Vec<OrderFill>,
}

impl Decode for MarginOrderFull {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            result: MarginOrderResult::decode(record)?,
            margin_buy_borrow_amount: record.decimal_or_zero("marginBuyBorrowAmount")?,
            margin_buy_borrow_asset: record.opt_str("marginBuyBorrowAsset")?,
            fills: decode_fills(record)?,
        })
    }
}

impl Layered for MarginOrderFull {
    type Lower = MarginOrderResult;

    fn lower(&self) -> &MarginOrderResult {
        &self.result
    }
}
