/*
[INPUT]:  JSON fixtures for shaped orders and paged lists
[OUTPUT]: Test results for the decode core
[POS]:    Integration tests - decode layer end to end
[UPDATE]: When decode semantics change
*/

mod common;

use binance_adapter::{
    ModelError, OrderStatus, OrderType, PagedRowList, RawRecord, ResponseShape, Side,
    SpotOrderResponse, TimeInForce, decode::decode_value,
};
use common::{ack_record, result_record};
use rust_decimal::Decimal;
use serde_json::json;

fn dec(raw: &str) -> Decimal {
    raw.parse().expect("decimal literal")
}

#[test]
fn test_ack_level_exposes_only_identity() {
    let value = ack_record();
    let record = RawRecord::from_value(&value).expect("object");

    let response = SpotOrderResponse::resolve(&record, ResponseShape::Ack).expect("ack decode");
    let ack = response.ack();

    assert_eq!(ack.symbol, "BTCUSDT");
    assert_eq!(ack.order_id, 1);
    assert_eq!(ack.order_list_id, -1);
    assert_eq!(ack.client_order_id, "abc");
    assert_eq!(ack.transact_time, 1000);
    assert!(response.result().is_none());

    let serialized = serde_json::to_value(&response).expect("serialize");
    assert!(serialized["response"].get("price").is_none());
}

#[test]
fn test_result_level_adds_order_state() {
    let value = result_record();
    let record = RawRecord::from_value(&value).expect("object");

    let response = SpotOrderResponse::resolve(&record, ResponseShape::Result).expect("result decode");
    let result = response.result().expect("result shape");

    assert_eq!(response.ack().client_order_id, "abc");
    assert_eq!(result.details.price, dec("10.5"));
    assert_eq!(result.details.orig_qty, dec("2"));
    assert_eq!(result.details.executed_qty, dec("1"));
    assert_eq!(result.details.cummulative_quote_qty, dec("10.5"));
    assert_eq!(result.details.status, OrderStatus::Filled);
    assert_eq!(result.details.time_in_force, TimeInForce::Gtc);
    assert_eq!(result.details.order_type, OrderType::Limit);
    assert_eq!(result.details.side, Side::Buy);
}

#[test]
fn test_every_shape_agrees_on_lower_fields() {
    let mut value = result_record();
    value["fills"] = json!([{ "price": "10.5", "qty": "1", "commission": "0.001", "commissionAsset": "BNB", "tradeId": 9 }]);
    let record = RawRecord::from_value(&value).expect("object");

    let ack = SpotOrderResponse::resolve(&record, ResponseShape::Ack).expect("ack");
    let result = SpotOrderResponse::resolve(&record, ResponseShape::Result).expect("result");
    let full = SpotOrderResponse::resolve(&record, ResponseShape::Full).expect("full");

    assert_eq!(ack.ack(), result.ack());
    assert_eq!(result.ack(), full.ack());
    assert_eq!(result.result(), full.result());
    assert_eq!(full.full().map(|f| f.fills.len()), Some(1));
}

#[test]
fn test_unknown_status_fails_whole_decode() {
    let mut value = result_record();
    value["status"] = json!("filled");
    let record = RawRecord::from_value(&value).expect("object");

    let err = SpotOrderResponse::resolve(&record, ResponseShape::Result).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownEnumValue {
            field: "status",
            value: "filled".to_string(),
        }
    );
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: i64,
}

impl binance_adapter::Decode for Row {
    fn decode(record: &RawRecord<'_>) -> binance_adapter::DecodeResult<Self> {
        Ok(Self {
            id: record.mandatory_i64("id")?,
        })
    }
}

#[test]
fn test_paged_list_trusts_reported_total() {
    let value = json!({ "total": 5, "rows": [{ "id": 1 }, { "id": 2 }] });

    let list: PagedRowList<Row> = decode_value(&value).expect("list decode");

    assert_eq!(list.total(), 5);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_paged_list_insert_is_idempotent_and_remove_decrements() {
    let value = json!({ "total": 2, "rows": [{ "id": 1 }, { "id": 2 }] });
    let mut list: PagedRowList<Row> = decode_value(&value).expect("list decode");

    assert!(!list.insert(Row { id: 1 }));
    assert_eq!(list.total(), 2);
    assert_eq!(list.len(), 2);

    assert!(list.remove(&Row { id: 2 }));
    assert_eq!(list.total(), 1);
    assert_eq!(list.len(), 1);
}
