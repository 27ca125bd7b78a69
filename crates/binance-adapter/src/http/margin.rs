/*
[INPUT]:  Margin order requests and history filters
[OUTPUT]: Margin order responses, account snapshots and paged history rows
[POS]:    HTTP layer - cross/isolated margin endpoints (require signed requests)
[UPDATE]: When adding margin endpoints or changing history filters
*/

use reqwest::Method;

use crate::decode::{
    FormattedResponse, OrderResponse, PagedRowList, RawRecord, ResponseFormat, ResponseShape,
    decode_value,
};
use crate::http::client::{ApiFamily, format_body};
use crate::http::trade::ShapedRequest;
use crate::http::{BinanceClient, Result};
use crate::types::{
    BorrowRepayQuery, BorrowRepayRecord, ForceLiquidationRecord, HistoryQuery, InterestRecord,
    MarginAccount, MarginOrderRequest, MarginOrderResponse,
};

impl BinanceClient {
    /// Place a margin order
    ///
    /// POST /sapi/v1/margin/order
    pub async fn new_margin_order(
        &self,
        request: &MarginOrderRequest,
        shape: ResponseShape,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<MarginOrderResponse>> {
        let params = ShapedRequest {
            request,
            new_order_resp_type: shape,
        };
        let body = self
            .send_signed(Method::POST, ApiFamily::Sapi, "/sapi/v1/margin/order", &params)
            .await?;
        format_body(body, format, |value| {
            OrderResponse::resolve(&RawRecord::from_value(value)?, shape)
        })
    }

    /// Cross margin account details
    ///
    /// GET /sapi/v1/margin/account
    pub async fn margin_account(
        &self,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<MarginAccount>> {
        let body = self
            .send_signed(Method::GET, ApiFamily::Sapi, "/sapi/v1/margin/account", &())
            .await?;
        format_body(body, format, decode_value::<MarginAccount>)
    }

    /// Borrow or repay history
    ///
    /// GET /sapi/v1/margin/borrow-repay
    pub async fn borrow_repay_history(
        &self,
        query: &BorrowRepayQuery,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<PagedRowList<BorrowRepayRecord>>> {
        let body = self
            .send_signed(Method::GET, ApiFamily::Sapi, "/sapi/v1/margin/borrow-repay", query)
            .await?;
        format_body(body, format, decode_value::<PagedRowList<BorrowRepayRecord>>)
    }

    /// Interest accrual history
    ///
    /// GET /sapi/v1/margin/interestHistory
    pub async fn interest_history(
        &self,
        query: &HistoryQuery,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<PagedRowList<InterestRecord>>> {
        let body = self
            .send_signed(Method::GET, ApiFamily::Sapi, "/sapi/v1/margin/interestHistory", query)
            .await?;
        format_body(body, format, decode_value::<PagedRowList<InterestRecord>>)
    }

    /// Forced liquidation history
    ///
    /// GET /sapi/v1/margin/forceLiquidationRec
    pub async fn force_liquidation_history(
        &self,
        query: &HistoryQuery,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<PagedRowList<ForceLiquidationRecord>>> {
        let body = self
            .send_signed(
                Method::GET,
                ApiFamily::Sapi,
                "/sapi/v1/margin/forceLiquidationRec",
                query,
            )
            .await?;
        format_body(body, format, decode_value::<PagedRowList<ForceLiquidationRecord>>)
    }
}

#[cfg(test)]
mod tests {
    use crate::decode::{ResponseFormat, ResponseShape};
    use crate::http::{ApiCredentials, BinanceClient, ClientConfig};
    use crate::types::{
        BorrowRepayQuery, BorrowRepayType, HistoryQuery, MarginOrderRequest, NewOrderRequest, Side,
        SideEffectType,
    };
    use rust_decimal::Decimal;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BinanceClient {
        BinanceClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init")
        .with_credentials(ApiCredentials::hmac("key", "secret"))
    }

    #[tokio::test]
    async fn test_margin_order_result_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sapi/v1/margin/order"))
            .and(query_param("isIsolated", "TRUE"))
            .and(query_param("sideEffectType", "MARGIN_BUY"))
            .and(query_param("newOrderRespType", "RESULT"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "symbol": "BNBUSDT",
                    "orderId": 26769564559,
                    "clientOrderId": "E156O3KP4gOif65bjuUK5V",
                    "transactTime": 1713873075893,
                    "price": "0",
                    "origQty": "0.001",
                    "executedQty": "0.001",
                    "cummulativeQuoteQty": "0.65680000",
                    "status": "FILLED",
                    "timeInForce": "GTC",
                    "type": "MARKET",
                    "side": "BUY",
                    "isIsolated": true,
                    "marginBuyBorrowAmount": "5",
                    "marginBuyBorrowAsset": "USDT",
                    "fills": []
                }"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let order = NewOrderRequest::market("BNBUSDT", Side::Buy, "0.001".parse().unwrap());
        let request = MarginOrderRequest::isolated(order).with_side_effect(SideEffectType::MarginBuy);

        let response = client_for(&server)
            .new_margin_order(&request, ResponseShape::Result, ResponseFormat::Decoded)
            .await
            .expect("new_margin_order failed")
            .into_decoded()
            .expect("decoded order");

        assert_eq!(response.shape(), ResponseShape::Result);
        assert!(response.ack().is_isolated);
        assert!(response.full().is_none());
        let result = response.result().expect("result shape");
        assert_eq!(result.details.cummulative_quote_qty, "0.6568".parse::<Decimal>().unwrap());
    }

    #[tokio::test]
    async fn test_borrow_repay_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sapi/v1/margin/borrow-repay"))
            .and(query_param("type", "BORROW"))
            .and(query_param("asset", "BNB"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "rows": [
                        { "asset": "BNB", "amount": "1", "principal": "1", "status": "CONFIRMED", "timestamp": 1, "txId": 11 },
                        { "asset": "BNB", "amount": "2", "principal": "2", "status": "PENDING", "timestamp": 2, "txId": 12 }
                    ],
                    "total": 40
                }"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let query = BorrowRepayQuery {
            kind: BorrowRepayType::Borrow,
            history: HistoryQuery::for_asset("BNB"),
        };
        let list = client_for(&server)
            .borrow_repay_history(&query, ResponseFormat::Decoded)
            .await
            .expect("borrow_repay_history failed")
            .into_decoded()
            .expect("decoded rows");

        assert_eq!(list.total(), 40);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().tx_id, 12);
    }

    #[tokio::test]
    async fn test_interest_history_raw_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sapi/v1/margin/interestHistory"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"rows":[{"type":"BOGUS"}],"total":1}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .interest_history(&HistoryQuery::default(), ResponseFormat::RawJson)
            .await
            .expect("raw json skips decoding");

        let raw = response.as_raw_json().expect("raw json");
        assert_eq!(raw["total"], 1);
    }

    #[tokio::test]
    async fn test_force_liquidation_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sapi/v1/margin/forceLiquidationRec"))
            .and(query_param("current", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rows":[],"total":0}"#))
            .expect(1)
            .mount(&server)
            .await;

        let list = client_for(&server)
            .force_liquidation_history(&HistoryQuery::default().page(1, 10), ResponseFormat::Decoded)
            .await
            .expect("force_liquidation_history failed")
            .into_decoded()
            .expect("decoded rows");

        assert!(list.is_empty());
        assert_eq!(list.total(), 0);
    }
}
