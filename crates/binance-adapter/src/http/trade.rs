/*
[INPUT]:  Order requests, requested response shape and output format
[OUTPUT]: Spot order responses resolved at ACK / RESULT / FULL
[POS]:    HTTP layer - spot trading endpoints (require signed requests)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use serde::Serialize;

use crate::decode::{FormattedResponse, OrderResponse, RawRecord, ResponseFormat, ResponseShape};
use crate::http::client::{ApiFamily, format_body};
use crate::http::{BinanceClient, Result};
use crate::types::{NewOrderRequest, SpotOrderResponse};

/// Request parameters plus the `newOrderRespType` Binance should answer with
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShapedRequest<'a, R: Serialize> {
    #[serde(flatten)]
    pub request: &'a R,
    pub new_order_resp_type: ResponseShape,
}

impl BinanceClient {
    /// Place a spot order
    ///
    /// POST /api/v3/order
    /// The response is decoded at exactly `shape`, whatever extra fields arrive.
    pub async fn new_order(
        &self,
        request: &NewOrderRequest,
        shape: ResponseShape,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<SpotOrderResponse>> {
        let params = ShapedRequest {
            request,
            new_order_resp_type: shape,
        };
        let body = self
            .send_signed(Method::POST, ApiFamily::Spot, "/api/v3/order", &params)
            .await?;
        format_body(body, format, |value| {
            OrderResponse::resolve(&RawRecord::from_value(value)?, shape)
        })
    }

    /// Validate an order without sending it to the matching engine
    ///
    /// POST /api/v3/order/test
    pub async fn test_new_order(&self, request: &NewOrderRequest) -> Result<()> {
        self.send_signed(Method::POST, ApiFamily::Spot, "/api/v3/order/test", request)
            .await?;
        Ok(())
    }
}
