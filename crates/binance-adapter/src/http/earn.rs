/*
[INPUT]:  Asset or product filters for Simple Earn
[OUTPUT]: Paged flexible savings positions
[POS]:    HTTP layer - Simple Earn endpoints (require signed requests)
[UPDATE]: When adding locked products or subscription endpoints
*/

use reqwest::Method;

use crate::decode::{FormattedResponse, PagedRowList, ResponseFormat, decode_value};
use crate::http::client::{ApiFamily, format_body};
use crate::http::{BinanceClient, Result};
use crate::types::{FlexiblePosition, FlexiblePositionQuery};

impl BinanceClient {
    /// Flexible product positions, optionally for one asset
    ///
    /// GET /sapi/v1/simple-earn/flexible/position
    pub async fn flexible_positions(
        &self,
        asset: Option<&str>,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<PagedRowList<FlexiblePosition>>> {
        let query = FlexiblePositionQuery {
            asset: asset.map(str::to_string),
            ..FlexiblePositionQuery::default()
        };
        let body = self
            .send_signed(
                Method::GET,
                ApiFamily::Sapi,
                "/sapi/v1/simple-earn/flexible/position",
                &query,
            )
            .await?;
        format_body(body, format, decode_value::<PagedRowList<FlexiblePosition>>)
    }
}
