/*
[INPUT]:  Optional time window for dust conversions
[OUTPUT]: Paged dust log rows with nested per-asset details
[POS]:    HTTP layer - wallet endpoints (require signed requests)
[UPDATE]: When adding wallet endpoints
*/

use reqwest::Method;

use crate::decode::{Decode, FormattedResponse, PagedRowList, RawRecord, ResponseFormat};
use crate::http::client::{ApiFamily, format_body};
use crate::http::{BinanceClient, Result};
use crate::types::{DustLog, TimeWindowQuery};

/// Dust log responses list rows under this key instead of `rows`
pub const DUST_LOG_ROWS_KEY: &str = "userAssetDribblets";

impl BinanceClient {
    /// Small-balance to BNB conversion history
    ///
    /// GET /sapi/v1/asset/dribblet
    pub async fn dust_log(
        &self,
        start_time: Option<i64>,
        end_time: Option<i64>,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<PagedRowList<DustLog>>> {
        let query = TimeWindowQuery {
            start_time,
            end_time,
        };
        let body = self
            .send_signed(Method::GET, ApiFamily::Sapi, "/sapi/v1/asset/dribblet", &query)
            .await?;
        format_body(body, format, |value| {
            let record = RawRecord::from_value(value)?;
            PagedRowList::decode_with(&record, DUST_LOG_ROWS_KEY, DustLog::decode)
        })
    }
}
