/*
[INPUT]:  Symbol identifiers and rolling window sizes
[OUTPUT]: Connectivity checks, server time and ticker statistics
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use reqwest::Method;

use crate::decode::{FormattedResponse, RawRecord, ResponseFormat, decode_value};
use crate::http::client::{ApiFamily, format_body};
use crate::http::{BinanceClient, Result};
use crate::types::{RollingTicker, RollingWindowQuery, SymbolQuery};

impl BinanceClient {
    /// Test connectivity
    ///
    /// GET /api/v3/ping
    pub async fn ping(&self) -> Result<()> {
        self.send_public::<()>(Method::GET, ApiFamily::Spot, "/api/v3/ping", None)
            .await?;
        Ok(())
    }

    /// Server time in milliseconds
    ///
    /// GET /api/v3/time
    pub async fn server_time(&self) -> Result<i64> {
        let body = self
            .send_public::<()>(Method::GET, ApiFamily::Spot, "/api/v3/time", None)
            .await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(RawRecord::from_value(&value)?.mandatory_i64("serverTime")?)
    }

    /// 24hr rolling ticker statistics
    ///
    /// GET /api/v3/ticker/24hr?symbol={symbol}
    pub async fn ticker_24hr(
        &self,
        symbol: &str,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<RollingTicker>> {
        let query = SymbolQuery {
            symbol: symbol.to_string(),
        };
        let body = self
            .send_public(Method::GET, ApiFamily::Spot, "/api/v3/ticker/24hr", Some(&query))
            .await?;
        format_body(body, format, decode_value::<RollingTicker>)
    }

    /// Ticker statistics over a custom window such as `"1h"` or `"7d"`
    ///
    /// GET /api/v3/ticker?symbol={symbol}&windowSize={window}
    pub async fn rolling_window_ticker(
        &self,
        symbol: &str,
        window: &str,
        format: ResponseFormat,
    ) -> Result<FormattedResponse<RollingTicker>> {
        let query = RollingWindowQuery {
            symbol: symbol.to_string(),
            window_size: window.to_string(),
        };
        let body = self
            .send_public(Method::GET, ApiFamily::Spot, "/api/v3/ticker", Some(&query))
            .await?;
        format_body(body, format, decode_value::<RollingTicker>)
    }
}

#[cfg(test)]
mod tests {
    use crate::decode::ResponseFormat;
    use crate::http::{BinanceClient, BinanceError, ClientConfig};
    use rust_decimal::Decimal;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TICKER_BODY: &str = r#"{
        "symbol": "BNBBTC",
        "priceChange": "-8.00000000",
        "priceChangePercent": "-88.889",
        "weightedAvgPrice": "2.60427807",
        "openPrice": "9.00000000",
        "highPrice": "9.00000000",
        "lowPrice": "1.00000000",
        "lastPrice": "1.00000000",
        "volume": "187.00000000",
        "quoteVolume": "487.00000000",
        "openTime": 1641859200000,
        "closeTime": 1642031999999,
        "firstId": 0,
        "lastId": 60,
        "count": 61
    }"#;

    fn client_for(server: &MockServer) -> BinanceClient {
        BinanceClient::with_config_and_base_urls(
            ClientConfig::default(),
            &server.uri(),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_server_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/time"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"serverTime":1499827319559}"#))
            .expect(1)
            .mount(&server)
            .await;

        let time = client_for(&server).server_time().await.expect("server_time failed");
        assert_eq!(time, 1_499_827_319_559);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).ping().await.expect("ping failed");
    }

    #[tokio::test]
    async fn test_rolling_window_ticker_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker"))
            .and(query_param("symbol", "BNBBTC"))
            .and(query_param("windowSize", "2d"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TICKER_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .rolling_window_ticker("BNBBTC", "2d", ResponseFormat::Decoded)
            .await
            .expect("rolling_window_ticker failed");

        let ticker = response.into_decoded().expect("decoded ticker");
        assert_eq!(ticker.symbol, "BNBBTC");
        assert_eq!(ticker.open_price, Decimal::new(9, 0));
        assert_eq!(ticker.last_price, Decimal::new(1, 0));
        assert_eq!(ticker.count, 61);
    }

    #[tokio::test]
    async fn test_ticker_raw_string_is_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/24hr"))
            .and(query_param("symbol", "BNBBTC"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TICKER_BODY))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .ticker_24hr("BNBBTC", ResponseFormat::RawString)
            .await
            .expect("ticker_24hr failed");

        assert_eq!(response.as_raw_text(), Some(TICKER_BODY));
    }

    #[tokio::test]
    async fn test_ticker_missing_symbol_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/24hr"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"lastPrice":"1"}"#))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let raw = client
            .ticker_24hr("BNBBTC", ResponseFormat::RawJson)
            .await
            .expect("raw json never decodes");
        assert!(raw.as_raw_json().is_some());

        let err = client
            .ticker_24hr("BNBBTC", ResponseFormat::Decoded)
            .await
            .unwrap_err();
        assert!(matches!(err, BinanceError::Model(_)));
    }
}
