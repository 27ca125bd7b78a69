/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-adapter tests

use binance_adapter::{ApiCredentials, BinanceClient, ClientConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Secret from Binance's published signature examples
#[allow(dead_code)]
pub const TEST_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server` for both API families, signing with the test secret
#[allow(dead_code)]
pub fn signed_client(server: &MockServer) -> BinanceClient {
    BinanceClient::with_config_and_base_urls(ClientConfig::default(), &server.uri(), &server.uri())
        .expect("client init")
        .with_credentials(ApiCredentials::hmac("test-api-key", TEST_SECRET))
}

/// ACK-level spot order record
#[allow(dead_code)]
pub fn ack_record() -> Value {
    json!({
        "symbol": "BTCUSDT",
        "orderId": 1,
        "orderListId": -1,
        "clientOrderId": "abc",
        "transactTime": 1000
    })
}

/// `ack_record` extended with the RESULT-level order state
#[allow(dead_code)]
pub fn result_record() -> Value {
    let mut record = ack_record();
    let extra = json!({
        "price": "10.5",
        "origQty": "2",
        "executedQty": "1",
        "cummulativeQuoteQty": "10.5",
        "status": "FILLED",
        "timeInForce": "GTC",
        "type": "LIMIT",
        "side": "BUY"
    });
    if let (Some(target), Some(source)) = (record.as_object_mut(), extra.as_object()) {
        target.extend(source.clone());
    }
    record
}
