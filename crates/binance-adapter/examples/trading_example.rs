/*
[INPUT]:  BINANCE_API_KEY / BINANCE_API_SECRET environment variables
[OUTPUT]: Testnet order placement at each response shape
[POS]:    Examples - signed trading flow
[UPDATE]: When trading endpoints change
*/

use binance_adapter::*;

/// Example: place testnet orders and read the shaped responses
#[tokio::main]
async fn main() {
    println!("=== Binance Trading Example (testnet) ===\n");

    let (Ok(api_key), Ok(api_secret)) = (
        std::env::var("BINANCE_API_KEY"),
        std::env::var("BINANCE_API_SECRET"),
    ) else {
        eprintln!("Set BINANCE_API_KEY and BINANCE_API_SECRET for the spot testnet");
        return;
    };

    let config = ClientConfig {
        environment: BinanceEnvironment::Testnet,
        ..ClientConfig::default()
    };
    let client = match BinanceClient::with_config(config) {
        Ok(c) => c.with_credentials(ApiCredentials::hmac(api_key, api_secret)),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let order = NewOrderRequest::limit(
        "BTCUSDT",
        Side::Buy,
        "0.001".parse().unwrap_or_default(),
        "20000".parse().unwrap_or_default(),
    );

    for shape in [ResponseShape::Ack, ResponseShape::Result, ResponseShape::Full] {
        println!("Placing order with {} response...", shape);
        match client.new_order(&order, shape, ResponseFormat::Decoded).await {
            Ok(FormattedResponse::Decoded(response)) => {
                println!("✓ order {} ({})", response.ack().order_id, response.shape());
                if let Some(result) = response.result() {
                    println!("  status {} executed {}", result.details.status, result.details.executed_qty);
                }
                if let Some(full) = response.full() {
                    println!("  {} fills", full.fills.len());
                }
            }
            Ok(other) => println!("✓ {:?}", other),
            Err(e) => println!("✗ Error: {}", e),
        }
    }

    println!("\n✓ Trading example complete");
}
