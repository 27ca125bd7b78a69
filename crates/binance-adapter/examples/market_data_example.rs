/*
[INPUT]:  Symbol identifier (e.g., "BNBBTC") and rolling window size
[OUTPUT]: Ticker statistics in each response format
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use binance_adapter::*;

/// Example: Query market data (no credentials required)
#[tokio::main]
async fn main() {
    println!("=== Binance Market Data Example ===\n");

    let client = match BinanceClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.server_time().await {
        Ok(time) => println!("✓ Server time: {}", time),
        Err(e) => println!("✗ Error: {}", e),
    }

    let symbol = "BNBBTC";

    println!("\n24hr ticker for {} as raw text...", symbol);
    match client.ticker_24hr(symbol, ResponseFormat::RawString).await {
        Ok(response) => println!("✓ {}", response.as_raw_text().unwrap_or_default()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n1d rolling window ticker for {} decoded...", symbol);
    match client
        .rolling_window_ticker(symbol, "1d", ResponseFormat::Decoded)
        .await
    {
        Ok(FormattedResponse::Decoded(ticker)) => println!(
            "✓ open {} last {} ({}%)",
            ticker.open_price, ticker.last_price, ticker.price_change_percent
        ),
        Ok(other) => println!("✓ {:?}", other),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
