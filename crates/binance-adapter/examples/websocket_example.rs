/*
[INPUT]:  Stream names to subscribe to
[OUTPUT]: Real-time mini ticker events
[POS]:    Examples - WebSocket stream handling
[UPDATE]: When WebSocket API changes
*/

use binance_adapter::*;
use tokio::time::{Duration, timeout};

/// Example: stream mini tickers for a few seconds
#[tokio::main]
async fn main() {
    println!("=== Binance WebSocket Example ===\n");

    let mut ws = BinanceWebSocket::new();
    let Some(mut receiver) = ws.take_receiver() else {
        eprintln!("Receiver already taken");
        return;
    };

    if let Err(e) = ws.connect().await {
        eprintln!("Failed to connect: {}", e);
        return;
    }
    if let Err(e) = ws.subscribe(&["btcusdt@miniTicker", "ethusdt@miniTicker"]).await {
        eprintln!("Failed to subscribe: {}", e);
        return;
    }

    let mut seen = 0;
    while seen < 10 {
        let Ok(Some(message)) = timeout(Duration::from_secs(10), receiver.recv()).await else {
            break;
        };
        match message.decode_event::<MiniTickerEvent>() {
            Some(Ok(ticker)) => {
                println!("{} close {} volume {}", ticker.symbol, ticker.close_price, ticker.volume);
                seen += 1;
            }
            Some(Err(e)) => println!("✗ Decode error: {}", e),
            None => println!("{:?}", message),
        }
    }

    ws.disconnect().await;
    println!("\n✓ WebSocket example complete");
}
