/*
[INPUT]:  WebSocket test scenarios
[OUTPUT]: Test results for WebSocket client
[POS]:    Integration tests - WebSocket
[UPDATE]: When WebSocket client changes
*/

use std::time::Duration;

use binance_adapter::{BinanceWebSocket, MiniTickerEvent, StreamMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

#[test]
fn test_websocket_creation() {
    let mut ws = BinanceWebSocket::new();
    assert!(ws.take_receiver().is_some());
}

#[test]
fn test_websocket_default() {
    let mut ws: BinanceWebSocket = Default::default();
    assert!(ws.take_receiver().is_some());
}

#[test]
fn test_websocket_receiver_take_once() {
    let mut ws = BinanceWebSocket::new();
    assert!(ws.take_receiver().is_some());
    assert!(ws.take_receiver().is_none());
}

#[tokio::test]
async fn test_subscribe_and_receive_event() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = tokio_tungstenite::accept_async(stream).await.expect("handshake");

        let request = match socket.next().await {
            Some(Ok(Message::Text(text))) => text.to_string(),
            other => panic!("unexpected frame: {other:?}"),
        };
        let request: serde_json::Value = serde_json::from_str(&request).expect("request json");

        let reply = serde_json::json!({ "result": null, "id": request["id"] });
        socket.send(Message::Text(reply.to_string().into())).await.expect("reply");

        let event = r#"{"stream":"bnbusdt@miniTicker","data":{"e":"24hrMiniTicker","E":1,"s":"BNBUSDT","c":"301.5","o":"300","h":"302","l":"299","v":"10","q":"3015"}}"#;
        socket.send(Message::Text(event.to_string().into())).await.expect("event");
        request
    });

    let mut ws = BinanceWebSocket::with_url(format!("ws://{addr}"));
    let mut rx = ws.take_receiver().expect("receiver");
    ws.connect().await.expect("connect");
    let id = ws.subscribe(&["bnbusdt@miniTicker"]).await.expect("subscribe");

    let reply = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("reply in time")
        .expect("reply frame");
    assert_eq!(
        reply,
        StreamMessage::Response {
            id,
            result: serde_json::Value::Null
        }
    );

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event in time")
        .expect("event frame");
    let ticker: MiniTickerEvent = event.decode_event().expect("event frame").expect("decoded");
    assert_eq!(ticker.symbol, "BNBUSDT");

    let request = server.await.expect("server task");
    assert_eq!(request["method"], "SUBSCRIBE");
    assert_eq!(request["params"][0], "bnbusdt@miniTicker");
}
