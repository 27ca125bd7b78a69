/*
[INPUT]:  Stream endpoint URL and stream names (e.g. "bnbusdt@miniTicker")
[OUTPUT]: Parsed stream messages delivered via channels
[POS]:    WebSocket layer - real-time data stream handling
[UPDATE]: When adding new request methods or changing connection logic
*/

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info};

use crate::http::{BinanceError, Result};
use crate::types::BinanceEnvironment;
use crate::ws::message::StreamMessage;

const MAINNET_STREAM_URL: &str = "wss://stream.binance.com:9443/stream";
const TESTNET_STREAM_URL: &str = "wss://stream.testnet.binance.vision/stream";
const CHANNEL_CAPACITY: usize = 100;
const MESSAGE_SAMPLE_LIMIT: usize = 3;
const SUBSCRIPTION_LOG_LIMIT: usize = 10;
const OTHER_LOG_LIMIT: usize = 3;
const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static MESSAGE_SAMPLE_COUNT: AtomicUsize = AtomicUsize::new(0);
static SUBSCRIBE_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static OTHER_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);
static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// WebSocket client for Binance combined market streams
#[derive(Debug)]
pub struct BinanceWebSocket {
    url: String,
    next_request_id: AtomicU64,
    message_tx: mpsc::Sender<StreamMessage>,
    message_rx: Option<mpsc::Receiver<StreamMessage>>,
    outbound_tx: Arc<Mutex<Option<mpsc::Sender<WsMessage>>>>,
}

impl BinanceWebSocket {
    /// Create a client for the mainnet stream endpoint
    pub fn new() -> Self {
        Self::for_environment(BinanceEnvironment::Mainnet)
    }

    pub fn for_environment(environment: BinanceEnvironment) -> Self {
        let url = if environment.is_testnet() {
            TESTNET_STREAM_URL
        } else {
            MAINNET_STREAM_URL
        };
        Self::with_url(url)
    }

    /// Create a client against an explicit endpoint
    pub fn with_url(url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            url: url.into(),
            next_request_id: AtomicU64::new(1),
            message_tx: tx,
            message_rx: Some(rx),
            outbound_tx: Arc::new(Mutex::new(None)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the message receiver
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<StreamMessage>> {
        self.message_rx.take()
    }

    /// Subscribe to streams; returns the request id echoed in the reply
    pub async fn subscribe(&self, streams: &[&str]) -> Result<u64> {
        self.send_request("SUBSCRIBE", streams).await
    }

    pub async fn unsubscribe(&self, streams: &[&str]) -> Result<u64> {
        self.send_request("UNSUBSCRIBE", streams).await
    }

    /// Ask for the active subscriptions; the reply arrives as a `Response`
    pub async fn list_subscriptions(&self) -> Result<u64> {
        let id = self.next_id();
        let message = json!({ "method": "LIST_SUBSCRIPTIONS", "id": id });
        self.send_text(message).await?;
        Ok(id)
    }

    /// Close the connection; the reader task exits after the close frame
    pub async fn disconnect(&self) {
        let mut guard = self.outbound_tx.lock().await;
        guard.take();
    }

    pub async fn is_connected(&self) -> bool {
        self.outbound_tx.lock().await.is_some()
    }

    pub async fn connect(&self) -> Result<()> {
        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|err| BinanceError::WebSocket(err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let outbound_state = self.outbound_tx.clone();

        {
            let mut guard = outbound_state.lock().await;
            if guard.is_some() {
                return Err(BinanceError::WebSocket(
                    "WebSocket already connected".to_string(),
                ));
            }
            *guard = Some(outbound_tx);
        }

        let message_tx = self.message_tx.clone();
        let outbound_state_for_task = outbound_state.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        match outbound {
                            Some(message) => {
                                if write.send(message).await.is_err() {
                                    break;
                                }
                            }
                            None => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                        }
                    }
                    incoming = read.next() => {
                        match incoming {
                            Some(Ok(WsMessage::Close(_))) => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                            // tungstenite answers pings itself
                            Some(Ok(WsMessage::Ping(_))) | Some(Ok(WsMessage::Pong(_))) => {}
                            Some(Ok(message)) => {
                                if let Some(parsed) = parse_message(message)
                                    && message_tx.send(parsed).await.is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(err)) => {
                                debug!(error = %err, "ws read failed");
                                break;
                            }
                            None => break,
                        }
                    }
                }
            }

            let mut guard = outbound_state_for_task.lock().await;
            *guard = None;
        });

        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn send_request(&self, method: &'static str, streams: &[&str]) -> Result<u64> {
        let id = self.next_id();
        let message = json!({ "method": method, "params": streams, "id": id });
        self.send_text(message).await?;
        log_subscription_sent(method, streams, id);
        Ok(id)
    }

    async fn send_text(&self, message: serde_json::Value) -> Result<()> {
        let sender = {
            let guard = self.outbound_tx.lock().await;
            guard
                .clone()
                .ok_or_else(|| BinanceError::WebSocket("WebSocket not connected".to_string()))?
        };

        sender
            .send(WsMessage::Text(message.to_string().into()))
            .await
            .map_err(|_| BinanceError::WebSocket("WebSocket send channel closed".to_string()))
    }
}

impl Default for BinanceWebSocket {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_message(message: WsMessage) -> Option<StreamMessage> {
    let text: String = match message {
        WsMessage::Text(text) => text.to_string(),
        WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
        _ => return None,
    };

    match StreamMessage::parse(&text) {
        Ok(parsed) => {
            if matches!(parsed, StreamMessage::Other { .. }) {
                log_other_message_once(&text);
            } else {
                log_message_sample_once(&parsed);
            }
            Some(parsed)
        }
        Err(err) => {
            log_parse_fail_once(&err, &text);
            None
        }
    }
}

fn log_subscription_sent(method: &str, streams: &[&str], id: u64) {
    let count = SUBSCRIBE_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= SUBSCRIPTION_LOG_LIMIT {
        return;
    }

    let joined = truncate_for_log(&streams.join(","), RAW_LOG_MAX_BYTES);
    info!(
        sample_index = count + 1,
        sample_limit = SUBSCRIPTION_LOG_LIMIT,
        method,
        id,
        streams = %joined,
        "ws subscription sent"
    );
}

fn log_message_sample_once(message: &StreamMessage) {
    let count = MESSAGE_SAMPLE_COUNT.fetch_add(1, Ordering::Relaxed);
    if count >= MESSAGE_SAMPLE_LIMIT {
        return;
    }

    match message {
        StreamMessage::Event { stream, .. } => {
            info!(
                sample_index = count + 1,
                sample_limit = MESSAGE_SAMPLE_LIMIT,
                stream,
                "ws message sample"
            );
        }
        StreamMessage::Response { id, .. } => {
            info!(
                sample_index = count + 1,
                sample_limit = MESSAGE_SAMPLE_LIMIT,
                id,
                "ws response sample"
            );
        }
        StreamMessage::Error { id, code, msg } => {
            info!(
                sample_index = count + 1,
                sample_limit = MESSAGE_SAMPLE_LIMIT,
                id = ?id,
                code,
                msg,
                "ws request rejected"
            );
        }
        StreamMessage::Other { .. } => {}
    }
}

fn log_other_message_once(raw: &str) {
    let count = OTHER_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < OTHER_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            bytes = raw.len(),
            "ws message unrecognized"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = OTHER_LOG_LIMIT,
            bytes = raw.len(),
            message = %preview,
            "ws message unrecognized"
        );
    }
}

fn log_parse_fail_once(err: &serde_json::Error, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        info!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            "ws message parse failed"
        );
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            message = %preview,
            "ws message parse failed"
        );
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
