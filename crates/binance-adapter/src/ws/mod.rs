/*
[INPUT]:  Stream endpoint and stream names
[OUTPUT]: Real-time market events and request replies
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new event payloads or changing connection logic
*/

pub mod client;
pub mod message;

pub use client::BinanceWebSocket;
pub use message::{AggTradeEvent, MiniTickerEvent, StreamMessage};
