/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Binance adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod decode;
pub mod http;
pub mod types;
pub mod ws;

// Re-export the decode core
pub use decode::{
    Decode,
    DecodeResult,
    FormattedResponse,
    Layered,
    ModelError,
    OrderResponse,
    PagedRowList,
    RawRecord,
    ResponseFormat,
    ResponseShape,
};

// Re-export commonly used types from http
pub use http::{
    ApiCredentials,
    BinanceClient,
    BinanceError,
    ClientConfig,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    AggTradeEvent,
    BinanceWebSocket,
    MiniTickerEvent,
    StreamMessage,
};
