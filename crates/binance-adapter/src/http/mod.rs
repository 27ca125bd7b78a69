/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses in raw or decoded form
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod earn;
pub mod error;
pub mod margin;
pub mod public;
pub mod signature;
pub mod trade;
pub mod wallet;

pub use error::{BinanceError, Result};
pub use signature::{ApiCredentials, RequestSigner, SecretKey};

pub use client::{BinanceClient, ClientConfig};
