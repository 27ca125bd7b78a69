/*
[INPUT]:  Binance API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with decode and serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod orders;
pub mod requests;

pub use enums::*;
pub use models::*;
pub use orders::*;
pub use requests::*;
