/*
[INPUT]:  Public API exports for binance-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod output;

pub use self::config::{CliConfig, CredentialsConfig};
pub use self::output::{OutputFormat, render};
