/*
[INPUT]:  Endpoint responses in the format the user selected
[OUTPUT]: Printable text (verbatim body or pretty JSON)
[POS]:    Presentation layer - stdout rendering
[UPDATE]: When adding output formats
*/

use anyhow::{Context, Result};
use binance_adapter::{FormattedResponse, ResponseFormat};
use clap::ValueEnum;
use serde::Serialize;

/// `--format` values accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response body exactly as received
    Raw,
    /// Parsed JSON, pretty printed
    Json,
    /// Decoded model, re-serialized as pretty JSON
    #[default]
    Decoded,
}

impl From<OutputFormat> for ResponseFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Raw => ResponseFormat::RawString,
            OutputFormat::Json => ResponseFormat::RawJson,
            OutputFormat::Decoded => ResponseFormat::Decoded,
        }
    }
}

pub fn render<T: Serialize>(response: &FormattedResponse<T>) -> Result<String> {
    match response {
        FormattedResponse::RawText(text) => Ok(text.clone()),
        FormattedResponse::RawJson(value) => {
            serde_json::to_string_pretty(value).context("render json")
        }
        FormattedResponse::Decoded(model) => {
            serde_json::to_string_pretty(model).context("render decoded model")
        }
    }
}
