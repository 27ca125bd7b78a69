/*
[INPUT]:  CLI arguments, YAML configuration file, BINANCE_* environment
[OUTPUT]: One endpoint response printed in the selected format
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or adding commands
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use binance_adapter::{BinanceClient, HistoryQuery, ResponseFormat};
use binance_cli::{CliConfig, OutputFormat, render};

#[derive(Parser, Debug)]
#[command(name = "binance-cli", version, about = "Query Binance spot, margin and earn endpoints")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Decoded)]
    format: OutputFormat,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ticker statistics; 24hr unless --window is given
    Ticker {
        symbol: String,
        /// Rolling window such as 1h or 7d
        #[arg(long)]
        window: Option<String>,
    },
    /// Cross margin account snapshot
    MarginAccount,
    /// Margin interest history
    InterestHistory {
        #[arg(long)]
        asset: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Dust conversion history
    DustLog {
        #[arg(long)]
        start: Option<i64>,
        #[arg(long)]
        end: Option<i64>,
    },
    /// Simple Earn flexible positions
    FlexiblePositions {
        #[arg(long)]
        asset: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting binance-cli"
    );

    let config = CliConfig::load(&args.config_path).context("load config")?;
    info!(
        environment = ?config.environment,
        signed = config.credentials.is_some(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let command = args
        .command
        .ok_or_else(|| anyhow!("a command is required unless --dry-run is set"))?;
    let client = config.build_client()?;
    let output = run(&client, command, args.format.into()).await?;
    println!("{output}");
    Ok(())
}

async fn run(client: &BinanceClient, command: Command, format: ResponseFormat) -> Result<String> {
    match command {
        Command::Ticker { symbol, window } => {
            let response = match window {
                Some(window) => client.rolling_window_ticker(&symbol, &window, format).await,
                None => client.ticker_24hr(&symbol, format).await,
            }
            .context("fetch ticker")?;
            render(&response)
        }
        Command::MarginAccount => {
            let response = client.margin_account(format).await.context("fetch margin account")?;
            render(&response)
        }
        Command::InterestHistory { asset, page, size } => {
            let query = HistoryQuery {
                asset,
                ..HistoryQuery::default()
            }
            .page(page, size);
            let response = client
                .interest_history(&query, format)
                .await
                .context("fetch interest history")?;
            render(&response)
        }
        Command::DustLog { start, end } => {
            let response = client.dust_log(start, end, format).await.context("fetch dust log")?;
            render(&response)
        }
        Command::FlexiblePositions { asset } => {
            let response = client
                .flexible_positions(asset.as_deref(), format)
                .await
                .context("fetch flexible positions")?;
            render(&response)
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
