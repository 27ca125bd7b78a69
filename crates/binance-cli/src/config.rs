/*
[INPUT]:  YAML configuration file and BINANCE_* environment variables
[OUTPUT]: Parsed CLI configuration, client settings and API credentials
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use binance_adapter::{ApiCredentials, BinanceClient, BinanceEnvironment, ClientConfig};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Mainnet or testnet
    #[serde(default)]
    pub environment: BinanceEnvironment,
    /// Milliseconds a signed request stays valid
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Override for `/api` endpoints (proxies, mock servers)
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Override for `/sapi` endpoints
    #[serde(default)]
    pub sapi_base_url: Option<String>,
    /// Required only for signed commands
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

/// API key plus exactly one kind of secret
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    pub api_key: String,
    /// HMAC-SHA256 secret
    #[serde(default)]
    pub api_secret: Option<String>,
    /// PKCS#8 PEM file holding an Ed25519 private key
    #[serde(default)]
    pub ed25519_pem_path: Option<PathBuf>,
}

fn default_recv_window() -> u64 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

impl CliConfig {
    /// Load a YAML file, then let `BINANCE_*` variables override it
    ///
    /// Nested keys use `__`, e.g. `BINANCE_CREDENTIALS__API_KEY`.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix("BINANCE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("read config {}", path.display()))?;

        let config: Self = settings.try_deserialize().context("parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML text without consulting the environment
    #[cfg(test)]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse yaml config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recv_window == 0 || self.recv_window > 60_000 {
            bail!("recv_window must be within 1..=60000 ms, got {}", self.recv_window);
        }
        if let Some(credentials) = &self.credentials {
            match (&credentials.api_secret, &credentials.ed25519_pem_path) {
                (Some(_), Some(_)) => bail!("set either api_secret or ed25519_pem_path, not both"),
                (None, None) => bail!("credentials need api_secret or ed25519_pem_path"),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            recv_window: self.recv_window,
            environment: self.environment,
            ..ClientConfig::default()
        }
    }

    /// Build a client, attaching credentials when configured
    pub fn build_client(&self) -> Result<BinanceClient> {
        let client_config = self.client_config();
        let api = self
            .api_base_url
            .as_deref()
            .unwrap_or(client_config.api_base_url());
        let sapi = self
            .sapi_base_url
            .as_deref()
            .unwrap_or(client_config.sapi_base_url());
        let client = BinanceClient::with_config_and_base_urls(client_config, api, sapi)
            .context("create binance client")?;

        match &self.credentials {
            Some(credentials) => Ok(client.with_credentials(credentials.to_api_credentials()?)),
            None => Ok(client),
        }
    }
}

impl CredentialsConfig {
    pub fn to_api_credentials(&self) -> Result<ApiCredentials> {
        if let Some(secret) = &self.api_secret {
            return Ok(ApiCredentials::hmac(self.api_key.clone(), secret.clone()));
        }
        let Some(pem_path) = &self.ed25519_pem_path else {
            bail!("credentials need api_secret or ed25519_pem_path");
        };
        let pem = std::fs::read_to_string(pem_path)
            .with_context(|| format!("read ed25519 key {}", pem_path.display()))?;
        ApiCredentials::ed25519_pem(self.api_key.clone(), &pem).context("load ed25519 key")
    }
}
