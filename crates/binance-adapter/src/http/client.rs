/*
[INPUT]:  HTTP configuration (environment, base URLs, timeouts, recvWindow, credentials)
[OUTPUT]: Configured reqwest client returning response bodies in the caller's format
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::decode::{DecodeResult, FormattedResponse, ResponseFormat};
use crate::http::signature::{ApiCredentials, RequestSigner};
use crate::http::{BinanceError, Result};
use crate::types::BinanceEnvironment;

/// Base URLs for Binance REST APIs
const MAINNET_API_URL: &str = "https://api.binance.com";
const TESTNET_API_URL: &str = "https://testnet.binance.vision";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USED_WEIGHT_HEADER: &str = "x-mbx-used-weight-1m";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Milliseconds a signed request stays valid after its timestamp
    pub recv_window: u64,
    pub environment: BinanceEnvironment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            recv_window: 5000,
            environment: BinanceEnvironment::Mainnet,
        }
    }
}

impl ClientConfig {
    /// Default `/api` base URL for the configured environment
    pub fn api_base_url(&self) -> &'static str {
        if self.environment.is_testnet() {
            TESTNET_API_URL
        } else {
            MAINNET_API_URL
        }
    }

    /// Default `/sapi` base URL; the spot testnet serves `/api` only
    pub fn sapi_base_url(&self) -> &'static str {
        MAINNET_API_URL
    }
}

/// Which API family an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiFamily {
    /// `/api/v3` spot endpoints
    Spot,
    /// `/sapi/v1` margin, wallet and earn endpoints
    Sapi,
}

/// Main HTTP client for the Binance REST API
#[derive(Debug)]
pub struct BinanceClient {
    http_client: Client,
    api_base_url: Url,
    sapi_base_url: Url,
    timeout: Duration,
    recv_window: u64,
    credentials: Option<ApiCredentials>,
}

impl BinanceClient {
    /// Create a new mainnet client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let api_base_url = config.api_base_url();
        let sapi_base_url = config.sapi_base_url();
        Self::with_config_and_base_urls(config, api_base_url, sapi_base_url)
    }

    /// Create a client against explicit base URLs (mock servers, proxies)
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        api_base_url: &str,
        sapi_base_url: &str,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_base_url: Url::parse(api_base_url)?,
            sapi_base_url: Url::parse(sapi_base_url)?,
            timeout: config.timeout,
            recv_window: config.recv_window,
            credentials: None,
        })
    }

    /// Set credentials for signed requests
    pub fn set_credentials(&mut self, credentials: ApiCredentials) {
        self.credentials = Some(credentials);
    }

    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&ApiCredentials> {
        self.credentials.as_ref()
    }

    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn sapi_base_url(&self) -> &Url {
        &self.sapi_base_url
    }

    fn url(&self, family: ApiFamily, path: &str, query: &str) -> Result<Url> {
        let base = match family {
            ApiFamily::Spot => &self.api_base_url,
            ApiFamily::Sapi => &self.sapi_base_url,
        };
        let mut url = base.join(path)?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    /// Send an unsigned request and return the body text
    pub(crate) async fn send_public<P>(
        &self,
        method: Method,
        family: ApiFamily,
        path: &str,
        params: Option<&P>,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let query = params
            .map(serde_urlencoded::to_string)
            .transpose()?
            .unwrap_or_default();
        let url = self.url(family, path, &query)?;
        let builder = self.http_client.request(method.clone(), url);
        self.execute(builder, &method, path).await
    }

    /// Sign `params` with the configured credentials and return the body text
    pub(crate) async fn send_signed<P>(
        &self,
        method: Method,
        family: ApiFamily,
        path: &str,
        params: &P,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BinanceError::MissingCredentials)?;

        let params = serde_urlencoded::to_string(params)?;
        let query = RequestSigner::new(credentials, self.recv_window)
            .signed_query(&params, RequestSigner::timestamp())?;
        let url = self.url(family, path, &query)?;

        let builder = self
            .http_client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, credentials.api_key());
        self.execute(builder, &method, path).await
    }

    async fn execute(&self, builder: RequestBuilder, method: &Method, path: &str) -> Result<String> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                BinanceError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                BinanceError::Http(err)
            }
        })?;

        let status = response.status();
        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            used_weight = header_value(&response, USED_WEIGHT_HEADER).as_deref().unwrap_or("-"),
            "binance request completed"
        );

        let retry_after = header_value(&response, "retry-after").and_then(|raw| raw.parse().ok());
        let body = response.text().await?;

        if !status.is_success() {
            let err = BinanceError::from_response(status, &body, retry_after);
            warn!(method = %method, path, status = status.as_u16(), error = %err, "binance request failed");
            return Err(err);
        }

        Ok(body)
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Shape a received body per `format`, decoding with `decode` when asked
pub(crate) fn format_body<T, D>(
    body: String,
    format: ResponseFormat,
    decode: D,
) -> Result<FormattedResponse<T>>
where
    D: FnOnce(&Value) -> DecodeResult<T>,
{
    FormattedResponse::from_body(body, format, |value: &Value| {
        decode(value).map_err(BinanceError::from)
    })
}
