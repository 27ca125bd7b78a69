/*
[INPUT]:  Serialized request parameters, API key and secret (HMAC or Ed25519)
[OUTPUT]: Signed query strings (recvWindow, timestamp, signature)
[POS]:    HTTP layer - request signing for USER_DATA / TRADE / MARGIN endpoints
[UPDATE]: When changing signing algorithm or query layout
*/

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ed25519_dalek::{Signer as _, SigningKey, pkcs8::DecodePrivateKey};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{BinanceError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Secret half of an API key pair
#[derive(Clone)]
pub enum SecretKey {
    /// HMAC-SHA256 secret; signatures are lowercase hex
    Hmac(Vec<u8>),
    /// Ed25519 private key; signatures are base64
    Ed25519(SigningKey),
}

/// API key plus the secret used to sign requests
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret: SecretKey,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.secret {
            SecretKey::Hmac(_) => "hmac",
            SecretKey::Ed25519(_) => "ed25519",
        };
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &format_args!("<redacted {kind}>"))
            .finish()
    }
}

impl ApiCredentials {
    pub fn hmac(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretKey::Hmac(api_secret.into().into_bytes()),
        }
    }

    /// Load an Ed25519 key from a PKCS#8 PEM document
    pub fn ed25519_pem(api_key: impl Into<String>, pem: &str) -> Result<Self> {
        let signing_key = SigningKey::from_pkcs8_pem(pem)
            .map_err(|err| BinanceError::InvalidCredentials(err.to_string()))?;
        Ok(Self::ed25519(api_key, signing_key))
    }

    pub fn ed25519(api_key: impl Into<String>, signing_key: SigningKey) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretKey::Ed25519(signing_key),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign `payload`, returning the signature exactly as Binance expects it
    pub fn sign(&self, payload: &str) -> Result<String> {
        match &self.secret {
            SecretKey::Hmac(secret) => {
                let mut mac = HmacSha256::new_from_slice(secret)
                    .map_err(|err| BinanceError::InvalidCredentials(err.to_string()))?;
                mac.update(payload.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
            SecretKey::Ed25519(key) => Ok(BASE64.encode(key.sign(payload.as_bytes()).to_bytes())),
        }
    }
}

/// Builds the query string of a signed request
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
    recv_window: u64,
}

impl<'a> RequestSigner<'a> {
    pub fn new(credentials: &'a ApiCredentials, recv_window: u64) -> Self {
        Self {
            credentials,
            recv_window,
        }
    }

    /// Current time in milliseconds, as Binance's `timestamp` parameter
    pub fn timestamp() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Append `recvWindow`, `timestamp` and `signature` to `params`
    pub fn signed_query(&self, params: &str, timestamp: i64) -> Result<String> {
        let mut query = String::with_capacity(params.len() + 128);
        query.push_str(params);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!("recvWindow={}&timestamp={timestamp}", self.recv_window));

        let signature = self.credentials.sign(&query)?;
        let encoded: String = url::form_urlencoded::byte_serialize(signature.as_bytes()).collect();
        query.push_str("&signature=");
        query.push_str(&encoded);
        Ok(query)
    }
}
