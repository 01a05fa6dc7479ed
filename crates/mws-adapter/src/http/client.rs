/*
[INPUT]:  Endpoint, credentials and timeouts
[OUTPUT]: Configured reqwest client that signs, dispatches and parses MWS calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::http::request;
use crate::http::{MwsError, RequestSigner, Result};
use crate::response::{self, ParsedResult};
use crate::types::{RequestSpec, ResponseFormat, SignedRequest};

/// Default MWS endpoint (North America)
pub const DEFAULT_HOST: &str = "mws.amazonservices.com";
pub const DEFAULT_PORT: u16 = 443;

/// Client configuration. Immutable once handed to [`MwsClient`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub merchant_id: Option<String>,
    #[serde(rename = "timeout_secs", deserialize_with = "duration_secs")]
    pub timeout: Duration,
    #[serde(rename = "connect_timeout_secs", deserialize_with = "duration_secs")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            access_key_id: None,
            secret_access_key: None,
            merchant_id: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref().filter(|v| !v.is_empty())
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref().filter(|v| !v.is_empty())
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref().filter(|v| !v.is_empty())
    }

    /// Signer keyed with the secret access key (empty when unset)
    pub fn signer(&self) -> RequestSigner {
        RequestSigner::new(self.secret_access_key().unwrap_or_default())
    }

    /// Check that the credentials needed for an authenticated call are present
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(MwsError::Config("host must not be empty".to_string()));
        }
        if self.access_key_id().is_none() {
            return Err(MwsError::MissingCredential("access_key_id"));
        }
        if self.secret_access_key().is_none() {
            return Err(MwsError::MissingCredential("secret_access_key"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("merchant_id", &self.merchant_id)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn duration_secs<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

/// Main HTTP client for MWS
#[derive(Debug)]
pub struct MwsClient {
    http_client: Client,
    config: ClientConfig,
    base_url: Option<Url>,
}

impl MwsClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            config,
            base_url: None,
        })
    }

    /// Create a client that dispatches to `base_url` instead of the configured
    /// host. Requests are still signed for `config.host`.
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = Some(Url::parse(base_url)?);
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the signed request for `spec` without sending it
    pub fn build(&self, spec: &RequestSpec) -> Result<SignedRequest> {
        request::build(&self.config, spec)
    }

    /// Validate credentials, sign `spec`, send it and parse the response
    pub async fn request(&self, spec: &RequestSpec) -> Result<ParsedResult> {
        self.config.validate()?;
        let signed = self.build(spec)?;
        self.send(&signed).await
    }

    /// Send an already signed request and parse the response body
    pub async fn send(&self, signed: &SignedRequest) -> Result<ParsedResult> {
        let url = self.dispatch_url(signed)?;
        info!(host = url.host_str().unwrap_or_default(), path = url.path(), "dispatching MWS request");

        let mut builder = self.http_client.request(Method::POST, url);
        for (name, value) in &signed.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &signed.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), bytes = body.len(), "MWS response received");

        let detected = response::detect(&body);
        if detected != signed.response_format {
            debug!(
                expected = %signed.response_format,
                detected = %detected,
                "response body format differs from request hint"
            );
        }

        if !status.is_success() {
            let err = api_error(status, detected, &body);
            warn!(status = status.as_u16(), error = %err, "MWS request failed");
            return Err(err);
        }

        response::parse_as(detected, &body)
    }

    fn dispatch_url(&self, signed: &SignedRequest) -> Result<Url> {
        let signed_url = signed.dispatch_url()?;
        match &self.base_url {
            None => Ok(signed_url),
            Some(base) => {
                let mut url = base.join(signed_url.path())?;
                url.set_query(signed_url.query());
                Ok(url)
            }
        }
    }
}

/// Turn a non-success response into [`MwsError::Api`], lifting `Code` and
/// `Message` out of an `ErrorResponse` document when there is one.
fn api_error(status: StatusCode, format: ResponseFormat, body: &str) -> MwsError {
    let fallback_code = status
        .canonical_reason()
        .unwrap_or("HttpError")
        .to_string();

    if format == ResponseFormat::Xml {
        if let Ok(doc) = response::parse_xml(body) {
            let error = doc
                .pointer("/ErrorResponse/Error/0")
                .or_else(|| doc.pointer("/Error"));
            if let Some(error) = error {
                let code = xml_text(error, "Code").unwrap_or(fallback_code);
                let message = xml_text(error, "Message").unwrap_or_default();
                return MwsError::api_error(status, code, message);
            }
        }
    }

    MwsError::api_error(status, fallback_code, body.trim())
}

fn xml_text(node: &serde_json::Value, field: &str) -> Option<String> {
    node.get(field)?
        .get(0)?
        .as_str()
        .map(str::to_string)
}
