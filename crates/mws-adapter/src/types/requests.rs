/*
[INPUT]:  Caller-supplied request parameters and the request builder output
[OUTPUT]: RequestSpec (unsigned) and SignedRequest (ready for transport)
[POS]:    Data layer - request descriptors
[UPDATE]: When request fields or dispatch encoding change
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use super::enums::ResponseFormat;
use crate::http::Result;
use crate::http::signature::{SIGNATURE_KEY, canonical_query};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_MD5: &str = "Content-MD5";

/// Caller description of one MWS call.
///
/// Absent and empty values are equivalent: both are filled with defaults
/// when the request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl RequestSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn feed(mut self, content: impl Into<String>) -> Self {
        self.feed_content = Some(content.into());
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Fully populated, signed request. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedRequest {
    /// `https://{host}:{port}{path}` without the query string
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Every query parameter, including `Signature`
    pub query: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub response_format: ResponseFormat,
}

impl SignedRequest {
    pub fn signature(&self) -> Option<&str> {
        self.query.get(SIGNATURE_KEY).map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).map(String::as_str)
    }

    pub fn content_md5(&self) -> Option<&str> {
        self.headers.get(CONTENT_MD5).map(String::as_str)
    }

    /// Query string as sent on the wire, encoded exactly like the signed one
    pub fn query_string(&self) -> String {
        canonical_query(&self.query)
    }

    /// URL with the encoded query attached
    pub fn dispatch_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        url.set_query(Some(&self.query_string()));
        Ok(url)
    }
}
