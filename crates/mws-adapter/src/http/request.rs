/*
[INPUT]:  ClientConfig, RequestSpec and the current time
[OUTPUT]: SignedRequest with defaults, signature, content type and body
[POS]:    HTTP layer - request building (pure, never mutates the spec)
[UPDATE]: When defaulting policy or content-type resolution changes
*/

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};
use url::Url;

use crate::http::signature::{self, SIGNATURE_KEY, SIGNATURE_METHOD, SIGNATURE_VERSION};
use crate::http::{ClientConfig, Result};
use crate::types::{CONTENT_MD5, CONTENT_TYPE, RequestSpec, SignedRequest};

const DEFAULT_PATH: &str = "/";
const XML_PROLOG: &str = "<?xml";

pub const CONTENT_TYPE_XML: &str = "text/xml";
pub const CONTENT_TYPE_TSV: &str = "text/tab-separated-values; charset=iso-8859-1";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Build a signed request stamped with the current time
pub fn build(config: &ClientConfig, spec: &RequestSpec) -> Result<SignedRequest> {
    build_at(config, spec, Utc::now())
}

/// Build a signed request using `now` as the default `Timestamp`.
///
/// A missing secret access key does not fail here: the query is signed with
/// an empty key. [`ClientConfig::validate`] is the explicit check.
pub fn build_at(
    config: &ClientConfig,
    spec: &RequestSpec,
    now: DateTime<Utc>,
) -> Result<SignedRequest> {
    let path = non_empty(spec.path.as_deref())
        .unwrap_or(DEFAULT_PATH)
        .to_string();

    let mut query = spec.query.clone();
    query.remove(SIGNATURE_KEY);

    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    fill_default(&mut query, "Timestamp", Some(&timestamp));
    fill_default(&mut query, "AWSAccessKeyId", config.access_key_id());
    fill_default(&mut query, "SellerId", config.merchant_id());
    query.insert("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string());
    query.insert("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string());

    let signer = config.signer();
    if !signer.has_key() {
        warn!(path = %path, "signing request with an empty secret access key");
    }
    let signature = signer.sign_query(&config.host, &path, &query)?;
    query.insert(SIGNATURE_KEY.to_string(), signature);

    let feed = non_empty(spec.feed_content.as_deref());

    let mut headers: BTreeMap<String, String> = spec
        .headers
        .iter()
        .filter(|(name, _)| {
            !name.eq_ignore_ascii_case(CONTENT_TYPE) && !name.eq_ignore_ascii_case(CONTENT_MD5)
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    let content_type = resolve_content_type(spec.header_value(CONTENT_TYPE), feed);
    headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
    if let Some(body) = feed {
        headers.insert(
            CONTENT_MD5.to_string(),
            signature::content_md5(body.as_bytes()),
        );
    }

    let url = format!("https://{}:{}{}", config.host, config.port, path);
    Url::parse(&url)?;

    let response_format = spec.response_format.unwrap_or_default();
    debug!(
        path = %path,
        params = query.len(),
        content_type,
        has_body = feed.is_some(),
        response_format = %response_format,
        "signed MWS request"
    );

    Ok(SignedRequest {
        url,
        headers,
        query,
        body: feed.map(str::to_string),
        response_format,
    })
}

/// Pick the request Content-Type.
///
/// Priority: explicit header, XML feed, tab-separated feed, form encoding.
pub fn resolve_content_type<'a>(explicit: Option<&'a str>, feed: Option<&str>) -> &'a str {
    if let Some(content_type) = non_empty(explicit) {
        return content_type;
    }
    match non_empty(feed) {
        Some(body) if body.starts_with(XML_PROLOG) => CONTENT_TYPE_XML,
        Some(_) => CONTENT_TYPE_TSV,
        None => CONTENT_TYPE_FORM,
    }
}

fn fill_default(query: &mut BTreeMap<String, String>, key: &str, default: Option<&str>) {
    if query.get(key).is_some_and(|value| !value.is_empty()) {
        return;
    }
    match non_empty(default) {
        Some(value) => {
            query.insert(key.to_string(), value.to_string());
        }
        // an unset value is never serialized
        None => {
            query.remove(key);
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
