/*
[INPUT]:  Query parameters, host, path and the secret access key
[OUTPUT]: Canonical query strings, HmacSHA256 signatures, Content-MD5 digests
[POS]:    HTTP layer - signature version 2 request signing
[UPDATE]: When changing signing algorithm or query encoding
*/

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::Sha256;

use crate::http::{MwsError, Result};

pub const SIGNATURE_KEY: &str = "Signature";
pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "2";

/// Every request is signed as a POST, regardless of how the transport sends it.
const SIGNED_VERB: &str = "POST";

/// RFC 3986 unreserved characters pass through, everything else is `%XX`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

type HmacSha256 = Hmac<Sha256>;

/// Percent-encode a single query key or value
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// Build the canonicalized query string.
///
/// Pairs are sorted by raw key (byte order), encoded with [`percent_encode`]
/// and joined as `k=v&k=v`. The result does not depend on iteration order of the
/// input, and it is also the exact query string placed on the wire.
pub fn canonical_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut sorted: Vec<(K, V)> = pairs.into_iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    sorted
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                percent_encode(k.as_ref()),
                percent_encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Format: "POST\n{host}\n{path}\n{canonical_query}"
pub fn string_to_sign(host: &str, path: &str, canonical_query: &str) -> String {
    [SIGNED_VERB, host, path, canonical_query].join("\n")
}

/// Base64-encoded MD5 digest of a request body
pub fn content_md5(body: &[u8]) -> String {
    BASE64.encode(Md5::digest(body))
}

/// Signs MWS requests with the secret access key
#[derive(Clone, Default)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Create a new request signer with the given secret access key
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Whether a non-empty key is configured
    pub fn has_key(&self) -> bool {
        !self.secret.is_empty()
    }

    /// HMAC-SHA256 over `string_to_sign`, base64-encoded
    pub fn sign(&self, string_to_sign: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| MwsError::InvalidSignature)?;
        mac.update(string_to_sign.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    /// Sign a query for `host` and `path`.
    ///
    /// Any `Signature` entry already in `query` is left out of the signed string.
    pub fn sign_query<'a, I>(&self, host: &str, path: &str, query: I) -> Result<String>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let canonical = canonical_query(
            query
                .into_iter()
                .filter(|(key, _)| key.as_str() != SIGNATURE_KEY),
        );
        self.sign(&string_to_sign(host, path, &canonical))
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &if self.has_key() { "<redacted>" } else { "<empty>" })
            .finish()
    }
}
