/*
[INPUT]:  Error sources (HTTP, API, XML/TSV decoding, configuration)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the MWS adapter
#[derive(Error, Debug)]
pub enum MwsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response
    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// XML response could not be tokenized
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML response is well-formed at token level but not a single document
    #[error("Malformed XML document: {0}")]
    MalformedXml(String),

    /// Tab-separated response could not be decoded
    #[error("Tab-separated parse error: {0}")]
    TableParse(#[from] csv::Error),

    /// A credential required for dispatch is absent
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Signing key was rejected by the MAC implementation
    #[error("Invalid request signature")]
    InvalidSignature,

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MwsError {
    /// Check if the error is retryable.
    ///
    /// The adapter never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            MwsError::Http(_) => true,
            MwsError::Api { status, code, .. } => {
                *status >= 500 || code == "RequestThrottled" || code == "QuotaExceeded"
            }
            _ => false,
        }
    }

    /// Check if the error came from decoding a response body
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            MwsError::XmlParse(_) | MwsError::MalformedXml(_) | MwsError::TableParse(_)
        )
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            MwsError::MissingCredential(_) | MwsError::InvalidSignature => true,
            MwsError::Api { status, code, .. } => {
                *status == 401
                    || *status == 403
                    || code == "SignatureDoesNotMatch"
                    || code == "InvalidAccessKeyId"
                    || code == "AccessDenied"
            }
            _ => false,
        }
    }

    /// Create an API error from status code, service error code and message
    pub fn api_error(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MwsError::Api {
            status: status.as_u16(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for MWS operations
pub type Result<T> = std::result::Result<T, MwsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let throttled =
            MwsError::api_error(StatusCode::SERVICE_UNAVAILABLE, "RequestThrottled", "slow down");
        assert!(throttled.is_retryable());

        let bad_request =
            MwsError::api_error(StatusCode::BAD_REQUEST, "InvalidParameterValue", "bad");
        assert!(!bad_request.is_retryable());

        assert!(!MwsError::MissingCredential("secret_access_key").is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(MwsError::InvalidSignature.is_auth_error());
        assert!(MwsError::MissingCredential("access_key_id").is_auth_error());
        let mismatch = MwsError::api_error(StatusCode::FORBIDDEN, "SignatureDoesNotMatch", "nope");
        assert!(mismatch.is_auth_error());
        assert!(!MwsError::Config("x".into()).is_auth_error());
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(MwsError::MalformedXml("no root".into()).is_parse_error());
        assert!(!MwsError::InvalidSignature.is_parse_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = MwsError::api_error(
            StatusCode::BAD_REQUEST,
            "InvalidParameterValue",
            "Invalid MarketplaceId",
        );
        match err {
            MwsError::Api { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, "InvalidParameterValue");
                assert_eq!(message, "Invalid MarketplaceId");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
