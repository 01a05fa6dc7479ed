/*
[INPUT]:  Raw MWS response bodies
[OUTPUT]: ParsedResult (XML document tree or tab-separated rows)
[POS]:    Response layer - format detection and decoding
[UPDATE]: When adding response formats or changing detection rules
*/

pub mod table;
pub mod xml;

use serde::Serialize;
use serde_json::Value;

use crate::http::Result;
use crate::types::ResponseFormat;

pub use table::{Row, parse_table};
pub use xml::parse_xml;

const XML_PROLOG: &str = "<?xml";

/// Decoded response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedResult {
    Xml(Value),
    Table(Vec<Row>),
}

impl ParsedResult {
    pub fn format(&self) -> ResponseFormat {
        match self {
            ParsedResult::Xml(_) => ResponseFormat::Xml,
            ParsedResult::Table(_) => ResponseFormat::Table,
        }
    }

    pub fn as_xml(&self) -> Option<&Value> {
        match self {
            ParsedResult::Xml(doc) => Some(doc),
            ParsedResult::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&[Row]> {
        match self {
            ParsedResult::Table(rows) => Some(rows),
            ParsedResult::Xml(_) => None,
        }
    }
}

/// Classify a body by its first five bytes: `<?xml` means XML, anything
/// else is treated as a tab-separated table.
pub fn detect(body: &str) -> ResponseFormat {
    if body.starts_with(XML_PROLOG) {
        ResponseFormat::Xml
    } else {
        ResponseFormat::Table
    }
}

/// Decode a body using content sniffing
pub fn parse(body: &str) -> Result<ParsedResult> {
    parse_as(detect(body), body)
}

/// Decode a body with an explicitly chosen format
pub fn parse_as(format: ResponseFormat, body: &str) -> Result<ParsedResult> {
    match format {
        ResponseFormat::Xml => parse_xml(body).map(ParsedResult::Xml),
        ResponseFormat::Table => parse_table(body).map(ParsedResult::Table),
    }
}
