/*
[INPUT]:  Response format hints from callers and config files
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When new response body formats are supported
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Body format of an MWS response.
///
/// MWS answers with XML documents for most operations and with
/// tab-delimited tables for report and feed-result downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Xml,
    #[serde(alias = "tab", alias = "tsv")]
    Table,
}

impl ResponseFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Xml => "xml",
            ResponseFormat::Table => "table",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(ResponseFormat::Xml),
            "table" | "tab" | "tsv" => Ok(ResponseFormat::Table),
            other => Err(format!("unknown response format: {other}")),
        }
    }
}
