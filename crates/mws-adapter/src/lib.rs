/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MWS adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod response;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    MwsClient,
    MwsError,
    RequestSigner,
    Result,
};

// Re-export commonly used types from response
pub use response::{ParsedResult, Row, detect, parse, parse_as, parse_table, parse_xml};

// Re-export all types
pub use types::*;
