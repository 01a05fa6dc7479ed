/*
[INPUT]:  Client configuration, request specs and credentials
[OUTPUT]: Signed request descriptors and parsed API results
[POS]:    HTTP layer - request signing and dispatch
[UPDATE]: When changing the signing scheme or client behavior
*/

pub mod client;
pub mod error;
pub mod request;
pub mod signature;

pub use error::{MwsError, Result};
pub use request::{build, build_at};
pub use signature::RequestSigner;

pub use client::{ClientConfig, MwsClient};
