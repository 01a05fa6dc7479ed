/*
[INPUT]:  Request parameters and response format hints
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When request/response descriptors change or new types added
*/

pub mod enums;
pub mod requests;

pub use enums::*;
pub use requests::*;
