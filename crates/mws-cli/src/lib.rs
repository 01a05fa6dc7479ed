/*
[INPUT]:  Public API exports for mws-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;

// Re-export main types for convenience
pub use config::{CliConfig, RequestDefaults, parse_key_value};
