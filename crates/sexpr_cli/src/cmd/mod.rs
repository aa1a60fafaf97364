/// Typed decode command.
pub mod decode;
/// Canonical re-encode command.
pub mod fmt;
/// Value-to-JSON conversion.
pub mod json;
/// Human-readable value printer.
pub mod print;
/// Token stream dump command.
pub mod tokens;

mod util;
