//! Schema-directed decoding of S-expression documents into typed values.

/// Lexer, type descriptors, decode engine, encoder, and typed bindings.
pub mod codec;
