mod decode;
mod descriptor;
mod encode;
mod error;
mod lexer;
mod options;
mod shape;
mod tags;
mod token;
mod typename;
mod value;

/// Descriptor-driven decoding entry points.
pub use decode::{unmarshal_value, unmarshal_value_with};
/// Type descriptor model.
pub use descriptor::{Descriptor, FieldDesc, Primitive, RecordDesc};
/// Canonical text encoder.
pub use encode::{encode, quote};
/// Error, position, and result aliases.
pub use error::{DecodeErrorKind, Position, Result, SexprError};
/// Token scanner and string-literal decoding.
pub use lexer::{Lexer, tokenize, unquote};
/// Decode limits and policy switches.
pub use options::{ArrayFill, DecodeOptions, TagScope};
/// Typed bindings and typed entry points.
pub use shape::{Dynamic, Shape, from_bytes, marshal, unmarshal, unmarshal_with};
/// Record alias tables.
pub use tags::{TagMap, TagTable};
/// Token types.
pub use token::{Token, TokenKind};
/// Dynamic type-name parser.
pub use typename::type_of;
/// Decoded runtime value types.
pub use value::{Complex, DynamicValue, FieldValue, MapValue, RecordValue, Value};
