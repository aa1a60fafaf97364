use std::fmt;

use thiserror::Error;

use crate::codec::token::TokenKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SexprError>;

/// Location of a token inside the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	/// Byte offset from the start of input.
	pub offset: usize,
	/// 1-based line number.
	pub line: u32,
	/// 1-based column, counted in characters.
	pub column: u32,
}

impl Position {
	pub(crate) fn start() -> Self {
		Self { offset: 0, line: 1, column: 1 }
	}

	/// Step past `ch`.
	pub(crate) fn advance(&mut self, ch: char) {
		self.offset += ch.len_utf8();
		if ch == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// Errors produced while decoding, encoding, or binding S-expression values.
#[derive(Debug, Error)]
pub enum SexprError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Decoding aborted at a source position.
	#[error("error at {pos}: {kind}")]
	Decode {
		/// Position of the token being examined when decoding failed.
		pos: Position,
		/// Failure cause.
		kind: DecodeErrorKind,
	},
	/// Type name has no decomposition rule.
	#[error("unsupported type name: {name:?}")]
	UnsupportedTypeName {
		/// Offending type name.
		name: String,
	},
	/// Typed binding received a value of a different shape.
	#[error("value mismatch: expected {expected}, got {got}")]
	ValueMismatch {
		/// Expected value kind.
		expected: &'static str,
		/// Actual value kind.
		got: &'static str,
	},
	/// Encoder cannot represent a NaN or infinite float.
	#[error("cannot encode non-finite float {value}")]
	NonFiniteFloat {
		/// Offending value.
		value: f64,
	},
	/// Encoder cannot represent a value with this descriptor.
	#[error("cannot encode {what}")]
	Unencodable {
		/// Description of the unencodable value.
		what: String,
	},
}

impl SexprError {
	/// Return the decode failure cause, if this is a decode error.
	pub fn decode_kind(&self) -> Option<&DecodeErrorKind> {
		match self {
			Self::Decode { kind, .. } => Some(kind),
			_ => None,
		}
	}
}

/// Causes of a failed decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
	/// Input could not be split into tokens.
	#[error("lex error: {reason}")]
	Lex {
		/// What the lexer rejected.
		reason: String,
	},
	/// Token is valid but not for the current destination.
	#[error("unexpected token {kind} {text:?} for {expected}")]
	UnexpectedToken {
		/// Token classification.
		kind: TokenKind,
		/// Literal token text.
		text: String,
		/// Destination shape or construct that was being decoded.
		expected: String,
	},
	/// Record alias absent from the alias table.
	#[error("unknown field {alias:?} in record {record}")]
	UnknownField {
		/// Record type name.
		record: String,
		/// Alias read from input.
		alias: String,
	},
	/// Fixed-size array received the wrong number of elements.
	#[error("array arity mismatch: expected {expected} elements, got {got}")]
	ArityMismatch {
		/// Declared array length.
		expected: usize,
		/// Elements supplied so far.
		got: usize,
	},
	/// Complex literal token sequence is not `# [C] ( re im )`.
	#[error("malformed complex literal: got {kind} {text:?}")]
	MalformedComplex {
		/// Token classification found in the sequence.
		kind: TokenKind,
		/// Literal token text.
		text: String,
	},
	/// Type name or destination shape is not supported here.
	#[error("unsupported type: {name}")]
	UnsupportedType {
		/// Type name or descriptor rendering.
		name: String,
	},
	/// List form decoded into a non-compound destination.
	#[error("cannot decode a list into {name}")]
	ListIntoScalar {
		/// Descriptor rendering.
		name: String,
	},
	/// End of input reached inside a structure.
	#[error("premature end of input")]
	PrematureEnd,
	/// Two record fields share an external alias.
	#[error("duplicate alias {alias:?} in record {record}")]
	DuplicateAlias {
		/// Record type name.
		record: String,
		/// Shared alias.
		alias: String,
	},
	/// Two distinct record shapes share a type name.
	#[error("record name {record} is used by two different shapes")]
	ConflictingRecord {
		/// Record type name.
		record: String,
	},
	/// Numeric or string literal cannot be represented by the destination.
	#[error("invalid literal {text:?} for {expected}")]
	InvalidLiteral {
		/// Literal token text.
		text: String,
		/// Destination primitive name.
		expected: String,
	},
	/// Nesting went deeper than the configured ceiling.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Tokens remained after the top-level value.
	#[error("trailing input after value: {kind} {text:?}")]
	TrailingInput {
		/// Token classification.
		kind: TokenKind,
		/// Literal token text.
		text: String,
	},
}
