use std::fmt;

use crate::codec::error::Position;

/// Classification of one lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// Bare identifier such as `nil`, `t`, or a field alias.
	Ident,
	/// Quoted or raw string literal, text still quoted.
	String,
	/// Decimal integer literal.
	Int,
	/// Decimal float literal.
	Float,
	/// `#` marker introducing a complex literal.
	Hash,
	/// `(`
	LParen,
	/// `)`
	RParen,
	/// End of input.
	Eof,
}

impl TokenKind {
	/// Short human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Ident => "identifier",
			Self::String => "string",
			Self::Int => "integer",
			Self::Float => "float",
			Self::Hash => "'#'",
			Self::LParen => "'('",
			Self::RParen => "')'",
			Self::Eof => "end of input",
		}
	}
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// One token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	/// Token classification.
	pub kind: TokenKind,
	/// Literal source text; empty for end of input.
	pub text: &'a str,
	/// Position of the first character.
	pub pos: Position,
}

impl<'a> Token<'a> {
	pub(crate) fn eof(pos: Position) -> Self {
		Self {
			kind: TokenKind::Eof,
			text: "",
			pos,
		}
	}
}
