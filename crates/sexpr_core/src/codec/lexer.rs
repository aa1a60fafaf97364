use tracing::trace;

use crate::codec::error::{DecodeErrorKind, Position, Result, SexprError};
use crate::codec::token::{Token, TokenKind};

/// Single-token-lookahead scanner over S-expression text.
///
/// The lexer starts before the first token; call [`Lexer::next`] once to
/// load it. Whitespace and `;`, `//`, `/* */` comments are skipped.
pub struct Lexer<'a> {
	src: &'a str,
	at: Position,
	token: Token<'a>,
}

impl<'a> Lexer<'a> {
	/// Create a lexer over raw bytes, which must be valid UTF-8.
	///
	/// Invalid input fails at the position of the first bad byte.
	pub fn new(data: &'a [u8]) -> Result<Self> {
		match std::str::from_utf8(data) {
			Ok(src) => Ok(Self::from_text(src)),
			Err(err) => {
				let valid = String::from_utf8_lossy(&data[..err.valid_up_to()]);
				let mut pos = Position::start();
				valid.chars().for_each(|ch| pos.advance(ch));
				Err(SexprError::Decode {
					pos,
					kind: DecodeErrorKind::Lex {
						reason: format!("input is not utf-8 ({err})"),
					},
				})
			}
		}
	}

	/// Create a lexer over text.
	pub fn from_text(src: &'a str) -> Self {
		let at = Position::start();
		Self {
			src,
			at,
			token: Token::eof(at),
		}
	}

	/// Current token.
	pub fn token(&self) -> Token<'a> {
		self.token
	}

	/// Classification of the current token.
	pub fn kind(&self) -> TokenKind {
		self.token.kind
	}

	/// Literal text of the current token.
	pub fn text(&self) -> &'a str {
		self.token.text
	}

	/// Position of the current token.
	pub fn pos(&self) -> Position {
		self.token.pos
	}

	/// Advance to the next token.
	///
	/// On failure the current position moves to where scanning stopped.
	pub fn next(&mut self) -> std::result::Result<Token<'a>, DecodeErrorKind> {
		match self.skip_trivia().and_then(|()| self.scan()) {
			Ok(token) => {
				trace!(kind = %token.kind, text = token.text, pos = %token.pos, "token");
				self.token = token;
				Ok(token)
			}
			Err(kind) => {
				self.token.pos = self.at;
				Err(kind)
			}
		}
	}

	/// Require the current token to be `want`, then advance past it.
	pub fn consume(&mut self, want: TokenKind) -> std::result::Result<(), DecodeErrorKind> {
		if self.token.kind == want {
			self.next()?;
			return Ok(());
		}
		if self.token.kind == TokenKind::Eof {
			return Err(DecodeErrorKind::PrematureEnd);
		}
		Err(DecodeErrorKind::UnexpectedToken {
			kind: self.token.kind,
			text: self.token.text.to_owned(),
			expected: want.label().to_owned(),
		})
	}

	fn rest(&self) -> &'a str {
		&self.src[self.at.offset..]
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn peek_second(&self) -> Option<char> {
		self.rest().chars().nth(1)
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.at.advance(ch);
		Some(ch)
	}

	fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
		while self.peek().is_some_and(&pred) {
			self.bump();
		}
	}

	fn lex_error(&self, reason: impl Into<String>) -> DecodeErrorKind {
		DecodeErrorKind::Lex { reason: reason.into() }
	}

	fn skip_trivia(&mut self) -> std::result::Result<(), DecodeErrorKind> {
		loop {
			match (self.peek(), self.peek_second()) {
				(Some(' ' | '\t' | '\r' | '\n'), _) => {
					self.bump();
				}
				(Some(';'), _) | (Some('/'), Some('/')) => self.bump_while(|ch| ch != '\n'),
				(Some('/'), Some('*')) => {
					let start = self.at;
					self.bump();
					self.bump();
					loop {
						match self.bump() {
							Some('*') if self.peek() == Some('/') => {
								self.bump();
								break;
							}
							Some(_) => {}
							None => return Err(self.lex_error(format!("unterminated block comment opened at {start}"))),
						}
					}
				}
				_ => return Ok(()),
			}
		}
	}

	fn scan(&mut self) -> std::result::Result<Token<'a>, DecodeErrorKind> {
		let start = self.at;
		let Some(ch) = self.peek() else {
			return Ok(Token::eof(start));
		};

		let kind = match ch {
			'(' => {
				self.bump();
				TokenKind::LParen
			}
			')' => {
				self.bump();
				TokenKind::RParen
			}
			'#' => {
				self.bump();
				TokenKind::Hash
			}
			'"' => self.scan_quoted()?,
			'`' => self.scan_raw()?,
			c if c.is_alphabetic() || c == '_' => {
				self.bump_while(|c| c.is_alphanumeric() || c == '_');
				TokenKind::Ident
			}
			c if self.starts_number(c) => self.scan_number()?,
			c => return Err(self.lex_error(format!("unexpected character {c:?}"))),
		};

		Ok(Token {
			kind,
			text: &self.src[start.offset..self.at.offset],
			pos: start,
		})
	}

	fn starts_number(&self, first: char) -> bool {
		let mut chars = self.rest().chars();
		chars.next();
		let second = chars.next();
		let third = chars.next();
		match first {
			'0'..='9' => true,
			'.' => second.is_some_and(|c| c.is_ascii_digit()),
			'-' => match second {
				Some(c) if c.is_ascii_digit() => true,
				Some('.') => third.is_some_and(|c| c.is_ascii_digit()),
				_ => false,
			},
			_ => false,
		}
	}

	fn scan_number(&mut self) -> std::result::Result<TokenKind, DecodeErrorKind> {
		let mut kind = TokenKind::Int;
		if self.peek() == Some('-') {
			self.bump();
		}
		self.bump_while(|c| c.is_ascii_digit());
		if self.peek() == Some('.') {
			self.bump();
			self.bump_while(|c| c.is_ascii_digit());
			kind = TokenKind::Float;
		}
		if matches!(self.peek(), Some('e' | 'E')) {
			self.bump();
			if matches!(self.peek(), Some('+' | '-')) {
				self.bump();
			}
			if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
				return Err(self.lex_error("exponent has no digits"));
			}
			self.bump_while(|c| c.is_ascii_digit());
			kind = TokenKind::Float;
		}
		Ok(kind)
	}

	fn scan_quoted(&mut self) -> std::result::Result<TokenKind, DecodeErrorKind> {
		self.bump();
		loop {
			match self.bump() {
				Some('"') => return Ok(TokenKind::String),
				Some('\\') => {
					if self.bump().is_none() {
						return Err(self.lex_error("unterminated string literal"));
					}
				}
				Some('\n') => return Err(self.lex_error("newline in string literal")),
				Some(_) => {}
				None => return Err(self.lex_error("unterminated string literal")),
			}
		}
	}

	fn scan_raw(&mut self) -> std::result::Result<TokenKind, DecodeErrorKind> {
		self.bump();
		loop {
			match self.bump() {
				Some('`') => return Ok(TokenKind::String),
				Some(_) => {}
				None => return Err(self.lex_error("unterminated raw string literal")),
			}
		}
	}
}

/// Split a whole document into tokens, ending with the end-of-input token.
pub fn tokenize(data: &[u8]) -> Result<Vec<Token<'_>>> {
	let mut lex = Lexer::new(data)?;
	let mut out = Vec::new();
	loop {
		let token = lex.next().map_err(|kind| SexprError::Decode { pos: lex.pos(), kind })?;
		out.push(token);
		if token.kind == TokenKind::Eof {
			return Ok(out);
		}
	}
}

/// Decode the contents of a string token, quoted or raw.
pub fn unquote(text: &str) -> std::result::Result<String, DecodeErrorKind> {
	let invalid = |reason: &str| DecodeErrorKind::Lex {
		reason: format!("{reason} in {text:?}"),
	};

	if let Some(raw) = text.strip_prefix('`').and_then(|inner| inner.strip_suffix('`')) {
		return Ok(raw.replace('\r', ""));
	}
	let Some(body) = text.strip_prefix('"').and_then(|inner| inner.strip_suffix('"')) else {
		return Err(invalid("missing quotes"));
	};

	let mut out = String::with_capacity(body.len());
	let mut chars = body.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			out.push(ch);
			continue;
		}
		let Some(esc) = chars.next() else {
			return Err(invalid("dangling escape"));
		};
		let decoded = match esc {
			'a' => '\u{07}',
			'b' => '\u{08}',
			'f' => '\u{0c}',
			'n' => '\n',
			'r' => '\r',
			't' => '\t',
			'v' => '\u{0b}',
			'\\' => '\\',
			'"' => '"',
			'\'' => '\'',
			'0'..='7' => {
				let mut code = esc.to_digit(8).unwrap_or(0);
				for _ in 0..2 {
					let digit = chars.next().and_then(|c| c.to_digit(8)).ok_or_else(|| invalid("bad octal escape"))?;
					code = code * 8 + digit;
				}
				if code > 0x7f {
					return Err(invalid("octal escape beyond ascii"));
				}
				char::from_u32(code).ok_or_else(|| invalid("bad octal escape"))?
			}
			'x' => read_hex(&mut chars, 2)
				.filter(char::is_ascii)
				.ok_or_else(|| invalid("bad or non-ascii \\x escape"))?,
			'u' => read_hex(&mut chars, 4).ok_or_else(|| invalid("bad \\u escape"))?,
			'U' => read_hex(&mut chars, 8).ok_or_else(|| invalid("bad \\U escape"))?,
			_ => return Err(invalid("unknown escape")),
		};
		out.push(decoded);
	}
	Ok(out)
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
	let mut code = 0_u32;
	for _ in 0..digits {
		code = code * 16 + chars.next()?.to_digit(16)?;
	}
	char::from_u32(code)
}
