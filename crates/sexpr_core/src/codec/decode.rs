use tracing::{debug, trace};

use crate::codec::descriptor::{Descriptor, Primitive, RecordDesc};
use crate::codec::error::{DecodeErrorKind, Position, Result, SexprError};
use crate::codec::lexer::{Lexer, unquote};
use crate::codec::options::{ArrayFill, DecodeOptions};
use crate::codec::tags::TagTable;
use crate::codec::token::TokenKind;
use crate::codec::typename::parse_type_name;
use crate::codec::value::{Complex, DynamicValue, FieldValue, MapValue, RecordValue, Value};

type Step<T> = std::result::Result<T, DecodeErrorKind>;

/// Decode one S-expression document against `desc` with default options.
pub fn unmarshal_value(data: &[u8], desc: &Descriptor) -> Result<Value> {
	unmarshal_value_with(data, desc, &DecodeOptions::default())
}

/// Decode one S-expression document against `desc`.
///
/// Any failure aborts the whole decode and reports the position of the token
/// being examined.
pub fn unmarshal_value_with(data: &[u8], desc: &Descriptor, opt: &DecodeOptions) -> Result<Value> {
	debug!(descriptor = %desc, len = data.len(), "unmarshal");
	let lex = Lexer::new(data)?;
	let tags = TagTable::build(desc, opt.tag_scope).map_err(|kind| SexprError::Decode {
		pos: Position::start(),
		kind,
	})?;

	let mut decoder = Decoder { lex, tags, opt };
	match decoder.run(desc) {
		Ok(value) => Ok(value),
		Err(kind) => {
			let pos = decoder.lex.pos();
			debug!(%pos, %kind, "unmarshal failed");
			Err(SexprError::Decode { pos, kind })
		}
	}
}

struct Decoder<'a, 'd> {
	lex: Lexer<'a>,
	tags: TagTable<'d>,
	opt: &'d DecodeOptions,
}

impl<'a, 'd> Decoder<'a, 'd> {
	fn run(&mut self, desc: &Descriptor) -> Step<Value> {
		self.lex.next()?;
		let value = self.read(desc, 0)?;
		if !self.opt.allow_trailing && self.lex.kind() != TokenKind::Eof {
			return Err(DecodeErrorKind::TrailingInput {
				kind: self.lex.kind(),
				text: self.lex.text().to_owned(),
			});
		}
		Ok(value)
	}

	/// Read one complete value, leaving the lexer on the token after it.
	fn read(&mut self, desc: &Descriptor, depth: u32) -> Step<Value> {
		if depth > self.opt.max_depth {
			return Err(DecodeErrorKind::DepthExceeded { max_depth: self.opt.max_depth });
		}

		let token = self.lex.token();
		trace!(kind = %token.kind, text = token.text, descriptor = %desc, depth, "read");
		match token.kind {
			TokenKind::Ident => match token.text {
				"nil" => {
					self.lex.next()?;
					Ok(Value::zero(desc))
				}
				"t" if desc.primitive() == Some(Primitive::Bool) => {
					self.lex.next()?;
					Ok(Value::Bool(true))
				}
				_ => Err(self.unexpected(desc)),
			},
			TokenKind::String => {
				if desc.primitive() != Some(Primitive::String) {
					return Err(self.unexpected(desc));
				}
				let text = unquote(token.text)?;
				self.lex.next()?;
				Ok(Value::String(text))
			}
			TokenKind::Int => self.read_int(desc),
			TokenKind::Float => self.read_float(desc),
			TokenKind::Hash => self.read_complex(desc),
			TokenKind::LParen => {
				self.lex.next()?;
				let value = self.read_list(desc, depth)?;
				self.lex.consume(TokenKind::RParen)?;
				Ok(value)
			}
			TokenKind::RParen => Err(self.unexpected(desc)),
			TokenKind::Eof => Err(DecodeErrorKind::PrematureEnd),
		}
	}

	fn read_int(&mut self, desc: &Descriptor) -> Step<Value> {
		let Some(prim) = desc.primitive() else {
			return Err(self.unexpected(desc));
		};
		if prim.is_float() {
			return self.read_float(desc);
		}

		let text = self.lex.text();
		let invalid = || DecodeErrorKind::InvalidLiteral {
			text: text.to_owned(),
			expected: prim.name().to_owned(),
		};
		let value = if let Some((min, max)) = prim.signed_range() {
			let parsed = text.parse::<i64>().map_err(|_| invalid())?;
			if parsed < min || parsed > max {
				return Err(invalid());
			}
			Value::Int(parsed)
		} else if let Some(max) = prim.unsigned_max() {
			let parsed = text.parse::<u64>().map_err(|_| invalid())?;
			if parsed > max {
				return Err(invalid());
			}
			Value::Uint(parsed)
		} else {
			return Err(self.unexpected(desc));
		};

		self.lex.next()?;
		Ok(value)
	}

	fn read_float(&mut self, desc: &Descriptor) -> Step<Value> {
		let text = self.lex.text();
		let invalid = |expected: &str| DecodeErrorKind::InvalidLiteral {
			text: text.to_owned(),
			expected: expected.to_owned(),
		};
		let value = match desc.primitive() {
			Some(Primitive::F32) => Value::F32(text.parse().map_err(|_| invalid("float32"))?),
			Some(Primitive::F64) => Value::F64(text.parse().map_err(|_| invalid("float64"))?),
			_ => return Err(self.unexpected(desc)),
		};
		self.lex.next()?;
		Ok(value)
	}

	/// `# [C] ( re im )`
	fn read_complex(&mut self, desc: &Descriptor) -> Step<Value> {
		let prim = desc
			.primitive()
			.filter(|prim| prim.is_complex())
			.ok_or_else(|| DecodeErrorKind::UnsupportedType { name: desc.to_string() })?;

		self.lex.next()?;
		if self.lex.kind() == TokenKind::Ident && self.lex.text() == "C" {
			self.lex.next()?;
		}
		self.expect_in_complex(TokenKind::LParen)?;
		let re = self.complex_part()?;
		let im = self.complex_part()?;
		self.expect_in_complex(TokenKind::RParen)?;

		let invalid = |text: &str| DecodeErrorKind::InvalidLiteral {
			text: text.to_owned(),
			expected: prim.name().to_owned(),
		};
		if prim == Primitive::Complex64 {
			let re = re.parse::<f32>().map_err(|_| invalid(re))?;
			let im = im.parse::<f32>().map_err(|_| invalid(im))?;
			Ok(Value::Complex64(Complex::new(re, im)))
		} else {
			let re = re.parse::<f64>().map_err(|_| invalid(re))?;
			let im = im.parse::<f64>().map_err(|_| invalid(im))?;
			Ok(Value::Complex128(Complex::new(re, im)))
		}
	}

	fn expect_in_complex(&mut self, want: TokenKind) -> Step<()> {
		match self.lex.kind() {
			kind if kind == want => {
				self.lex.next()?;
				Ok(())
			}
			TokenKind::Eof => Err(DecodeErrorKind::PrematureEnd),
			kind => Err(DecodeErrorKind::MalformedComplex {
				kind,
				text: self.lex.text().to_owned(),
			}),
		}
	}

	fn complex_part(&mut self) -> Step<&'a str> {
		match self.lex.kind() {
			TokenKind::Int | TokenKind::Float => {
				let text = self.lex.text();
				self.lex.next()?;
				Ok(text)
			}
			TokenKind::Eof => Err(DecodeErrorKind::PrematureEnd),
			kind => Err(DecodeErrorKind::MalformedComplex {
				kind,
				text: self.lex.text().to_owned(),
			}),
		}
	}

	/// Read list contents after `(`, stopping on (not consuming) the closing `)`.
	fn read_list(&mut self, desc: &Descriptor, depth: u32) -> Step<Value> {
		match desc {
			Descriptor::FixedArray { len, elem } => {
				let mut items = Vec::new();
				while !self.end_list()? {
					if items.len() == *len {
						return Err(DecodeErrorKind::ArityMismatch {
							expected: *len,
							got: items.len() + 1,
						});
					}
					items.push(self.read(elem, depth + 1)?);
				}
				if items.len() < *len {
					if self.opt.array_fill == ArrayFill::Exact {
						return Err(DecodeErrorKind::ArityMismatch {
							expected: *len,
							got: items.len(),
						});
					}
					items.resize_with(*len, || Value::zero(elem));
				}
				Ok(Value::Array(items))
			}
			Descriptor::Sequence(elem) => {
				let mut items = Vec::new();
				while !self.end_list()? {
					items.push(self.read(elem, depth + 1)?);
				}
				Ok(Value::Seq(items))
			}
			Descriptor::Record(record) => self.read_record(record, depth),
			Descriptor::Map { key, value } => {
				let mut map = MapValue::default();
				while !self.end_list()? {
					self.lex.consume(TokenKind::LParen)?;
					let k = self.read(key, depth + 1)?;
					let v = self.read(value, depth + 1)?;
					map.insert(k, v);
					self.lex.consume(TokenKind::RParen)?;
				}
				Ok(Value::Map(map))
			}
			Descriptor::Dynamic => {
				let token = self.lex.token();
				match token.kind {
					TokenKind::String => {}
					TokenKind::Eof => return Err(DecodeErrorKind::PrematureEnd),
					kind => {
						return Err(DecodeErrorKind::UnexpectedToken {
							kind,
							text: token.text.to_owned(),
							expected: "type name string".to_owned(),
						});
					}
				}
				let ty = parse_type_name(&unquote(token.text)?, self.opt)?;
				self.lex.next()?;
				let value = self.read(&ty, depth + 1)?;
				Ok(Value::Dynamic(Some(Box::new(DynamicValue { ty, value }))))
			}
			Descriptor::Primitive(_) => Err(DecodeErrorKind::ListIntoScalar { name: desc.to_string() }),
		}
	}

	/// `((alias value) ...)`
	fn read_record(&mut self, record: &RecordDesc, depth: u32) -> Step<Value> {
		let mut fields: Vec<FieldValue> = record
			.fields
			.iter()
			.map(|field| FieldValue {
				name: field.name.clone(),
				value: Value::zero(&field.ty),
			})
			.collect();

		while !self.end_list()? {
			self.lex.consume(TokenKind::LParen)?;
			let token = self.lex.token();
			let alias = match token.kind {
				TokenKind::Ident => token.text.to_owned(),
				TokenKind::String => unquote(token.text)?,
				TokenKind::Eof => return Err(DecodeErrorKind::PrematureEnd),
				kind => {
					return Err(DecodeErrorKind::UnexpectedToken {
						kind,
						text: token.text.to_owned(),
						expected: format!("field name of {}", record.name),
					});
				}
			};
			let idx = self.tags.resolve(record, &alias)?;
			self.lex.next()?;
			fields[idx].value = self.read(&record.fields[idx].ty, depth + 1)?;
			self.lex.consume(TokenKind::RParen)?;
		}

		Ok(Value::Record(RecordValue {
			type_name: record.name.clone(),
			fields,
		}))
	}

	fn end_list(&self) -> Step<bool> {
		match self.lex.kind() {
			TokenKind::Eof => Err(DecodeErrorKind::PrematureEnd),
			TokenKind::RParen => Ok(true),
			_ => Ok(false),
		}
	}

	fn unexpected(&self, desc: &Descriptor) -> DecodeErrorKind {
		DecodeErrorKind::UnexpectedToken {
			kind: self.lex.kind(),
			text: self.lex.text().to_owned(),
			expected: desc.to_string(),
		}
	}
}

#[cfg(test)]
mod tests;
