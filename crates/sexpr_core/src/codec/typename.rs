use tracing::trace;

use crate::codec::descriptor::{Descriptor, Primitive};
use crate::codec::error::{DecodeErrorKind, Result, SexprError};
use crate::codec::options::DecodeOptions;

type Step<T> = std::result::Result<T, DecodeErrorKind>;

/// Parse a textual type name such as `[]int`, `[3]uint8`, or
/// `map[string][]float64` into a descriptor. `any` names a dynamic slot.
///
/// Nesting and fixed-array sizes are capped by the default [`DecodeOptions`].
pub fn type_of(name: &str) -> Result<Descriptor> {
	parse_type_name(name, &DecodeOptions::default()).map_err(|_| SexprError::UnsupportedTypeName { name: name.to_owned() })
}

/// Parse a type name under the nesting and array-size limits of `opt`.
pub(crate) fn parse_type_name(name: &str, opt: &DecodeOptions) -> Step<Descriptor> {
	let parser = TypeNameParser {
		whole: name,
		max_depth: opt.max_depth,
		max_array_len: opt.max_array_len,
	};
	let parsed = parser.parse(name, 0, opt.max_array_len)?;
	trace!(name, descriptor = %parsed, "resolved type name");
	Ok(parsed)
}

struct TypeNameParser<'n> {
	whole: &'n str,
	max_depth: u32,
	max_array_len: usize,
}

impl TypeNameParser<'_> {
	/// `budget` is how many elements an array at this level may still declare;
	/// nested fixed arrays share it multiplicatively.
	fn parse(&self, name: &str, depth: u32, budget: usize) -> Step<Descriptor> {
		if depth > self.max_depth {
			return Err(DecodeErrorKind::DepthExceeded { max_depth: self.max_depth });
		}
		if let Some(prim) = Primitive::from_name(name) {
			return Ok(prim.into());
		}
		if name == "any" {
			return Ok(Descriptor::Dynamic);
		}

		if let Some(rest) = name.strip_prefix("[]") {
			return Ok(Descriptor::sequence(self.parse(rest, depth + 1, self.max_array_len)?));
		}

		if let Some(rest) = name.strip_prefix('[') {
			let close = rest.find(']').ok_or_else(|| self.unsupported())?;
			let len = parse_len(&rest[..close]).ok_or_else(|| self.unsupported())?;
			if len > budget {
				return Err(self.unsupported());
			}
			let elem = self.parse(&rest[close + 1..], depth + 1, budget / len.max(1))?;
			return Ok(Descriptor::array(len, elem));
		}

		if let Some(rest) = name.strip_prefix("map[") {
			let close = matching_close(rest).ok_or_else(|| self.unsupported())?;
			let key = self.parse(&rest[..close], depth + 1, self.max_array_len)?;
			let value = self.parse(&rest[close + 1..], depth + 1, self.max_array_len)?;
			return Ok(Descriptor::map(key, value));
		}

		Err(self.unsupported())
	}

	fn unsupported(&self) -> DecodeErrorKind {
		DecodeErrorKind::UnsupportedType { name: self.whole.to_owned() }
	}
}

fn parse_len(text: &str) -> Option<usize> {
	if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	text.parse().ok()
}

/// Index of the `]` closing a bracket already opened before `text`.
fn matching_close(text: &str) -> Option<usize> {
	let mut depth = 1_usize;
	for (idx, byte) in text.bytes().enumerate() {
		match byte {
			b'[' => depth += 1,
			b']' => {
				depth -= 1;
				if depth == 0 {
					return Some(idx);
				}
			}
			_ => {}
		}
	}
	None
}
