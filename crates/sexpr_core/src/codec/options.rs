/// How fixed-size arrays treat an element count different from their length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayFill {
	/// Exactly `len` elements are required.
	#[default]
	Exact,
	/// Fewer elements leave the remaining slots zero; more is still an error.
	Lax,
}

/// Which alias table resolves field names inside nested records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagScope {
	/// Every record type resolves aliases through its own table.
	#[default]
	PerRecord,
	/// The top-level record's table serves every record; nested records are
	/// matched by the internal field name the alias maps to.
	TopLevel,
}

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of lists, values and type names read from input.
	pub max_depth: u32,
	/// Largest element count a type name read from input may declare for its
	/// fixed arrays, counted across nested arrays.
	pub max_array_len: usize,
	/// Fixed-array element count policy.
	pub array_fill: ArrayFill,
	/// Record alias resolution scope.
	pub tag_scope: TagScope,
	/// Ignore tokens after the top-level value instead of failing.
	pub allow_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_array_len: 1 << 16,
			array_fill: ArrayFill::Exact,
			tag_scope: TagScope::PerRecord,
			allow_trailing: false,
		}
	}
}

impl DecodeOptions {
	/// Lenient preset matching the classic reflection-based decoder.
	pub fn compat() -> Self {
		Self {
			max_depth: 64,
			max_array_len: 1 << 16,
			array_fill: ArrayFill::Lax,
			tag_scope: TagScope::TopLevel,
			allow_trailing: true,
		}
	}
}
