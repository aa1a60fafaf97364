use std::fmt;

/// Scalar destination kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	/// 64-bit signed integer named `int`.
	Int,
	/// `int8`
	I8,
	/// `int16`
	I16,
	/// `int32`
	I32,
	/// `int64`
	I64,
	/// 64-bit unsigned integer named `uint`.
	Uint,
	/// `uint8`
	U8,
	/// `uint16`
	U16,
	/// `uint32`
	U32,
	/// `uint64`
	U64,
	/// `float32`
	F32,
	/// `float64`
	F64,
	/// `bool`
	Bool,
	/// `string`
	String,
	/// `complex64`, two `f32` parts.
	Complex64,
	/// `complex128`, two `f64` parts.
	Complex128,
}

/// Process-wide table of primitive type names.
const NAMED_PRIMITIVES: &[(&str, Primitive)] = &[
	("int", Primitive::Int),
	("int8", Primitive::I8),
	("int16", Primitive::I16),
	("int32", Primitive::I32),
	("int64", Primitive::I64),
	("uint", Primitive::Uint),
	("uint8", Primitive::U8),
	("uint16", Primitive::U16),
	("uint32", Primitive::U32),
	("uint64", Primitive::U64),
	("float32", Primitive::F32),
	("float64", Primitive::F64),
	("bool", Primitive::Bool),
	("string", Primitive::String),
	("complex64", Primitive::Complex64),
	("complex128", Primitive::Complex128),
];

impl Primitive {
	/// Look up a primitive by its registered type name.
	pub fn from_name(name: &str) -> Option<Self> {
		NAMED_PRIMITIVES.iter().find(|(item, _)| *item == name).map(|(_, prim)| *prim)
	}

	/// Registered type name.
	pub fn name(self) -> &'static str {
		NAMED_PRIMITIVES
			.iter()
			.find(|(_, prim)| *prim == self)
			.map(|(name, _)| *name)
			.unwrap_or("?")
	}

	/// All registered primitives in registry order.
	pub fn all() -> impl Iterator<Item = Self> {
		NAMED_PRIMITIVES.iter().map(|(_, prim)| *prim)
	}

	/// Signed integer range, if this is a signed integer kind.
	pub fn signed_range(self) -> Option<(i64, i64)> {
		match self {
			Self::Int | Self::I64 => Some((i64::MIN, i64::MAX)),
			Self::I8 => Some((i8::MIN.into(), i8::MAX.into())),
			Self::I16 => Some((i16::MIN.into(), i16::MAX.into())),
			Self::I32 => Some((i32::MIN.into(), i32::MAX.into())),
			_ => None,
		}
	}

	/// Unsigned integer maximum, if this is an unsigned integer kind.
	pub fn unsigned_max(self) -> Option<u64> {
		match self {
			Self::Uint | Self::U64 => Some(u64::MAX),
			Self::U8 => Some(u8::MAX.into()),
			Self::U16 => Some(u16::MAX.into()),
			Self::U32 => Some(u32::MAX.into()),
			_ => None,
		}
	}

	/// Whether this is `float32` or `float64`.
	pub fn is_float(self) -> bool {
		matches!(self, Self::F32 | Self::F64)
	}

	/// Whether this is `complex64` or `complex128`.
	pub fn is_complex(self) -> bool {
		matches!(self, Self::Complex64 | Self::Complex128)
	}
}

/// Structural shape of a destination value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
	/// Scalar value.
	Primitive(Primitive),
	/// Array of exactly `len` elements.
	FixedArray {
		/// Declared element count.
		len: usize,
		/// Element shape.
		elem: Box<Descriptor>,
	},
	/// Growable, order-preserving sequence.
	Sequence(Box<Descriptor>),
	/// Keyed mapping.
	Map {
		/// Key shape.
		key: Box<Descriptor>,
		/// Value shape.
		value: Box<Descriptor>,
	},
	/// Record with named fields.
	Record(RecordDesc),
	/// Slot whose shape is named by the input itself.
	Dynamic,
}

/// Record type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDesc {
	/// Record type name, used to scope alias tables.
	pub name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldDesc>,
}

/// One record field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
	/// Internal field identifier.
	pub name: Box<str>,
	/// External name used in S-expression text, when it differs from `name`.
	pub alias: Option<Box<str>>,
	/// Field shape.
	pub ty: Descriptor,
}

impl FieldDesc {
	/// Create a field whose external name is its own name.
	pub fn new(name: impl Into<Box<str>>, ty: Descriptor) -> Self {
		Self {
			name: name.into(),
			alias: None,
			ty,
		}
	}

	/// Set the external alias.
	pub fn with_alias(mut self, alias: impl Into<Box<str>>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// External name: the alias if declared, otherwise the field name.
	pub fn external_name(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.name)
	}
}

impl RecordDesc {
	/// Create a record declaration.
	pub fn new(name: impl Into<Box<str>>, fields: Vec<FieldDesc>) -> Self {
		Self { name: name.into(), fields }
	}

	/// Index of the field with internal name `name`.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| &*field.name == name)
	}
}

impl Descriptor {
	/// `Sequence(elem)`
	pub fn sequence(elem: Descriptor) -> Self {
		Self::Sequence(Box::new(elem))
	}

	/// `FixedArray(len, elem)`
	pub fn array(len: usize, elem: Descriptor) -> Self {
		Self::FixedArray { len, elem: Box::new(elem) }
	}

	/// `Map(key, value)`
	pub fn map(key: Descriptor, value: Descriptor) -> Self {
		Self::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// Primitive kind, if this is a scalar descriptor.
	pub fn primitive(&self) -> Option<Primitive> {
		match self {
			Self::Primitive(prim) => Some(*prim),
			_ => None,
		}
	}

	/// Whether this descriptor can be written as a type name.
	///
	/// Records have no type-name syntax.
	pub fn is_nameable(&self) -> bool {
		match self {
			Self::Primitive(_) | Self::Dynamic => true,
			Self::FixedArray { elem, .. } | Self::Sequence(elem) => elem.is_nameable(),
			Self::Map { key, value } => key.is_nameable() && value.is_nameable(),
			Self::Record(_) => false,
		}
	}
}

impl From<Primitive> for Descriptor {
	fn from(value: Primitive) -> Self {
		Self::Primitive(value)
	}
}

impl fmt::Display for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(prim) => f.write_str(prim.name()),
			Self::FixedArray { len, elem } => write!(f, "[{len}]{elem}"),
			Self::Sequence(elem) => write!(f, "[]{elem}"),
			Self::Map { key, value } => write!(f, "map[{key}]{value}"),
			Self::Record(record) => write!(f, "record {}", record.name),
			Self::Dynamic => f.write_str("any"),
		}
	}
}
