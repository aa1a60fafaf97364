use std::fmt;

use crate::codec::descriptor::{Descriptor, Primitive};

/// Complex number with real and imaginary parts of type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
	/// Real part.
	pub re: T,
	/// Imaginary part.
	pub im: T,
}

impl<T> Complex<T> {
	/// Create a complex number from its parts.
	pub fn new(re: T, im: T) -> Self {
		Self { re, im }
	}
}

impl<T: fmt::Display + PartialOrd + Default> fmt::Display for Complex<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.im < T::default() {
			write!(f, "{}{}i", self.re, self.im)
		} else {
			write!(f, "{}+{}i", self.re, self.im)
		}
	}
}

/// Decoded runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// `bool`
	Bool(bool),
	/// Any signed integer width.
	Int(i64),
	/// Any unsigned integer width.
	Uint(u64),
	/// `float32`
	F32(f32),
	/// `float64`
	F64(f64),
	/// `string`
	String(String),
	/// `complex64`
	Complex64(Complex<f32>),
	/// `complex128`
	Complex128(Complex<f64>),
	/// Fixed-size array.
	Array(Vec<Value>),
	/// Growable sequence.
	Seq(Vec<Value>),
	/// Keyed mapping.
	Map(MapValue),
	/// Record with named fields.
	Record(RecordValue),
	/// Dynamically typed slot; `None` when empty.
	Dynamic(Option<Box<DynamicValue>>),
}

/// Map entries in first-insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
	/// Key/value pairs; keys are unique.
	pub entries: Vec<(Value, Value)>,
}

impl MapValue {
	/// Insert or overwrite the value stored under `key`.
	pub fn insert(&mut self, key: Value, value: Value) {
		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some(slot) => slot.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Decoded record instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	/// Record type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

impl RecordValue {
	/// Value of the field with internal name `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Remove and return a field value, leaving the record without it.
	pub fn take(&mut self, name: &str) -> Option<Value> {
		let idx = self.fields.iter().position(|field| &*field.name == name)?;
		Some(self.fields.remove(idx).value)
	}
}

/// One named record field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Internal field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

/// Populated dynamic slot: the shape named in the input and the value read with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
	/// Resolved descriptor.
	pub ty: Descriptor,
	/// Decoded value.
	pub value: Value,
}

impl Value {
	/// Zero value for a descriptor.
	pub fn zero(desc: &Descriptor) -> Self {
		match desc {
			Descriptor::Primitive(prim) => zero_primitive(*prim),
			Descriptor::FixedArray { len, elem } => Self::Array((0..*len).map(|_| Self::zero(elem)).collect()),
			Descriptor::Sequence(_) => Self::Seq(Vec::new()),
			Descriptor::Map { .. } => Self::Map(MapValue::default()),
			Descriptor::Record(record) => Self::Record(RecordValue {
				type_name: record.name.clone(),
				fields: record
					.fields
					.iter()
					.map(|field| FieldValue {
						name: field.name.clone(),
						value: Self::zero(&field.ty),
					})
					.collect(),
			}),
			Descriptor::Dynamic => Self::Dynamic(None),
		}
	}

	/// Short name of the value variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Uint(_) => "uint",
			Self::F32(_) => "float32",
			Self::F64(_) => "float64",
			Self::String(_) => "string",
			Self::Complex64(_) => "complex64",
			Self::Complex128(_) => "complex128",
			Self::Array(_) => "array",
			Self::Seq(_) => "sequence",
			Self::Map(_) => "map",
			Self::Record(_) => "record",
			Self::Dynamic(_) => "dynamic",
		}
	}
}

fn zero_primitive(prim: Primitive) -> Value {
	match prim {
		Primitive::Int | Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64 => Value::Int(0),
		Primitive::Uint | Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 => Value::Uint(0),
		Primitive::F32 => Value::F32(0.0),
		Primitive::F64 => Value::F64(0.0),
		Primitive::Bool => Value::Bool(false),
		Primitive::String => Value::String(String::new()),
		Primitive::Complex64 => Value::Complex64(Complex::default()),
		Primitive::Complex128 => Value::Complex128(Complex::default()),
	}
}
