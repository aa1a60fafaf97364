use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::codec::decode::unmarshal_value_with;
use crate::codec::descriptor::{Descriptor, Primitive};
use crate::codec::encode::encode;
use crate::codec::error::{Result, SexprError};
use crate::codec::options::DecodeOptions;
use crate::codec::value::{Complex, DynamicValue, MapValue, Value};

/// Rust type with a static S-expression shape.
///
/// Implemented for scalars, `String`, `Vec`, arrays, maps and [`Dynamic`];
/// records implement it through [`record!`](crate::record).
pub trait Shape: Sized {
	/// Descriptor of the type's shape.
	fn descriptor() -> Descriptor;
	/// Convert a decoded value into `Self`.
	fn from_value(value: Value) -> Result<Self>;
	/// Convert `self` into a value tree.
	fn to_value(&self) -> Value;
}

/// Decode `data` into `out` using the destination's own descriptor.
pub fn unmarshal<T: Shape>(data: &[u8], out: &mut T) -> Result<()> {
	unmarshal_with(data, out, &DecodeOptions::default())
}

/// Decode `data` into `out` with explicit options.
///
/// On failure `out` is left unchanged.
pub fn unmarshal_with<T: Shape>(data: &[u8], out: &mut T, opt: &DecodeOptions) -> Result<()> {
	let value = unmarshal_value_with(data, &T::descriptor(), opt)?;
	*out = T::from_value(value)?;
	Ok(())
}

/// Decode `data` into a new `T`.
pub fn from_bytes<T: Shape>(data: &[u8]) -> Result<T> {
	T::from_value(unmarshal_value_with(data, &T::descriptor(), &DecodeOptions::default())?)
}

/// Encode `value` as S-expression text.
pub fn marshal<T: Shape>(value: &T) -> Result<String> {
	encode(&value.to_value(), &T::descriptor())
}

pub(crate) fn mismatch(expected: &'static str, got: &Value) -> SexprError {
	SexprError::ValueMismatch {
		expected,
		got: got.kind_name(),
	}
}

macro_rules! int_shape {
	($variant:ident, $wide:ty; $($ty:ty => $prim:ident),*) => {
		$(
			impl Shape for $ty {
				fn descriptor() -> Descriptor {
					Primitive::$prim.into()
				}

				fn from_value(value: Value) -> Result<Self> {
					match value {
						Value::$variant(v) => <$ty>::try_from(v).map_err(|_| SexprError::ValueMismatch {
							expected: Primitive::$prim.name(),
							got: "out-of-range integer",
						}),
						other => Err(mismatch(Primitive::$prim.name(), &other)),
					}
				}

				fn to_value(&self) -> Value {
					Value::$variant(<$wide>::from(*self))
				}
			}
		)*
	};
}

int_shape!(Int, i64; i8 => I8, i16 => I16, i32 => I32, i64 => I64);
int_shape!(Uint, u64; u8 => U8, u16 => U16, u32 => U32, u64 => U64);

macro_rules! plain_shape {
	($ty:ty, $prim:ident, $variant:ident) => {
		impl Shape for $ty {
			fn descriptor() -> Descriptor {
				Primitive::$prim.into()
			}

			fn from_value(value: Value) -> Result<Self> {
				match value {
					Value::$variant(v) => Ok(v),
					other => Err(mismatch(Primitive::$prim.name(), &other)),
				}
			}

			fn to_value(&self) -> Value {
				Value::$variant(self.clone())
			}
		}
	};
}

plain_shape!(f32, F32, F32);
plain_shape!(f64, F64, F64);
plain_shape!(bool, Bool, Bool);
plain_shape!(String, String, String);
plain_shape!(Complex<f32>, Complex64, Complex64);
plain_shape!(Complex<f64>, Complex128, Complex128);

impl<T: Shape> Shape for Vec<T> {
	fn descriptor() -> Descriptor {
		Descriptor::sequence(T::descriptor())
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(mismatch("sequence", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::Seq(self.iter().map(Shape::to_value).collect())
	}
}

impl<T: Shape, const N: usize> Shape for [T; N] {
	fn descriptor() -> Descriptor {
		Descriptor::array(N, T::descriptor())
	}

	fn from_value(value: Value) -> Result<Self> {
		let items = match value {
			Value::Array(items) => items,
			other => return Err(mismatch("array", &other)),
		};
		let got = items.len();
		let items = items.into_iter().map(T::from_value).collect::<Result<Vec<T>>>()?;
		items.try_into().map_err(|_| SexprError::ValueMismatch {
			expected: "array of declared length",
			got: if got < N { "shorter array" } else { "longer array" },
		})
	}

	fn to_value(&self) -> Value {
		Value::Array(self.iter().map(Shape::to_value).collect())
	}
}

fn map_entries<K: Shape, V: Shape>(value: Value) -> Result<impl Iterator<Item = Result<(K, V)>>> {
	match value {
		Value::Map(map) => Ok(map.entries.into_iter().map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))),
		other => Err(mismatch("map", &other)),
	}
}

impl<K: Shape + Eq + Hash, V: Shape> Shape for HashMap<K, V> {
	fn descriptor() -> Descriptor {
		Descriptor::map(K::descriptor(), V::descriptor())
	}

	fn from_value(value: Value) -> Result<Self> {
		map_entries(value)?.collect()
	}

	fn to_value(&self) -> Value {
		Value::Map(MapValue {
			entries: self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
		})
	}
}

impl<K: Shape + Ord, V: Shape> Shape for BTreeMap<K, V> {
	fn descriptor() -> Descriptor {
		Descriptor::map(K::descriptor(), V::descriptor())
	}

	fn from_value(value: Value) -> Result<Self> {
		map_entries(value)?.collect()
	}

	fn to_value(&self) -> Value {
		Value::Map(MapValue {
			entries: self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
		})
	}
}

/// Dynamically typed slot whose shape is named by the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dynamic(pub Option<Box<DynamicValue>>);

impl Dynamic {
	/// Box a typed value together with its descriptor.
	pub fn of<T: Shape>(value: &T) -> Self {
		Self(Some(Box::new(DynamicValue {
			ty: T::descriptor(),
			value: value.to_value(),
		})))
	}

	/// Descriptor of the held value.
	pub fn ty(&self) -> Option<&Descriptor> {
		self.0.as_ref().map(|slot| &slot.ty)
	}

	/// Held value.
	pub fn value(&self) -> Option<&Value> {
		self.0.as_ref().map(|slot| &slot.value)
	}

	/// Convert the held value to `T` if the slot holds exactly `T`'s shape.
	pub fn downcast<T: Shape>(&self) -> Option<Result<T>> {
		let slot = self.0.as_ref()?;
		if slot.ty != T::descriptor() {
			return None;
		}
		Some(T::from_value(slot.value.clone()))
	}
}

impl Shape for Dynamic {
	fn descriptor() -> Descriptor {
		Descriptor::Dynamic
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Dynamic(slot) => Ok(Self(slot)),
			other => Err(mismatch("dynamic", &other)),
		}
	}

	fn to_value(&self) -> Value {
		Value::Dynamic(self.0.clone())
	}
}

/// Implement [`Shape`] for a struct by listing its fields.
///
/// Each field may carry an external alias with `as "Alias"`; without one the
/// field's own name is used.
///
/// ```
/// #[derive(Debug, Default, PartialEq)]
/// struct Movie {
/// 	title: String,
/// 	year: i64,
/// }
///
/// sexpr::record!(Movie {
/// 	title: String as "Title",
/// 	year: i64 as "Released",
/// });
///
/// let movie: Movie = sexpr::codec::from_bytes(br#"((Title "Casablanca") (Released 1942))"#).unwrap();
/// assert_eq!(movie.year, 1942);
/// ```
#[macro_export]
macro_rules! record {
	($name:ident { $($field:ident : $ty:ty $(as $alias:literal)?),* $(,)? }) => {
		impl $crate::codec::Shape for $name {
			fn descriptor() -> $crate::codec::Descriptor {
				$crate::codec::Descriptor::Record($crate::codec::RecordDesc::new(
					stringify!($name),
					vec![$({
						let field = $crate::codec::FieldDesc::new(
							stringify!($field),
							<$ty as $crate::codec::Shape>::descriptor(),
						);
						$(let field = field.with_alias($alias);)?
						field
					}),*],
				))
			}

			fn from_value(value: $crate::codec::Value) -> $crate::codec::Result<Self> {
				#[allow(unused_mut)]
				let mut record = match value {
					$crate::codec::Value::Record(record) => record,
					other => {
						return Err($crate::codec::SexprError::ValueMismatch {
							expected: concat!("record ", stringify!($name)),
							got: other.kind_name(),
						});
					}
				};
				Ok(Self {
					$($field: <$ty as $crate::codec::Shape>::from_value(record.take(stringify!($field)).ok_or(
						$crate::codec::SexprError::ValueMismatch {
							expected: concat!("field ", stringify!($field)),
							got: "missing field",
						},
					)?)?,)*
				})
			}

			fn to_value(&self) -> $crate::codec::Value {
				$crate::codec::Value::Record($crate::codec::RecordValue {
					type_name: stringify!($name).into(),
					fields: vec![$($crate::codec::FieldValue {
						name: stringify!($field).into(),
						value: $crate::codec::Shape::to_value(&self.$field),
					}),*],
				})
			}
		}
	};
}
