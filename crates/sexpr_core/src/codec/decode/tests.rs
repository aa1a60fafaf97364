use pretty_assertions::assert_eq;

use super::{unmarshal_value, unmarshal_value_with};
use crate::codec::descriptor::{Descriptor, FieldDesc, Primitive, RecordDesc};
use crate::codec::error::{DecodeErrorKind, Position, SexprError};
use crate::codec::options::{ArrayFill, DecodeOptions, TagScope};
use crate::codec::token::TokenKind;
use crate::codec::value::{Complex, DynamicValue, FieldValue, MapValue, RecordValue, Value};

fn int() -> Descriptor {
	Primitive::Int.into()
}

fn string() -> Descriptor {
	Primitive::String.into()
}

fn person() -> Descriptor {
	Descriptor::Record(RecordDesc::new(
		"Person",
		vec![FieldDesc::new("Name", string()), FieldDesc::new("Age", int())],
	))
}

fn decode(src: &str, desc: &Descriptor) -> Value {
	unmarshal_value(src.as_bytes(), desc).expect("decode succeeds")
}

fn failure(src: &str, desc: &Descriptor) -> (Position, DecodeErrorKind) {
	failure_with(src, desc, &DecodeOptions::default())
}

fn failure_with(src: &str, desc: &Descriptor, opt: &DecodeOptions) -> (Position, DecodeErrorKind) {
	match unmarshal_value_with(src.as_bytes(), desc, opt) {
		Err(SexprError::Decode { pos, kind }) => (pos, kind),
		other => panic!("expected decode failure for {src:?}, got {other:?}"),
	}
}

fn record(type_name: &str, fields: Vec<(&str, Value)>) -> Value {
	Value::Record(RecordValue {
		type_name: type_name.into(),
		fields: fields
			.into_iter()
			.map(|(name, value)| FieldValue { name: name.into(), value })
			.collect(),
	})
}

#[test]
fn nil_yields_zero_value_of_every_kind() {
	let cases = vec![
		(int(), Value::Int(0)),
		(Primitive::U16.into(), Value::Uint(0)),
		(Primitive::F32.into(), Value::F32(0.0)),
		(Primitive::Bool.into(), Value::Bool(false)),
		(string(), Value::String(String::new())),
		(Primitive::Complex128.into(), Value::Complex128(Complex::default())),
		(Descriptor::array(2, int()), Value::Array(vec![Value::Int(0), Value::Int(0)])),
		(Descriptor::sequence(int()), Value::Seq(Vec::new())),
		(Descriptor::map(string(), int()), Value::Map(MapValue::default())),
		(person(), record("Person", vec![("Name", Value::String(String::new())), ("Age", Value::Int(0))])),
		(Descriptor::Dynamic, Value::Dynamic(None)),
	];
	for (desc, want) in cases {
		assert_eq!(decode("nil", &desc), want, "nil into {desc}");
	}
}

#[test]
fn t_is_true_only_for_bool() {
	assert_eq!(decode("t", &Primitive::Bool.into()), Value::Bool(true));
	let (_, kind) = failure("t", &int());
	assert!(matches!(kind, DecodeErrorKind::UnexpectedToken { kind: TokenKind::Ident, .. }));
}

#[test]
fn scalars_decode_at_declared_kind() {
	assert_eq!(decode("42", &int()), Value::Int(42));
	assert_eq!(decode("-42", &Primitive::I8.into()), Value::Int(-42));
	assert_eq!(decode("200", &Primitive::U8.into()), Value::Uint(200));
	assert_eq!(decode("2.5", &Primitive::F64.into()), Value::F64(2.5));
	assert_eq!(decode("0.1", &Primitive::F32.into()), Value::F32(0.1));
	assert_eq!(decode("3", &Primitive::F64.into()), Value::F64(3.0));
	assert_eq!(decode(r#""line\nbreak""#, &string()), Value::String("line\nbreak".to_owned()));
}

#[test]
fn out_of_range_integers_are_invalid_literals() {
	assert!(matches!(failure("300", &Primitive::I8.into()).1, DecodeErrorKind::InvalidLiteral { .. }));
	assert!(matches!(failure("-1", &Primitive::Uint.into()).1, DecodeErrorKind::InvalidLiteral { .. }));
	assert!(matches!(
		failure("99999999999999999999", &int()).1,
		DecodeErrorKind::InvalidLiteral { .. }
	));
}

#[test]
fn mismatched_scalar_tokens_are_unexpected() {
	assert!(matches!(failure("1.5", &int()).1, DecodeErrorKind::UnexpectedToken { kind: TokenKind::Float, .. }));
	assert!(matches!(failure("\"x\"", &int()).1, DecodeErrorKind::UnexpectedToken { kind: TokenKind::String, .. }));
	assert!(matches!(failure("7", &string()).1, DecodeErrorKind::UnexpectedToken { kind: TokenKind::Int, .. }));
	assert!(matches!(failure(")", &int()).1, DecodeErrorKind::UnexpectedToken { kind: TokenKind::RParen, .. }));
	assert!(matches!(failure("bogus", &int()).1, DecodeErrorKind::UnexpectedToken { kind: TokenKind::Ident, .. }));
}

#[test]
fn fixed_array_requires_exact_length() {
	let three = Descriptor::array(3, int());
	assert_eq!(decode("(1 2 3)", &three), Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));

	let (pos, kind) = failure("(1 2 3)", &Descriptor::array(2, int()));
	assert_eq!(kind, DecodeErrorKind::ArityMismatch { expected: 2, got: 3 });
	assert_eq!(pos.column, 6);

	let (_, kind) = failure("(1 2 3)", &Descriptor::array(4, int()));
	assert_eq!(kind, DecodeErrorKind::ArityMismatch { expected: 4, got: 3 });
}

#[test]
fn lax_arrays_zero_fill_but_still_reject_overflow() {
	let opt = DecodeOptions {
		array_fill: ArrayFill::Lax,
		..DecodeOptions::default()
	};
	let got = unmarshal_value_with(b"(1 2)", &Descriptor::array(4, int()), &opt).expect("short fill decodes");
	assert_eq!(got, Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(0), Value::Int(0)]));

	let (_, kind) = failure_with("(1 2 3)", &Descriptor::array(2, int()), &opt);
	assert_eq!(kind, DecodeErrorKind::ArityMismatch { expected: 2, got: 3 });
}

#[test]
fn sequence_takes_any_length() {
	assert_eq!(
		decode("(1 2 3)", &Descriptor::sequence(int())),
		Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
	);
	assert_eq!(decode("()", &Descriptor::sequence(int())), Value::Seq(Vec::new()));
}

#[test]
fn record_fields_resolve_through_aliases() {
	let got = decode(r#"(("Name" "Bob") ("Age" 30))"#, &person());
	assert_eq!(got, record("Person", vec![("Name", Value::String("Bob".to_owned())), ("Age", Value::Int(30))]));

	let got = decode("((Age 7))", &person());
	assert_eq!(got, record("Person", vec![("Name", Value::String(String::new())), ("Age", Value::Int(7))]));
}

#[test]
fn explicit_alias_replaces_field_name() {
	let desc = Descriptor::Record(RecordDesc::new(
		"Movie",
		vec![FieldDesc::new("title", string()).with_alias("Title")],
	));
	assert_eq!(
		decode(r#"((Title "Casablanca"))"#, &desc),
		record("Movie", vec![("title", Value::String("Casablanca".to_owned()))])
	);
	assert!(matches!(failure(r#"((title "x"))"#, &desc).1, DecodeErrorKind::UnknownField { .. }));
}

#[test]
fn unknown_alias_is_reported_at_alias() {
	let (pos, kind) = failure(r#"(("Name" "Bob") ("Nickname" "B"))"#, &person());
	assert_eq!(
		kind,
		DecodeErrorKind::UnknownField {
			record: "Person".to_owned(),
			alias: "Nickname".to_owned(),
		}
	);
	assert_eq!(pos.column, 18);
}

#[test]
fn record_field_must_be_a_pair() {
	assert!(matches!(failure("(Name)", &person()).1, DecodeErrorKind::UnexpectedToken { .. }));
	assert!(matches!(failure("((1 2))", &person()).1, DecodeErrorKind::UnexpectedToken { .. }));
	assert!(matches!(
		failure(r#"((Name "a" "b"))"#, &person()).1,
		DecodeErrorKind::UnexpectedToken { kind: TokenKind::String, .. }
	));
}

#[test]
fn nested_records_use_their_own_aliases() {
	let point = RecordDesc::new(
		"Point",
		vec![FieldDesc::new("x", int()).with_alias("X"), FieldDesc::new("y", int()).with_alias("Y")],
	);
	let shape = Descriptor::Record(RecordDesc::new(
		"Shape",
		vec![
			FieldDesc::new("name", string()).with_alias("Name"),
			FieldDesc::new("points", Descriptor::sequence(Descriptor::Record(point))),
		],
	));
	let src = r#"((Name "tri") (points (((X 1) (Y 2)) ((X 3)))))"#;
	let got = decode(src, &shape);
	let want = record(
		"Shape",
		vec![
			("name", Value::String("tri".to_owned())),
			(
				"points",
				Value::Seq(vec![
					record("Point", vec![("x", Value::Int(1)), ("y", Value::Int(2))]),
					record("Point", vec![("x", Value::Int(3)), ("y", Value::Int(0))]),
				]),
			),
		],
	);
	assert_eq!(got, want);

	let compat = DecodeOptions {
		tag_scope: TagScope::TopLevel,
		..DecodeOptions::default()
	};
	let (_, kind) = failure_with(src, &shape, &compat);
	assert_eq!(
		kind,
		DecodeErrorKind::UnknownField {
			record: "Point".to_owned(),
			alias: "X".to_owned(),
		}
	);
}

#[test]
fn map_entries_overwrite_repeated_keys() {
	let desc = Descriptor::map(string(), int());
	let got = decode(r#"(("a" 1) ("b" 2) ("a" 3))"#, &desc);
	let Value::Map(map) = got else {
		panic!("expected map");
	};
	assert_eq!(
		map.entries,
		vec![
			(Value::String("a".to_owned()), Value::Int(3)),
			(Value::String("b".to_owned()), Value::Int(2)),
		]
	);
}

#[test]
fn dynamic_slot_reads_embedded_type_name() {
	let got = decode(r#"("[]int" (1 2 3))"#, &Descriptor::Dynamic);
	assert_eq!(
		got,
		Value::Dynamic(Some(Box::new(DynamicValue {
			ty: Descriptor::sequence(int()),
			value: Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
		})))
	);

	let got = decode(r#"("map[string]int" (("x" 1)))"#, &Descriptor::Dynamic);
	let mut map = MapValue::default();
	map.insert(Value::String("x".to_owned()), Value::Int(1));
	assert_eq!(
		got,
		Value::Dynamic(Some(Box::new(DynamicValue {
			ty: Descriptor::map(string(), int()),
			value: Value::Map(map),
		})))
	);
}

#[test]
fn dynamic_slot_rejects_unknown_type_name() {
	let (pos, kind) = failure(r#"("frob" 1)"#, &Descriptor::Dynamic);
	assert_eq!(kind, DecodeErrorKind::UnsupportedType { name: "frob".to_owned() });
	assert_eq!(pos.column, 2);

	assert!(matches!(
		failure("(int 1)", &Descriptor::Dynamic).1,
		DecodeErrorKind::UnexpectedToken { kind: TokenKind::Ident, .. }
	));
}

#[test]
fn dynamic_slot_inside_a_sequence() {
	let desc = Descriptor::sequence(Descriptor::Dynamic);
	let got = decode(r#"(("string" "hi") nil ("[2]bool" (t nil)))"#, &desc);
	let Value::Seq(items) = got else {
		panic!("expected sequence");
	};
	assert_eq!(items.len(), 3);
	assert_eq!(items[1], Value::Dynamic(None));
	assert_eq!(
		items[2],
		Value::Dynamic(Some(Box::new(DynamicValue {
			ty: Descriptor::array(2, Primitive::Bool.into()),
			value: Value::Array(vec![Value::Bool(true), Value::Bool(false)]),
		})))
	);
}

#[test]
fn dynamic_slot_may_name_another_dynamic_slot() {
	let got = decode(r#"("[]any" (("int" 1) nil))"#, &Descriptor::Dynamic);
	let inner = Value::Dynamic(Some(Box::new(DynamicValue {
		ty: int(),
		value: Value::Int(1),
	})));
	assert_eq!(
		got,
		Value::Dynamic(Some(Box::new(DynamicValue {
			ty: Descriptor::sequence(Descriptor::Dynamic),
			value: Value::Seq(vec![inner, Value::Dynamic(None)]),
		})))
	);
}

#[test]
fn complex_literals_decode_at_declared_width() {
	assert_eq!(
		decode("# (1.5 2.5)", &Primitive::Complex128.into()),
		Value::Complex128(Complex::new(1.5, 2.5))
	);
	assert_eq!(
		decode("#C(1 -2)", &Primitive::Complex64.into()),
		Value::Complex64(Complex::new(1.0, -2.0))
	);
}

#[test]
fn complex_literal_into_other_kind_is_unsupported() {
	let (_, kind) = failure("# (1.5 2.5)", &Primitive::F64.into());
	assert_eq!(kind, DecodeErrorKind::UnsupportedType { name: "float64".to_owned() });
}

#[test]
fn malformed_complex_literals_are_rejected() {
	let c128: Descriptor = Primitive::Complex128.into();
	assert!(matches!(failure("#(1.5 x)", &c128).1, DecodeErrorKind::MalformedComplex { .. }));
	assert!(matches!(failure("# 1.5 2.5", &c128).1, DecodeErrorKind::MalformedComplex { .. }));
	assert!(matches!(failure("#(1.5 2.5 3.5)", &c128).1, DecodeErrorKind::MalformedComplex { .. }));
	assert_eq!(failure("#(1.5", &c128).1, DecodeErrorKind::PrematureEnd);
}

#[test]
fn truncated_input_is_premature_end() {
	let (pos, kind) = failure("(1 2", &Descriptor::sequence(int()));
	assert_eq!(kind, DecodeErrorKind::PrematureEnd);
	assert_eq!(pos.offset, 4);

	assert_eq!(failure("", &int()).1, DecodeErrorKind::PrematureEnd);
	assert_eq!(failure(r#"(("a" 1"#, &Descriptor::map(string(), int())).1, DecodeErrorKind::PrematureEnd);
	assert_eq!(failure("((Name", &person()).1, DecodeErrorKind::PrematureEnd);
	assert_eq!(failure("(\"[]int\"", &Descriptor::Dynamic).1, DecodeErrorKind::PrematureEnd);
}

#[test]
fn list_into_scalar_is_rejected() {
	assert_eq!(
		failure("(1)", &int()).1,
		DecodeErrorKind::ListIntoScalar { name: "int".to_owned() }
	);
}

#[test]
fn trailing_tokens_follow_options() {
	let (_, kind) = failure("1 2", &int());
	assert_eq!(
		kind,
		DecodeErrorKind::TrailingInput {
			kind: TokenKind::Int,
			text: "2".to_owned(),
		}
	);
	let got = unmarshal_value_with(b"1 2", &int(), &DecodeOptions::compat()).expect("compat ignores trailing input");
	assert_eq!(got, Value::Int(1));
}

#[test]
fn nesting_beyond_max_depth_fails() {
	let mut desc = int();
	for _ in 0..6 {
		desc = Descriptor::sequence(desc);
	}
	let opt = DecodeOptions {
		max_depth: 3,
		..DecodeOptions::default()
	};
	let (_, kind) = failure_with("((((((1))))))", &desc, &opt);
	assert_eq!(kind, DecodeErrorKind::DepthExceeded { max_depth: 3 });
	assert!(unmarshal_value(b"((((((1))))))", &desc).is_ok());
}

#[test]
fn dynamic_type_name_cannot_declare_a_huge_array() {
	let (pos, kind) = failure(r#"("[100000000000000000]int" ())"#, &Descriptor::Dynamic);
	assert_eq!(
		kind,
		DecodeErrorKind::UnsupportedType {
			name: "[100000000000000000]int".to_owned()
		}
	);
	assert_eq!(pos.column, 2);

	let opt = DecodeOptions {
		max_array_len: 4,
		array_fill: ArrayFill::Lax,
		..DecodeOptions::default()
	};
	let got = unmarshal_value_with(br#"("[4]int" (7))"#, &Descriptor::Dynamic, &opt).expect("array within cap decodes");
	assert_eq!(
		got,
		Value::Dynamic(Some(Box::new(DynamicValue {
			ty: Descriptor::array(4, int()),
			value: Value::Array(vec![Value::Int(7), Value::Int(0), Value::Int(0), Value::Int(0)]),
		})))
	);
	let (_, kind) = failure_with(r#"("[2][3]int" nil)"#, &Descriptor::Dynamic, &opt);
	assert_eq!(kind, DecodeErrorKind::UnsupportedType { name: "[2][3]int".to_owned() });
}

#[test]
fn dynamic_type_name_nesting_is_bounded() {
	let src = format!("(\"{}int\" nil)", "[]".repeat(200_000));
	let (_, kind) = failure(&src, &Descriptor::Dynamic);
	assert_eq!(kind, DecodeErrorKind::DepthExceeded { max_depth: 64 });

	let opt = DecodeOptions {
		max_depth: 3,
		..DecodeOptions::default()
	};
	let (_, kind) = failure_with(r#"("[][][][]int" nil)"#, &Descriptor::Dynamic, &opt);
	assert_eq!(kind, DecodeErrorKind::DepthExceeded { max_depth: 3 });
	assert!(unmarshal_value_with(br#"("[][][]int" nil)"#, &Descriptor::Dynamic, &opt).is_ok());
}

#[test]
fn duplicate_alias_fails_before_reading() {
	let desc = Descriptor::Record(RecordDesc::new(
		"Clash",
		vec![FieldDesc::new("a", int()).with_alias("k"), FieldDesc::new("b", int()).with_alias("k")],
	));
	let (pos, kind) = failure("()", &desc);
	assert!(matches!(kind, DecodeErrorKind::DuplicateAlias { .. }));
	assert_eq!(pos, Position { offset: 0, line: 1, column: 1 });
}

#[test]
fn decoding_is_deterministic() {
	let first = unmarshal_value(b"(1 2", &Descriptor::sequence(int())).expect_err("truncated");
	let second = unmarshal_value(b"(1 2", &Descriptor::sequence(int())).expect_err("truncated");
	assert_eq!(first.to_string(), second.to_string());
}
