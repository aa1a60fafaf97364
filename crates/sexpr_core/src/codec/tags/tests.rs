use pretty_assertions::assert_eq;

use super::{TagMap, TagTable};
use crate::codec::descriptor::{Descriptor, FieldDesc, Primitive, RecordDesc};
use crate::codec::error::DecodeErrorKind;
use crate::codec::options::TagScope;

fn inner() -> RecordDesc {
	RecordDesc::new(
		"Inner",
		vec![
			FieldDesc::new("id", Primitive::Int.into()).with_alias("Id"),
			FieldDesc::new("label", Primitive::String.into()),
		],
	)
}

fn outer() -> Descriptor {
	Descriptor::Record(RecordDesc::new(
		"Outer",
		vec![
			FieldDesc::new("name", Primitive::String.into()).with_alias("Name"),
			FieldDesc::new("children", Descriptor::sequence(Descriptor::Record(inner()))),
		],
	))
}

#[test]
fn aliases_default_to_field_names() {
	let map = TagMap::build(&inner()).expect("tag map builds");
	assert_eq!(map.len(), 2);
	assert_eq!(map.resolve("Id"), Some("id"));
	assert_eq!(map.resolve("label"), Some("label"));
	assert_eq!(map.resolve("id"), None);
}

#[test]
fn duplicate_alias_is_rejected() {
	let record = RecordDesc::new(
		"Clash",
		vec![
			FieldDesc::new("a", Primitive::Int.into()).with_alias("B"),
			FieldDesc::new("B", Primitive::Int.into()),
		],
	);
	assert_eq!(
		TagMap::build(&record),
		Err(DecodeErrorKind::DuplicateAlias {
			record: "Clash".to_owned(),
			alias: "B".to_owned(),
		})
	);
}

#[test]
fn per_record_scope_uses_each_records_own_table() {
	let desc = outer();
	let table = TagTable::build(&desc, TagScope::PerRecord).expect("table builds");
	let Descriptor::Record(top) = &desc else {
		panic!("outer is a record");
	};

	assert_eq!(table.resolve(top, "Name"), Ok(0));
	assert_eq!(table.resolve(&inner(), "Id"), Ok(0));
	assert_eq!(table.resolve(&inner(), "label"), Ok(1));
	assert!(matches!(table.resolve(&inner(), "Name"), Err(DecodeErrorKind::UnknownField { .. })));
}

#[test]
fn top_level_scope_resolves_nested_fields_by_internal_name() {
	let desc = outer();
	let table = TagTable::build(&desc, TagScope::TopLevel).expect("table builds");

	// "Name" maps to internal "name", which Inner does not have.
	assert!(matches!(table.resolve(&inner(), "Name"), Err(DecodeErrorKind::UnknownField { .. })));
	assert!(matches!(table.resolve(&inner(), "Id"), Err(DecodeErrorKind::UnknownField { .. })));
	assert_eq!(table.map_for(&inner()).map(TagMap::len), Some(2));
}

#[test]
fn nested_duplicate_alias_is_found_up_front() {
	let bad = RecordDesc::new(
		"Bad",
		vec![
			FieldDesc::new("x", Primitive::Int.into()).with_alias("k"),
			FieldDesc::new("y", Primitive::Int.into()).with_alias("k"),
		],
	);
	let desc = Descriptor::map(Primitive::String.into(), Descriptor::Record(bad));
	assert!(matches!(
		TagTable::build(&desc, TagScope::PerRecord),
		Err(DecodeErrorKind::DuplicateAlias { .. })
	));
}

#[test]
fn same_name_with_different_shape_conflicts() {
	let a = RecordDesc::new("Point", vec![FieldDesc::new("x", Primitive::Int.into())]);
	let b = RecordDesc::new("Point", vec![FieldDesc::new("y", Primitive::Int.into())]);
	let desc = Descriptor::Record(RecordDesc::new(
		"Pair",
		vec![FieldDesc::new("a", Descriptor::Record(a)), FieldDesc::new("b", Descriptor::Record(b))],
	));
	assert_eq!(
		TagTable::build(&desc, TagScope::PerRecord).map(|_| ()),
		Err(DecodeErrorKind::ConflictingRecord { record: "Point".to_owned() })
	);
}
