use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::codec::descriptor::{Descriptor, RecordDesc};
use crate::codec::error::DecodeErrorKind;
use crate::codec::options::TagScope;

/// Alias table for one record type, mapping external alias to internal field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
	aliases: HashMap<Box<str>, Box<str>>,
}

impl TagMap {
	/// Build the table from a record's declared fields.
	pub fn build(record: &RecordDesc) -> Result<Self, DecodeErrorKind> {
		let mut aliases: HashMap<Box<str>, Box<str>> = HashMap::with_capacity(record.fields.len());
		for field in &record.fields {
			match aliases.entry(Box::from(field.external_name())) {
				Entry::Occupied(slot) => {
					return Err(DecodeErrorKind::DuplicateAlias {
						record: record.name.to_string(),
						alias: slot.key().to_string(),
					});
				}
				Entry::Vacant(slot) => {
					slot.insert(field.name.clone());
				}
			}
		}
		Ok(Self { aliases })
	}

	/// Internal field name for an external alias.
	pub fn resolve(&self, alias: &str) -> Option<&str> {
		self.aliases.get(alias).map(|name| &**name)
	}

	/// Number of aliases.
	pub fn len(&self) -> usize {
		self.aliases.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.aliases.is_empty()
	}
}

/// Alias tables for the records reachable from one destination descriptor.
///
/// Built once per top-level decode and shared by every recursive call.
#[derive(Debug)]
pub struct TagTable<'d> {
	scope: TagScope,
	top: TagMap,
	records: HashMap<&'d str, (&'d RecordDesc, TagMap)>,
}

impl<'d> TagTable<'d> {
	/// Build tables for `desc` under the given scope.
	pub fn build(desc: &'d Descriptor, scope: TagScope) -> Result<Self, DecodeErrorKind> {
		let mut table = Self {
			scope,
			top: TagMap::default(),
			records: HashMap::new(),
		};
		match scope {
			TagScope::TopLevel => {
				if let Descriptor::Record(record) = desc {
					table.top = TagMap::build(record)?;
				}
			}
			TagScope::PerRecord => table.collect(desc)?,
		}
		Ok(table)
	}

	fn collect(&mut self, desc: &'d Descriptor) -> Result<(), DecodeErrorKind> {
		match desc {
			Descriptor::Primitive(_) | Descriptor::Dynamic => Ok(()),
			Descriptor::FixedArray { elem, .. } | Descriptor::Sequence(elem) => self.collect(elem),
			Descriptor::Map { key, value } => {
				self.collect(key)?;
				self.collect(value)
			}
			Descriptor::Record(record) => {
				if let Some((seen, _)) = self.records.get(&*record.name) {
					if *seen != record {
						return Err(DecodeErrorKind::ConflictingRecord {
							record: record.name.to_string(),
						});
					}
					return Ok(());
				}
				self.records.insert(&*record.name, (record, TagMap::build(record)?));
				for field in &record.fields {
					self.collect(&field.ty)?;
				}
				Ok(())
			}
		}
	}

	/// Index of the field of `record` named by `alias`.
	pub fn resolve(&self, record: &RecordDesc, alias: &str) -> Result<usize, DecodeErrorKind> {
		self.map_for(record)
			.and_then(|map| map.resolve(alias))
			.and_then(|name| record.field_index(name))
			.ok_or_else(|| DecodeErrorKind::UnknownField {
				record: record.name.to_string(),
				alias: alias.to_owned(),
			})
	}

	/// Alias table used for `record`, if one was built.
	pub fn map_for(&self, record: &RecordDesc) -> Option<&TagMap> {
		match self.scope {
			TagScope::TopLevel => Some(&self.top),
			TagScope::PerRecord => self.records.get(&*record.name).map(|(_, map)| map),
		}
	}
}

#[cfg(test)]
mod tests;
