use std::path::PathBuf;

use sexpr::codec::{type_of, unmarshal_value_with};
use tracing::info;

use crate::cmd::json::value_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{decode_options, read_input};

/// Decode `path` against `type_name` and print the value tree.
pub fn run(path: PathBuf, type_name: &str, json: bool, compat: bool) -> sexpr::codec::Result<()> {
	let desc = type_of(type_name)?;
	let data = read_input(&path)?;
	let value = unmarshal_value_with(&data, &desc, &decode_options(compat))?;
	info!(path = %path.display(), descriptor = %desc, "decoded");

	if json {
		println!("{:#}", value_json(&value));
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("type: {desc}");
	println!("decoded:");
	print_value(&value, 0, 0, PrintOptions::default());
	Ok(())
}
