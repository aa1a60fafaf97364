use std::path::PathBuf;

use sexpr::codec::{encode, type_of, unmarshal_value_with};

use crate::cmd::util::{decode_options, read_input};

/// Decode `path` against `type_name` and print its canonical encoding.
pub fn run(path: PathBuf, type_name: &str, compat: bool) -> sexpr::codec::Result<()> {
	let desc = type_of(type_name)?;
	let data = read_input(&path)?;
	let value = unmarshal_value_with(&data, &desc, &decode_options(compat))?;
	println!("{}", encode(&value, &desc)?);
	Ok(())
}
