use std::io::Read;
use std::path::Path;

use sexpr::codec::{DecodeOptions, Result};

/// Read a whole input document; `-` reads stdin.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	if path.as_os_str() == "-" {
		let mut out = Vec::new();
		std::io::stdin().read_to_end(&mut out)?;
		return Ok(out);
	}
	Ok(std::fs::read(path)?)
}

/// Decode options selected by the `--compat` flag.
pub(crate) fn decode_options(compat: bool) -> DecodeOptions {
	if compat { DecodeOptions::compat() } else { DecodeOptions::default() }
}
