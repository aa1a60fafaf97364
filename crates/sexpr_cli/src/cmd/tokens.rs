use std::path::PathBuf;

use serde::Serialize;
use sexpr::codec::tokenize;

use crate::cmd::util::read_input;

#[derive(Serialize)]
struct TokenRow<'a> {
	kind: String,
	text: &'a str,
	line: u32,
	column: u32,
	offset: usize,
}

/// Print every token of the document at `path`.
pub fn run(path: PathBuf, json: bool) -> sexpr::codec::Result<()> {
	let data = read_input(&path)?;
	let tokens = tokenize(&data)?;

	if json {
		let rows: Vec<TokenRow<'_>> = tokens
			.iter()
			.map(|token| TokenRow {
				kind: format!("{:?}", token.kind),
				text: token.text,
				line: token.pos.line,
				column: token.pos.column,
				offset: token.pos.offset,
			})
			.collect();
		println!("{:#}", serde_json::json!(rows));
		return Ok(());
	}

	for token in &tokens {
		println!("{:>5}  {:<12} {}", token.pos.to_string(), token.kind.label(), token.text);
	}
	Ok(())
}
