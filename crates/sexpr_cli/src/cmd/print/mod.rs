use std::fmt::Write as _;

use sexpr::codec::Value;

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single record.
	pub max_fields_per_record: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays, sequences and maps.
	pub max_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_record: 80,
			max_string_len: 200,
			max_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree to stdout.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	print!("{}", render_value(value, indent, depth, options));
}

/// Render one decoded value tree, one node per line.
pub fn render_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) -> String {
	let mut out = String::new();
	write_value(&mut out, value, indent, depth, options);
	out
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Bool(v) => line(out, &pad, v),
		Value::Int(v) => line(out, &pad, v),
		Value::Uint(v) => line(out, &pad, v),
		Value::F32(v) => line(out, &pad, v),
		Value::F64(v) => line(out, &pad, v),
		Value::String(v) => line(out, &pad, format_args!("\"{}\"", truncate(v, options.max_string_len))),
		Value::Complex64(v) => line(out, &pad, v),
		Value::Complex128(v) => line(out, &pad, v),
		Value::Array(items) | Value::Seq(items) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("[... {} items]", items.len()));
				return;
			}
			line(out, &pad, "[");
			for item in items.iter().take(options.max_items) {
				write_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_items {
				line(out, &pad, format_args!("  ... {} more", items.len() - options.max_items));
			}
			line(out, &pad, "]");
		}
		Value::Map(map) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("{{... {} entries}}", map.len()));
				return;
			}
			line(out, &pad, "{");
			for (key, item) in map.entries.iter().take(options.max_items) {
				let _ = write!(out, "{pad}  {} => ", inline(key, options));
				write_field(out, item, indent, depth, options);
			}
			if map.len() > options.max_items {
				line(out, &pad, format_args!("  ... {} more", map.len() - options.max_items));
			}
			line(out, &pad, "}");
		}
		Value::Record(record) => {
			if depth >= options.max_print_depth {
				line(out, &pad, format_args!("{} {{ ... }}", record.type_name));
				return;
			}
			line(out, &pad, format_args!("{} {{", record.type_name));
			for field in record.fields.iter().take(options.max_fields_per_record) {
				let _ = write!(out, "{pad}  {} = ", field.name);
				write_field(out, &field.value, indent, depth, options);
			}
			if record.fields.len() > options.max_fields_per_record {
				line(out, &pad, format_args!("  ... {} more fields", record.fields.len() - options.max_fields_per_record));
			}
			line(out, &pad, "}");
		}
		Value::Dynamic(None) => line(out, &pad, "nil"),
		Value::Dynamic(Some(slot)) => {
			let _ = write!(out, "{pad}<{}> ", slot.ty);
			write_field(out, &slot.value, indent.saturating_sub(2), depth, options);
		}
	}
}

fn write_field(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	if is_container(value) {
		out.push('\n');
		write_value(out, value, indent + 4, depth + 1, options);
	} else {
		write_value(out, value, 0, depth + 1, options);
	}
}

fn is_container(value: &Value) -> bool {
	matches!(value, Value::Array(_) | Value::Seq(_) | Value::Map(_) | Value::Record(_))
}

fn inline(value: &Value, options: PrintOptions) -> String {
	if is_container(value) {
		return format!("<{}>", value.kind_name());
	}
	render_value(value, 0, 0, options).trim_end().to_owned()
}

fn line(out: &mut String, pad: &str, text: impl std::fmt::Display) {
	let _ = writeln!(out, "{pad}{text}");
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
