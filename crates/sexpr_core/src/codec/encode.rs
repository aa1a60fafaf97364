use std::fmt::Write;

use crate::codec::descriptor::Descriptor;
use crate::codec::error::{Result, SexprError};
use crate::codec::value::Value;

/// Render `value` as S-expression text readable by the decoder under `desc`.
///
/// `desc` supplies record aliases; dynamic slots carry their own descriptor.
pub fn encode(value: &Value, desc: &Descriptor) -> Result<String> {
	let mut out = String::new();
	write_value(&mut out, value, desc)?;
	Ok(out)
}

fn write_value(out: &mut String, value: &Value, desc: &Descriptor) -> Result<()> {
	match (value, desc) {
		(Value::Bool(true), _) => out.push('t'),
		(Value::Bool(false), _) => out.push_str("nil"),
		(Value::Int(v), _) => push_display(out, v),
		(Value::Uint(v), _) => push_display(out, v),
		(Value::F32(v), _) => push_float(out, f64::from(*v), &format!("{v:?}"))?,
		(Value::F64(v), _) => push_float(out, *v, &format!("{v:?}"))?,
		(Value::String(text), _) => out.push_str(&quote(text)),
		(Value::Complex64(c), _) => {
			out.push_str("#C(");
			push_float(out, f64::from(c.re), &format!("{:?}", c.re))?;
			out.push(' ');
			push_float(out, f64::from(c.im), &format!("{:?}", c.im))?;
			out.push(')');
		}
		(Value::Complex128(c), _) => {
			out.push_str("#C(");
			push_float(out, c.re, &format!("{:?}", c.re))?;
			out.push(' ');
			push_float(out, c.im, &format!("{:?}", c.im))?;
			out.push(')');
		}
		(Value::Array(items), Descriptor::FixedArray { elem, .. }) | (Value::Seq(items), Descriptor::Sequence(elem)) => {
			out.push('(');
			for (idx, item) in items.iter().enumerate() {
				if idx > 0 {
					out.push(' ');
				}
				write_value(out, item, elem)?;
			}
			out.push(')');
		}
		(Value::Map(map), Descriptor::Map { key, value }) => {
			out.push('(');
			for (idx, (k, v)) in map.entries.iter().enumerate() {
				if idx > 0 {
					out.push(' ');
				}
				out.push('(');
				write_value(out, k, key)?;
				out.push(' ');
				write_value(out, v, value)?;
				out.push(')');
			}
			out.push(')');
		}
		(Value::Record(record), Descriptor::Record(decl)) => {
			out.push('(');
			for (idx, field) in record.fields.iter().enumerate() {
				let Some(field_decl) = decl.fields.iter().find(|item| item.name == field.name) else {
					return Err(SexprError::Unencodable {
						what: format!("field {} missing from record {}", field.name, decl.name),
					});
				};
				if idx > 0 {
					out.push(' ');
				}
				out.push('(');
				out.push_str(&render_alias(field_decl.external_name()));
				out.push(' ');
				write_value(out, &field.value, &field_decl.ty)?;
				out.push(')');
			}
			out.push(')');
		}
		(Value::Dynamic(None), _) => out.push_str("nil"),
		(Value::Dynamic(Some(slot)), _) => {
			if !slot.ty.is_nameable() {
				return Err(SexprError::Unencodable {
					what: format!("dynamic slot holding {}", slot.ty),
				});
			}
			out.push('(');
			out.push_str(&quote(&slot.ty.to_string()));
			out.push(' ');
			write_value(out, &slot.value, &slot.ty)?;
			out.push(')');
		}
		_ => {
			return Err(SexprError::Unencodable {
				what: format!("{} value as {desc}", value.kind_name()),
			});
		}
	}
	Ok(())
}

fn push_display(out: &mut String, value: impl std::fmt::Display) {
	let _ = write!(out, "{value}");
}

fn push_float(out: &mut String, value: f64, rendered: &str) -> Result<()> {
	if !value.is_finite() {
		return Err(SexprError::NonFiniteFloat { value });
	}
	out.push_str(rendered);
	Ok(())
}

/// Quote text as a string literal using the escapes the lexer understands.
pub fn quote(text: &str) -> String {
	let mut out = String::with_capacity(text.len() + 2);
	out.push('"');
	for ch in text.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => {
				let _ = write!(out, "\\u{:04x}", c as u32);
			}
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

fn render_alias(alias: &str) -> String {
	let mut chars = alias.chars();
	let is_ident = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_') && chars.all(|c| c.is_alphanumeric() || c == '_');
	if is_ident { alias.to_owned() } else { quote(alias) }
}
