use serde_json::{Map, Number, Value as Json, json};
use sexpr::codec::Value;

/// Convert a decoded value to JSON.
///
/// Maps become `[{"key", "value"}]` lists since keys need not be strings;
/// non-finite floats become `null`.
pub fn value_json(value: &Value) -> Json {
	match value {
		Value::Bool(v) => Json::Bool(*v),
		Value::Int(v) => json!(v),
		Value::Uint(v) => json!(v),
		Value::F32(v) => float_json(f64::from(*v)),
		Value::F64(v) => float_json(*v),
		Value::String(v) => Json::String(v.clone()),
		Value::Complex64(c) => json!({ "re": float_json(f64::from(c.re)), "im": float_json(f64::from(c.im)) }),
		Value::Complex128(c) => json!({ "re": float_json(c.re), "im": float_json(c.im) }),
		Value::Array(items) | Value::Seq(items) => Json::Array(items.iter().map(value_json).collect()),
		Value::Map(map) => Json::Array(
			map.entries
				.iter()
				.map(|(k, v)| json!({ "key": value_json(k), "value": value_json(v) }))
				.collect(),
		),
		Value::Record(record) => {
			let mut fields = Map::new();
			for field in &record.fields {
				fields.insert(field.name.to_string(), value_json(&field.value));
			}
			json!({ "type": &*record.type_name, "fields": fields })
		}
		Value::Dynamic(None) => Json::Null,
		Value::Dynamic(Some(slot)) => json!({ "type": slot.ty.to_string(), "value": value_json(&slot.value) }),
	}
}

fn float_json(value: f64) -> Json {
	Number::from_f64(value).map(Json::Number).unwrap_or(Json::Null)
}
