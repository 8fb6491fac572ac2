use crate::value::{Kind, Value};

/// A string.
///
/// Numbers are rendered in their shortest round-trip form, and booleans as `"1"` or `""`.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Text;

impl Kind for Text {
	type Payload = String;

	fn empty() -> String {
		String::new()
	}

	fn to_value(payload: &String) -> Value {
		Value::Text(payload.clone())
	}

	fn from_bool(boolean: bool) -> Option<String> {
		Some(if boolean { "1" } else { "" }.to_string())
	}

	fn from_int(integer: i64) -> Option<String> {
		Some(integer.to_string())
	}

	fn from_float(float: f64) -> Option<String> {
		Some(float.to_string())
	}

	fn from_text(text: &str) -> Option<String> {
		Some(text.to_string())
	}
}
