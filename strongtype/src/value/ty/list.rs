use crate::value::{Array, Kind, Value};

/// An ordered, keyed collection.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct List;

impl Kind for List {
	type Payload = Array;

	fn empty() -> Array {
		Array::new()
	}

	fn to_value(payload: &Array) -> Value {
		Value::Array(payload.clone())
	}

	fn from_array(array: &Array) -> Option<Array> {
		Some(array.clone())
	}
}
