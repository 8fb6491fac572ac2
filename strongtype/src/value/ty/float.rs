use crate::value::{Kind, Value};

#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Float;

impl Kind for Float {
	type Payload = f64;

	fn empty() -> f64 {
		0.0
	}

	fn to_value(payload: &f64) -> Value {
		Value::Float(*payload)
	}

	#[allow(clippy::cast_precision_loss)]
	fn from_int(integer: i64) -> Option<f64> {
		Some(integer as f64)
	}

	fn from_float(float: f64) -> Option<f64> {
		Some(float)
	}
}
