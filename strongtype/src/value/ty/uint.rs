use crate::value::{Kind, Value};
use num_traits::ToPrimitive;

/// A non-negative integer, as used for shift amounts.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct UInt;

impl Kind for UInt {
	type Payload = u64;

	fn empty() -> u64 {
		0
	}

	#[allow(clippy::cast_precision_loss)]
	fn to_value(payload: &u64) -> Value {
		i64::try_from(*payload).map_or_else(|_| Value::Float(*payload as f64), Value::Integer)
	}

	fn from_bool(boolean: bool) -> Option<u64> {
		Some(boolean.into())
	}

	fn from_int(integer: i64) -> Option<u64> {
		u64::try_from(integer).ok()
	}

	fn from_float(float: f64) -> Option<u64> {
		if float < 0.0 {
			return None;
		}

		float.to_u64()
	}
}
