use crate::value::{Kind, Value};
use num_traits::ToPrimitive;

/// A signed 64-bit integer.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Integer;

/// Truncates `float` toward zero, if it's finite and in range.
pub(super) fn truncate(float: f64) -> Option<i64> {
	float.to_i64()
}

impl Kind for Integer {
	type Payload = i64;

	fn empty() -> i64 {
		0
	}

	fn to_value(payload: &i64) -> Value {
		Value::Integer(*payload)
	}

	fn from_bool(boolean: bool) -> Option<i64> {
		Some(boolean.into())
	}

	fn from_int(integer: i64) -> Option<i64> {
		Some(integer)
	}

	fn from_float(float: f64) -> Option<i64> {
		truncate(float)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Boxed;
	use crate::ErrorKind;

	#[test]
	fn truncates_floats() {
		assert_eq!(truncate(2.9), Some(2));
		assert_eq!(truncate(-2.9), Some(-2));
		assert_eq!(truncate(f64::NAN), None);
		assert_eq!(truncate(f64::INFINITY), None);
		assert_eq!(truncate(1e300), None);
	}

	#[test]
	fn null_resets_unless_nullable() {
		let mut integer = Boxed::<Integer>::new(9).unwrap();
		integer.assign(Value::Null).unwrap();
		assert_eq!(integer.payload(), Some(&0));

		let mut nullable = Boxed::<Integer>::new_nullable(9).unwrap();
		nullable.assign(Value::Null).unwrap();
		assert!(nullable.is_null());
	}

	#[test]
	fn rejects_text() {
		let mut integer = Boxed::<Integer>::new(true).unwrap();
		assert_matches!(integer.assign("12").unwrap_err().kind, ErrorKind::InvalidValue { .. });
		assert_eq!(integer.payload(), Some(&1));
	}
}
