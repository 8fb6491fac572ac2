use crate::value::{Kind, Value};

/// A boolean, coerced from truthiness.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Boolean;

impl Kind for Boolean {
	type Payload = bool;

	fn empty() -> bool {
		false
	}

	fn to_value(payload: &bool) -> Value {
		Value::Boolean(*payload)
	}

	fn from_bool(boolean: bool) -> Option<bool> {
		Some(boolean)
	}

	fn from_int(integer: i64) -> Option<bool> {
		Some(integer != 0)
	}

	fn from_float(float: f64) -> Option<bool> {
		Some(float != 0.0)
	}

	fn from_text(text: &str) -> Option<bool> {
		Some(!text.is_empty() && text != "0")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Boxed;

	#[test]
	fn coerces_truthiness() {
		assert_eq!(Boxed::<Boolean>::new(2).unwrap().payload(), Some(&true));
		assert_eq!(Boxed::<Boolean>::new(-0.0).unwrap().payload(), Some(&false));
		assert_eq!(Boxed::<Boolean>::new("0").unwrap().payload(), Some(&false));
		assert_eq!(Boxed::<Boolean>::new("false").unwrap().payload(), Some(&true));
		assert!(Boxed::<Boolean>::new(crate::value::Array::new()).is_err());
	}
}
