//! Loose and strict equality between [`Value`]s.

use crate::value::{Array, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
	Integer(i64),
	Float(f64),
}

impl Number {
	#[allow(clippy::cast_precision_loss)]
	fn to_float(self) -> f64 {
		match self {
			Self::Integer(integer) => integer as f64,
			Self::Float(float) => float,
		}
	}

	fn numeric_eq(self, rhs: Self) -> bool {
		match (self, rhs) {
			(Self::Integer(l), Self::Integer(r)) => l == r,
			(l, r) => l.to_float() == r.to_float(),
		}
	}
}

/// Parses `text` as a numeric string, allowing surrounding whitespace.
fn numeric(text: &str) -> Option<Number> {
	let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());

	if trimmed.is_empty() {
		return None;
	}

	if let Ok(integer) = trimmed.parse::<i64>() {
		return Some(Number::Integer(integer));
	}

	// `f64::from_str` also accepts things like `inf` and `NaN`, which aren't numeric strings.
	if !trimmed.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
		return None;
	}

	trimmed.parse::<f64>().ok().map(Number::Float)
}

fn number_text(number: Number) -> String {
	match number {
		Number::Integer(integer) => integer.to_string(),
		Number::Float(float) => float.to_string(),
	}
}

fn as_number(value: &Value) -> Option<Number> {
	match value {
		Value::Integer(integer) => Some(Number::Integer(*integer)),
		Value::Float(float) => Some(Number::Float(*float)),
		_ => None,
	}
}

fn loose_eq_number_text(number: Number, text: &str) -> bool {
	match numeric(text) {
		Some(parsed) => number.numeric_eq(parsed),
		None => number_text(number) == text,
	}
}

fn loose_eq_arrays(lhs: &Array, rhs: &Array) -> bool {
	lhs.len() == rhs.len()
		&& lhs.iter().all(|(key, value)| rhs.get(key).map_or(false, |other| loose_eq(value, other)))
}

fn strict_eq_arrays(lhs: &Array, rhs: &Array) -> bool {
	lhs.len() == rhs.len()
		&& lhs.iter().zip(rhs.iter()).all(|((lk, lv), (rk, rv))| lk == rk && strict_eq(lv, rv))
}

pub(super) fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
	if let Value::Boxed(boxed) = lhs {
		return loose_eq(&boxed.payload_value(), rhs);
	}

	if let Value::Boxed(boxed) = rhs {
		return loose_eq(lhs, &boxed.payload_value());
	}

	match (lhs, rhs) {
		(Value::Null, Value::Null) => true,
		(Value::Boolean(l), r) | (r, Value::Boolean(l)) => *l == r.is_truthy(),
		(Value::Null, Value::Text(text)) | (Value::Text(text), Value::Null) => text.is_empty(),
		(Value::Null, other) | (other, Value::Null) => !other.is_truthy(),
		(Value::Text(l), Value::Text(r)) => match (numeric(l), numeric(r)) {
			(Some(l), Some(r)) => l.numeric_eq(r),
			_ => l == r,
		},
		(Value::Text(text), other) | (other, Value::Text(text)) => {
			as_number(other).map_or(false, |number| loose_eq_number_text(number, text))
		}
		(Value::Array(l), Value::Array(r)) => loose_eq_arrays(l, r),
		(Value::Object(l), Value::Object(r)) => l.ptr_eq(r),
		(Value::Resource(l), Value::Resource(r)) => l.id() == r.id(),
		(l, r) => match (as_number(l), as_number(r)) {
			(Some(l), Some(r)) => l.numeric_eq(r),
			_ => false,
		},
	}
}

pub(super) fn strict_eq(lhs: &Value, rhs: &Value) -> bool {
	if let Value::Boxed(boxed) = lhs {
		return strict_eq(&boxed.payload_value(), rhs);
	}

	if let Value::Boxed(boxed) = rhs {
		return strict_eq(lhs, &boxed.payload_value());
	}

	match (lhs, rhs) {
		(Value::Null, Value::Null) => true,
		(Value::Boolean(l), Value::Boolean(r)) => l == r,
		(Value::Integer(l), Value::Integer(r)) => l == r,
		#[allow(clippy::float_cmp)]
		(Value::Float(l), Value::Float(r)) => l == r,
		(Value::Text(l), Value::Text(r)) => l == r,
		(Value::Array(l), Value::Array(r)) => strict_eq_arrays(l, r),
		(Value::Object(l), Value::Object(r)) => l.ptr_eq(r),
		(Value::Resource(l), Value::Resource(r)) => l.id() == r.id(),
		_ => false,
	}
}
