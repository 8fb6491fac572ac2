use crate::value::{AnyBox, Array, Boxed, Kind, ObjectRef, ResourceHandle, Typename};
use std::fmt::{self, Debug, Display, Formatter};

/// Any raw value that can be fed into the coercion chain.
///
/// This is the dynamically-typed side of the crate: strongly typed values are [`Boxed`]s, which
/// can in turn be carried around inside a `Value` via [`Value::Boxed`].
///
/// [`Boxed`]: crate::value::Boxed
#[derive(Clone, Default)]
pub enum Value {
	/// The absent value.
	#[default]
	Null,
	Boolean(bool),
	Integer(i64),
	Float(f64),
	Text(String),
	Array(Array),
	Object(ObjectRef),
	Resource(ResourceHandle),
	Boxed(AnyBox),
}

impl Value {
	/// Gets the name of this value's runtime kind.
	///
	/// # Examples
	/// ```
	/// # use strongtype::Value;
	/// assert_eq!(Value::from(12).typename(), "int");
	/// assert_eq!(Value::from("hi").typename(), "string");
	/// assert_eq!(Value::Null.typename(), "null");
	/// ```
	#[must_use]
	pub fn typename(&self) -> Typename {
		match self {
			Self::Null => "null",
			Self::Boolean(_) => "bool",
			Self::Integer(_) => "int",
			Self::Float(_) => "float",
			Self::Text(_) => "string",
			Self::Array(_) => "array",
			Self::Object(object) => object.typename(),
			Self::Resource(resource) if resource.is_closed() => "resource (closed)",
			Self::Resource(_) => "resource",
			Self::Boxed(boxed) => boxed.typename(),
		}
	}

	/// Checks to see if `self` is [`Value::Null`].
	#[must_use]
	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Gets `self`, with any [`Value::Boxed`] replaced by its payload.
	#[must_use]
	pub fn unboxed(&self) -> Self {
		match self {
			Self::Boxed(boxed) => boxed.payload_value(),
			other => other.clone(),
		}
	}

	/// Checks to see if `self` is truthy.
	///
	/// `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays are falsey; everything else,
	/// including any object or resource, is truthy. Boxed values are judged by their payload.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Boolean(boolean) => *boolean,
			Self::Integer(integer) => *integer != 0,
			Self::Float(float) => *float != 0.0,
			Self::Text(text) => !text.is_empty() && text != "0",
			Self::Array(array) => !array.is_empty(),
			Self::Object(_) | Self::Resource(_) => true,
			Self::Boxed(boxed) => boxed.payload_value().is_truthy(),
		}
	}

	/// Loose equality: compares `self` and `rhs` after juggling their types.
	///
	/// # Examples
	/// ```
	/// # use strongtype::Value;
	/// assert!(Value::from(5).loose_eq(&Value::from(5.0)));
	/// assert!(Value::from("10").loose_eq(&Value::from(10)));
	/// assert!(!Value::from("abc").loose_eq(&Value::from(0)));
	/// ```
	#[must_use]
	pub fn loose_eq(&self, rhs: &Self) -> bool {
		super::compare::loose_eq(self, rhs)
	}

	/// Strict equality: same kind and same value, without any juggling.
	///
	/// # Examples
	/// ```
	/// # use strongtype::Value;
	/// assert!(Value::from(5).strict_eq(&Value::from(5)));
	/// assert!(!Value::from(5).strict_eq(&Value::from(5.0)));
	/// ```
	#[must_use]
	pub fn strict_eq(&self, rhs: &Self) -> bool {
		super::compare::strict_eq(self, rhs)
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Null => write!(f, "null"),
			Self::Boolean(boolean) => Debug::fmt(boolean, f),
			Self::Integer(integer) => Debug::fmt(integer, f),
			Self::Float(float) => Debug::fmt(float, f),
			Self::Text(text) => Debug::fmt(text, f),
			Self::Array(array) => Debug::fmt(array, f),
			Self::Object(object) => Debug::fmt(object, f),
			Self::Resource(resource) => Debug::fmt(resource, f),
			Self::Boxed(boxed) => Debug::fmt(boxed, f),
		}
	}
}

/// Renders `self` the way diagnostics print written values.
impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Null => Ok(()),
			Self::Boolean(true) => write!(f, "1"),
			Self::Boolean(false) => Ok(()),
			Self::Integer(integer) => Display::fmt(integer, f),
			Self::Float(float) => Display::fmt(float, f),
			Self::Text(text) => f.write_str(text),
			Self::Boxed(boxed) => Display::fmt(&boxed.payload_value(), f),
			other => Debug::fmt(other, f),
		}
	}
}

impl From<bool> for Value {
	fn from(boolean: bool) -> Self {
		Self::Boolean(boolean)
	}
}

impl From<i64> for Value {
	fn from(integer: i64) -> Self {
		Self::Integer(integer)
	}
}

impl From<i32> for Value {
	fn from(integer: i32) -> Self {
		Self::Integer(integer.into())
	}
}

impl From<u32> for Value {
	fn from(integer: u32) -> Self {
		Self::Integer(integer.into())
	}
}

impl From<f64> for Value {
	fn from(float: f64) -> Self {
		Self::Float(float)
	}
}

impl From<String> for Value {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for Value {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<Array> for Value {
	fn from(array: Array) -> Self {
		Self::Array(array)
	}
}

impl From<ObjectRef> for Value {
	fn from(object: ObjectRef) -> Self {
		Self::Object(object)
	}
}

impl From<ResourceHandle> for Value {
	fn from(resource: ResourceHandle) -> Self {
		Self::Resource(resource)
	}
}

impl From<AnyBox> for Value {
	fn from(boxed: AnyBox) -> Self {
		Self::Boxed(boxed)
	}
}

impl<K: Kind> From<Boxed<K>> for Value {
	fn from(boxed: Boxed<K>) -> Self {
		Self::Boxed(AnyBox::new(boxed))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(option: Option<T>) -> Self {
		option.map_or(Self::Null, Into::into)
	}
}
