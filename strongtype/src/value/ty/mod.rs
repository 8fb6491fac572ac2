//! The kinds a [`Boxed`] value can have.
//!
//! Each kind is a marker type implementing [`Kind`], which fixes the payload type and says which
//! raw inputs can be coerced into it.

use crate::value::{AnyBox, Array, Boxed, NamedType, ObjectRef, ResourceHandle, Value, Variable};
use crate::{Error, ErrorKind, Result};
use std::fmt::Debug;

mod boolean;
mod float;
mod int;
mod integer;
mod list;
mod object;
mod resource;
mod text;
mod uint;

pub use boolean::Boolean;
pub use float::Float;
pub use int::Int;
pub use integer::Integer;
pub use list::List;
pub use object::Object;
pub use resource::Resource;
pub use text::Text;
pub use uint::UInt;

/// A kind of strongly typed value.
///
/// Every `from_*` handler receives one kind of raw input and returns the coerced payload, or
/// `None` if the input is rejected. Handlers that aren't overridden reject everything, except for
/// [`from_boxed`](Kind::from_boxed), which retries with the box's payload.
pub trait Kind: NamedType + Send + Sync + Sized + 'static {
	/// The strongly typed representation.
	type Payload: Clone + Debug + Send + Sync + 'static;

	/// What non-nullable boxes are reset to when given null.
	fn empty() -> Self::Payload;

	/// Converts the payload back into a raw value.
	fn to_value(payload: &Self::Payload) -> Value;

	fn from_bool(_boolean: bool) -> Option<Self::Payload> {
		None
	}

	fn from_int(_integer: i64) -> Option<Self::Payload> {
		None
	}

	fn from_float(_float: f64) -> Option<Self::Payload> {
		None
	}

	fn from_text(_text: &str) -> Option<Self::Payload> {
		None
	}

	fn from_array(_array: &Array) -> Option<Self::Payload> {
		None
	}

	fn from_object(_object: &ObjectRef) -> Option<Self::Payload> {
		None
	}

	fn from_resource(_resource: &ResourceHandle) -> Option<Self::Payload> {
		None
	}

	/// Coerces a box of any kind; `Ok(None)` means the box was null.
	fn from_boxed(boxed: &AnyBox) -> Result<Option<Self::Payload>> {
		coerce::<Self>(&boxed.payload_value())
	}

	/// Creates a new, non-nullable `Self` box from `value` and registers it into `target`.
	///
	/// - If `value` is null and `target` isn't empty, the current contents of `target` are used.
	/// - Otherwise, if `target` isn't empty and `allow_override` is false, this fails with
	///   [`ErrorKind::OverrideNotAllowed`]. It also fails that way if `target` is written to
	///   concurrently in a way that changes the outcome.
	///
	/// A `Self` box is duplicated; anything else is coerced. On failure, `target` is unchanged.
	fn create(target: &Variable, value: impl Into<Value>, allow_override: bool) -> Result<()> {
		Boxed::<Self>::create(target, value.into(), allow_override, false)
	}

	/// Like [`create`](Kind::create), except the box is nullable.
	fn create_nullable(target: &Variable, value: impl Into<Value>, allow_override: bool) -> Result<()> {
		Boxed::<Self>::create(target, value.into(), allow_override, true)
	}
}

/// Runs `value` through the coercion chain of `K`.
///
/// Returns `Ok(None)` for null input; what that means is up to the caller.
pub(crate) fn coerce<K: Kind>(value: &Value) -> Result<Option<K::Payload>> {
	let accepted = match value {
		Value::Null => return Ok(None),
		Value::Boolean(boolean) => K::from_bool(*boolean),
		Value::Integer(integer) => K::from_int(*integer),
		Value::Float(float) => K::from_float(*float),
		Value::Text(text) => K::from_text(text),
		Value::Array(array) => K::from_array(array),
		Value::Object(object) => K::from_object(object),
		Value::Resource(resource) if resource.is_closed() => {
			return Err(Error::from(ErrorKind::TypeMismatch { expected: K::TYPENAME, given: value.typename() }))
		}
		Value::Resource(resource) => K::from_resource(resource),
		Value::Boxed(boxed) => return K::from_boxed(boxed),
	};

	accepted.map(Some).ok_or_else(|| {
		Error::from(ErrorKind::InvalidValue { into: K::TYPENAME, given: value.typename(), reason: None })
	})
}
