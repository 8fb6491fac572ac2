pub mod ty;

mod array;
pub mod boxed;
mod compare;
mod handle;
pub mod slots;
mod value;
mod variable;

pub use array::{Array, Key};
pub use boxed::{AnyBox, Boxed};
pub use handle::{ObjectRef, ResourceHandle};
pub use slots::SlotId;
pub use ty::Kind;
pub use value::Value;
pub use variable::Variable;

pub type Typename = &'static str;

/// A type with a name used in diagnostics and property errors.
///
/// Usually implemented through `#[derive(NamedType)]`.
pub trait NamedType {
	const TYPENAME: Typename;
}

/// Produces the raw [`Value`] a type represents.
///
/// For boxed values this is the payload, so comparing through `ToValue` always compares the
/// unwrapped contents.
pub trait ToValue {
	fn to_value(&self) -> Value;
}

impl ToValue for Value {
	fn to_value(&self) -> Value {
		self.clone()
	}
}

macro_rules! impl_to_value {
	($($ty:ty),* $(,)?) => {
		$(impl ToValue for $ty {
			fn to_value(&self) -> Value {
				Value::from(self.clone())
			}
		})*
	};
}

impl_to_value!(bool, i64, i32, u32, f64, String, Array, ObjectRef, ResourceHandle);

impl ToValue for str {
	fn to_value(&self) -> Value {
		Value::from(self)
	}
}
