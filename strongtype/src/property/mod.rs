//! Named property dispatch.
//!
//! Types that want named properties implement [`PropertyDispatch::property`], usually by looking
//! the name up in a [`PropertyTable`] built on first use:
//!
//! ```
//! use strongtype::property::{Property, PropertyDispatch, PropertyTable};
//! use strongtype::{NamedType, Value};
//! use once_cell::sync::OnceCell;
//!
//! #[derive(NamedType)]
//! struct Point { x: i64 }
//!
//! impl PropertyDispatch for Point {
//! 	fn property(name: &str) -> Option<Property<Self>> {
//! 		static PROPERTIES: OnceCell<PropertyTable<Point>> = OnceCell::new();
//!
//! 		PROPERTIES.get_or_init(|| PropertyTable::new([
//! 			("x", Property::new(|point: &Point| Ok(Value::from(point.x)))),
//! 		])).get(name)
//! 	}
//! }
//!
//! let point = Point { x: 3 };
//! assert_matches::assert_matches!(point.get("x"), Ok(Value::Integer(3)));
//! assert_eq!(point.get("y").unwrap_err().to_string(), "Point::$y : invalid property.");
//! assert!(!point.has("y")?);
//! # strongtype::Result::<()>::Ok(())
//! ```

mod init;
mod table;

pub use init::{construct_static, StaticInit};
pub use table::PropertyTable;

use crate::error::Access;
use crate::value::{NamedType, Value};
use crate::{Error, ErrorKind, Result};

pub type Getter<T> = fn(&T) -> Result<Value>;
pub type Setter<T> = fn(&mut T, Value) -> Result<()>;
pub type Deleter<T> = fn(&mut T) -> Result<()>;

/// The accessors of a single named property.
///
/// A property without a setter is read-only, and one without a deleter can't be deleted.
pub struct Property<T> {
	getter: Getter<T>,
	setter: Option<Setter<T>>,
	deleter: Option<Deleter<T>>,
}

impl<T> Clone for Property<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Property<T> {}

impl<T> std::fmt::Debug for Property<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("Property")
			.field("setter", &self.setter.is_some())
			.field("deleter", &self.deleter.is_some())
			.finish_non_exhaustive()
	}
}

fn deferred_get<T>(_: &T) -> Result<Value> {
	Err(Error::from(ErrorKind::NotImplemented("property")))
}

fn deferred_set<T>(_: &mut T, _: Value) -> Result<()> {
	Err(Error::from(ErrorKind::NotImplemented("property")))
}

fn deferred_delete<T>(_: &mut T) -> Result<()> {
	Err(Error::from(ErrorKind::NotImplemented("property")))
}

impl<T> Property<T> {
	/// A read-only property.
	pub const fn new(getter: Getter<T>) -> Self {
		Self { getter, setter: None, deleter: None }
	}

	/// A property that's declared, but whose every accessor fails with
	/// [`ErrorKind::NotImplemented`].
	pub fn deferred() -> Self {
		Self { getter: deferred_get, setter: Some(deferred_set), deleter: Some(deferred_delete) }
	}

	#[must_use]
	pub fn with_setter(mut self, setter: Setter<T>) -> Self {
		self.setter = Some(setter);
		self
	}

	#[must_use]
	pub fn with_deleter(mut self, deleter: Deleter<T>) -> Self {
		self.deleter = Some(deleter);
		self
	}

	#[must_use]
	pub const fn is_read_only(&self) -> bool {
		self.setter.is_none()
	}
}

#[track_caller]
fn unknown<T: NamedType>(property: &str, access: Access, value: Option<&Value>) -> Error {
	Error::from(ErrorKind::UnknownProperty {
		object: T::TYPENAME,
		property: property.to_string(),
		access,
		value: value.map(ToString::to_string),
	})
}

/// Routes named property accesses to the accessors [`property`](Self::property) declares.
pub trait PropertyDispatch: NamedType + Sized {
	/// Looks up the property called `name`.
	fn property(name: &str) -> Option<Property<Self>>;

	/// Reads the property `name`.
	fn get(&self, name: &str) -> Result<Value> {
		match Self::property(name) {
			Some(property) => (property.getter)(self),
			None => Err(unknown::<Self>(name, Access::Get, None)),
		}
	}

	/// Writes `value` to the property `name`. Read-only properties count as unknown.
	fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		let value = value.into();

		match Self::property(name).and_then(|property| property.setter) {
			Some(setter) => setter(self, value),
			None => Err(unknown::<Self>(name, Access::Set, Some(&value))),
		}
	}

	/// Checks to see if the property `name` can be read.
	///
	/// Only [`ErrorKind::UnknownProperty`] means "no"; any other error from the getter is returned.
	fn has(&self, name: &str) -> Result<bool> {
		match self.get(name) {
			Ok(_) => Ok(true),
			Err(err) if err.is_unknown_property() => Ok(false),
			Err(err) => Err(err),
		}
	}

	/// Deletes the property `name`.
	fn delete(&mut self, name: &str) -> Result<()> {
		match Self::property(name).and_then(|property| property.deleter) {
			Some(deleter) => deleter(self),
			None => Err(unknown::<Self>(name, Access::Delete, None)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(crate::NamedType)]
	struct Counter {
		count: i64,
	}

	impl PropertyDispatch for Counter {
		fn property(name: &str) -> Option<Property<Self>> {
			match name {
				"count" => Some(
					Property::new(|counter: &Self| Ok(counter.count.into()))
						.with_setter(|counter, value| {
							match value {
								Value::Integer(count) => counter.count = count,
								other => return Err(Error::invalid_value("Counter::$count", other.typename(), "must be an int")),
							}
							Ok(())
						})
						.with_deleter(|counter| {
							counter.count = 0;
							Ok(())
						}),
				),
				"double" => Some(Property::new(|counter: &Self| Ok((counter.count * 2).into()))),
				"later" => Some(Property::deferred()),
				_ => None,
			}
		}
	}

	#[test]
	fn get_after_set() {
		let mut counter = Counter { count: 1 };

		counter.set("count", 5).unwrap();
		assert_matches!(counter.get("count"), Ok(Value::Integer(5)));
		assert_matches!(counter.get("double"), Ok(Value::Integer(10)));

		counter.delete("count").unwrap();
		assert_eq!(counter.count, 0);
	}

	#[test]
	fn read_only_properties_reject_writes() {
		let mut counter = Counter { count: 1 };
		let err = counter.set("double", 6).unwrap_err();

		assert_matches!(err.kind, ErrorKind::UnknownProperty { access: Access::Set, .. });
		assert_eq!(err.to_string(), "Counter::$double : attempt to write invalid property, using value 6.");
		assert_matches!(counter.delete("double").unwrap_err().kind, ErrorKind::UnknownProperty { access: Access::Delete, .. });
	}

	#[test]
	fn setters_validate() {
		let mut counter = Counter { count: 1 };

		assert_matches!(counter.set("count", "x").unwrap_err().kind, ErrorKind::InvalidValue { .. });
		assert_eq!(counter.count, 1);
	}

	#[test]
	fn has_only_swallows_unknown_properties() {
		let counter = Counter { count: 1 };

		assert!(counter.has("count").unwrap());
		assert!(!counter.has("nope").unwrap());
		assert_matches!(counter.has("later").unwrap_err().kind, ErrorKind::NotImplemented(_));
	}
}
