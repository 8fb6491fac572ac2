use crate::value::{Boxed, Kind, SlotId, ToValue, Typename, Value};
use std::any::Any;
use std::fmt::{self, Debug, Formatter};

/// The object-safe half of [`Boxed`], so boxes of any kind can be stored in a [`Value`].
trait DynBoxed: Any + Send + Sync {
	fn typename(&self) -> Typename;
	fn slot(&self) -> Option<SlotId>;
	fn payload_value(&self) -> Value;
	fn duplicate(&self) -> AnyBox;
	fn fmt_debug(&self, f: &mut Formatter) -> fmt::Result;
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: Kind> DynBoxed for Boxed<K> {
	fn typename(&self) -> Typename {
		K::TYPENAME
	}

	fn slot(&self) -> Option<SlotId> {
		Boxed::slot(self)
	}

	fn payload_value(&self) -> Value {
		self.to_value()
	}

	fn duplicate(&self) -> AnyBox {
		AnyBox::new(Boxed::duplicate(self))
	}

	fn fmt_debug(&self, f: &mut Formatter) -> fmt::Result {
		Debug::fmt(self, f)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// A [`Boxed`] of any kind.
///
/// Cloning an `AnyBox` duplicates the box inside of it, so the clone is never registered.
pub struct AnyBox(Box<dyn DynBoxed>);

sa::assert_impl_all!(AnyBox: Send, Sync, Clone);

impl AnyBox {
	#[must_use]
	pub fn new<K: Kind>(boxed: Boxed<K>) -> Self {
		Self(Box::new(boxed))
	}

	#[must_use]
	pub fn typename(&self) -> Typename {
		self.0.typename()
	}

	#[must_use]
	pub fn slot(&self) -> Option<SlotId> {
		self.0.slot()
	}

	/// Whether the box owns a slot.
	#[must_use]
	pub fn is_registered(&self) -> bool {
		self.slot().is_some()
	}

	/// The box's payload as a raw value (null if it has none).
	#[must_use]
	pub fn payload_value(&self) -> Value {
		self.0.payload_value()
	}

	#[must_use]
	pub fn is<K: Kind>(&self) -> bool {
		self.0.as_any().is::<Boxed<K>>()
	}

	#[must_use]
	pub fn downcast_ref<K: Kind>(&self) -> Option<&Boxed<K>> {
		self.0.as_any().downcast_ref()
	}

	pub fn downcast_mut<K: Kind>(&mut self) -> Option<&mut Boxed<K>> {
		self.0.as_any_mut().downcast_mut()
	}
}

impl Clone for AnyBox {
	fn clone(&self) -> Self {
		self.0.duplicate()
	}
}

impl Debug for AnyBox {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		self.0.fmt_debug(f)
	}
}

impl ToValue for AnyBox {
	fn to_value(&self) -> Value {
		self.payload_value()
	}
}

impl<K: Kind> From<Boxed<K>> for AnyBox {
	fn from(boxed: Boxed<K>) -> Self {
		Self::new(boxed)
	}
}
