use crate::value::{Boxed, Kind, SlotId, ToValue, Typename, Value};
use crate::{Error, ErrorKind, Result};
use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Contents {
	value: Value,
	writes: u64,
}

/// The storage cell behind a [`Variable`], and what slots point at.
#[derive(Default)]
pub(crate) struct Binding(Mutex<Contents>);

impl Binding {
	fn new(value: Value) -> Self {
		Self(Mutex::new(Contents { value, writes: 0 }))
	}

	/// Locks the binding. If the slot table is also needed, it has to be locked first.
	pub(crate) fn lock(&self) -> BindingGuard<'_> {
		BindingGuard(self.0.lock().unwrap_or_else(PoisonError::into_inner))
	}
}

/// A locked [`Binding`]. Every mutable access counts as a write.
pub(crate) struct BindingGuard<'a>(MutexGuard<'a, Contents>);

impl BindingGuard<'_> {
	/// How many times the binding has been written to. Only ever compared for equality.
	pub(crate) fn writes(&self) -> u64 {
		self.0.writes
	}
}

impl Deref for BindingGuard<'_> {
	type Target = Value;

	fn deref(&self) -> &Value {
		&self.0.value
	}
}

impl DerefMut for BindingGuard<'_> {
	fn deref_mut(&mut self) -> &mut Value {
		self.0.writes = self.0.writes.wrapping_add(1);
		&mut self.0.value
	}
}

impl Debug for Binding {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		Debug::fmt(&*self.lock(), f)
	}
}

/// A shared storage cell that strong types are created into.
///
/// Cloning a `Variable` yields another handle to the _same_ cell, so anything written through one
/// handle is visible through all of them.
///
/// # Examples
/// ```
/// # use strongtype::{Kind, Value, Variable, value::ty::Int};
/// let var = Variable::new(Value::Null);
/// Int::create(&var, 12, false)?;
///
/// assert_eq!(var.payload::<Int>()?, Some(12));
/// assert!(var.slot().is_some());
/// # strongtype::Result::<()>::Ok(())
/// ```
#[derive(Clone, Default)]
pub struct Variable(Arc<Binding>);

sa::assert_impl_all!(Variable: Send, Sync);

impl Variable {
	/// Creates a new variable holding `value`.
	#[must_use]
	pub fn new(value: impl Into<Value>) -> Self {
		Self(Arc::new(Binding::new(value.into())))
	}

	pub(crate) fn binding(&self) -> &Arc<Binding> {
		&self.0
	}

	/// Overwrites the contents of `self` with `value`.
	///
	/// If a registered box is displaced, it reconciles its slot, which may in turn promote `value`
	/// into a box of the displaced kind.
	pub fn assign(&self, value: impl Into<Value>) {
		let old = std::mem::replace(&mut *self.0.lock(), value.into());
		drop(old);
	}

	/// Removes the contents of `self`, leaving it null.
	#[must_use = "dropping a taken value immediately is the same as `assign(Value::Null)`"]
	pub fn take(&self) -> Value {
		std::mem::take(&mut *self.0.lock())
	}

	/// Gets a copy of the contents of `self`.
	///
	/// Boxes are copied through [`Boxed::duplicate`], so the result never owns a slot.
	#[must_use]
	pub fn get(&self) -> Value {
		self.0.lock().clone()
	}

	/// The slot of the box currently stored in `self`, if any.
	#[must_use]
	pub fn slot(&self) -> Option<SlotId> {
		match &*self.0.lock() {
			Value::Boxed(boxed) => boxed.slot(),
			_ => None,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_null()
	}

	#[must_use]
	pub fn typename(&self) -> Typename {
		self.0.lock().typename()
	}

	/// Runs `f` with a reference to the contents of `self`.
	///
	/// `self` stays locked while `f` runs, so `f` must not access `self` again.
	pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
		f(&*self.0.lock())
	}

	/// Runs `f` with the `K` box stored in `self`.
	///
	/// Fails with [`ErrorKind::TypeMismatch`] if `self` doesn't hold a `K` box.
	pub fn with_boxed<K: Kind, R>(&self, f: impl FnOnce(&Boxed<K>) -> R) -> Result<R> {
		let value = self.0.lock();

		match &*value {
			Value::Boxed(boxed) => boxed.downcast_ref::<K>().map(f),
			_ => None,
		}
		.ok_or_else(|| mismatch::<K>(&value))
	}

	/// Like [`with_boxed`](Self::with_boxed), except `f` gets a mutable reference.
	///
	/// The box is taken out of `self` while `f` runs (so `self` reads as null in the meantime),
	/// then put back. If `f` replaced it with an unregistered box, that box is registered instead.
	/// If `self` was written to while `f` ran, that write wins and the box is dropped, which may
	/// rescue the new contents. If `f` panics, `self` is left null.
	pub fn with_boxed_mut<K: Kind, R>(&self, f: impl FnOnce(&mut Boxed<K>) -> R) -> Result<R> {
		let (mut boxed, writes) = {
			let mut value = self.0.lock();

			match std::mem::take(&mut *value) {
				Value::Boxed(boxed) if boxed.is::<K>() => (boxed, value.writes()),
				other => {
					let err = mismatch::<K>(&other);
					*value = other;
					return Err(err);
				}
			}
		};

		let given = boxed.typename();
		let result = boxed.downcast_mut::<K>().map(f);
		drop(Boxed::<K>::restore(self, boxed, writes));

		result.ok_or_else(|| Error::from(ErrorKind::TypeMismatch { expected: K::TYPENAME, given }))
	}

	/// Gets a copy of the payload of the `K` box stored in `self`.
	pub fn payload<K: Kind>(&self) -> Result<Option<K::Payload>> {
		self.with_boxed::<K, _>(|boxed| boxed.payload().cloned())
	}
}

#[track_caller]
fn mismatch<K: Kind>(value: &Value) -> Error {
	Error::from(ErrorKind::TypeMismatch { expected: K::TYPENAME, given: value.typename() })
}

impl Debug for Variable {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.debug_tuple("Variable").field(&self.0).finish()
	}
}

impl ToValue for Variable {
	fn to_value(&self) -> Value {
		self.with(Value::unboxed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::slots;
	use crate::value::ty::{Int, Text};

	#[test]
	fn clones_share_the_binding() {
		let var = Variable::new(1);
		let alias = var.clone();

		alias.assign("x");
		assert_matches!(var.get(), Value::Text(text) if text == "x");
		assert_matches!(var.take(), Value::Text(_));
		assert!(alias.is_empty());
	}

	#[test]
	fn with_boxed_checks_the_kind() {
		let var = Variable::default();
		assert_matches!(
			var.with_boxed::<Int, _>(|_| ()).unwrap_err().kind,
			ErrorKind::TypeMismatch { expected: "Int", given: "null" }
		);

		Int::create(&var, 3, false).unwrap();
		assert_matches!(
			var.payload::<Text>().unwrap_err().kind,
			ErrorKind::TypeMismatch { expected: "Text", given: "Int" }
		);

		var.with_boxed_mut::<Int, _>(|int| int.assign(4)).unwrap().unwrap();
		assert_eq!(var.payload::<Int>().unwrap(), Some(4));
	}

	#[test]
	fn get_never_copies_the_slot() {
		let var = Variable::default();
		Int::create(&var, 3, false).unwrap();

		assert!(var.slot().is_some());
		assert_matches!(var.get(), Value::Boxed(boxed) if boxed.slot().is_none());
	}

	#[test]
	fn with_boxed_mut_can_replace_the_box() {
		let var = Variable::default();
		Int::create(&var, 3, false).unwrap();
		let old = var.slot().unwrap();

		var.with_boxed_mut::<Int, _>(|int| *int = Boxed::new(5).unwrap()).unwrap();

		assert!(!slots::is_live(old));
		let new = var.slot().expect("the replacement should be registered");
		assert!(slots::is_live(new));
		assert_eq!(var.payload::<Int>().unwrap(), Some(5));
	}

	#[test]
	fn with_boxed_mut_can_use_the_variable() {
		let var = Variable::default();
		Int::create(&var, 3, false).unwrap();
		let old = var.slot().unwrap();

		var.with_boxed_mut::<Int, _>(|int| {
			assert!(var.is_empty());
			int.assign(4).unwrap();
			var.assign(8.5);
		})
		.unwrap();

		assert!(!slots::is_live(old));
		assert!(var.slot().is_some());
		assert_eq!(var.payload::<Int>().unwrap(), Some(8));
	}

	#[test]
	fn with_boxed_mut_mismatch_keeps_the_contents() {
		let var = Variable::new("x");

		assert_matches!(
			var.with_boxed_mut::<Int, _>(|_| ()).unwrap_err().kind,
			ErrorKind::TypeMismatch { expected: "Int", given: "string" }
		);
		assert_matches!(var.get(), Value::Text(text) if text == "x");
	}
}
