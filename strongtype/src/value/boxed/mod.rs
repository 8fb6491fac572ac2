use crate::property::{Property, PropertyDispatch};
use crate::value::ty::{self, Boolean, Text};
use crate::value::slots::{self, SlotTable};
use crate::value::{Kind, NamedType, SlotId, ToValue, Typename, Value, Variable};
use crate::{Error, ErrorKind, Result};
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;

mod any;
mod reconcile;

pub use any::AnyBox;

/// A strongly typed value of kind `K`.
///
/// A box holds at most one payload of `K`'s payload type. It's absent only if the box is nullable
/// and was given null; non-nullable boxes reset to [`Kind::empty`] instead.
///
/// Boxes made through [`Kind::create`] are _registered_: they own
/// a slot in the global slot table recording the [`Variable`] they were stored into. Every other
/// box, including every [`duplicate`](Self::duplicate), is unregistered.
///
/// # Slot reconciliation
/// When a registered box is dropped, it checks the variable its slot points to. If that variable
/// has since been given a raw value (that is, anything non-null that isn't itself a registered
/// box), the value is rescued by coercing it into a new registered `K` box in the same variable.
/// The dropped box's slot is then freed.
///
/// # Examples
/// ```
/// # use strongtype::{Boxed, Kind, Variable, value::ty::Int};
/// let var = Variable::default();
/// Int::create(&var, 12, false)?;
///
/// // Overwriting the variable drops the box, which rescues the new value.
/// var.assign(3.5);
/// assert_eq!(var.payload::<Int>()?, Some(3));
/// assert!(var.slot().is_some());
/// # strongtype::Result::<()>::Ok(())
/// ```
pub struct Boxed<K: Kind> {
	payload: Option<K::Payload>,
	nullable: bool,
	slot: Option<SlotId>,
	_kind: PhantomData<K>,
}

impl<K: Kind> Boxed<K> {
	fn blank(nullable: bool) -> Self {
		Self { payload: None, nullable, slot: None, _kind: PhantomData }
	}

	/// Creates a new, unregistered box by coercing `value`.
	pub fn new(value: impl Into<Value>) -> Result<Self> {
		Self::construct(&value.into(), false)
	}

	/// Like [`new`](Self::new), except the box is nullable.
	pub fn new_nullable(value: impl Into<Value>) -> Result<Self> {
		Self::construct(&value.into(), true)
	}

	/// Builds an unregistered box from `value`.
	///
	/// A `K` box is copied as-is; anything else goes through the coercion chain.
	pub(crate) fn construct(value: &Value, nullable: bool) -> Result<Self> {
		let mut boxed = Self::blank(nullable);

		if let Value::Boxed(source) = value {
			if let Some(source) = source.downcast_ref::<K>() {
				boxed.payload = source.payload.clone();
				if boxed.payload.is_none() && !nullable {
					boxed.clear();
				}

				return Ok(boxed);
			}
		}

		boxed.assign(value.clone())?;
		Ok(boxed)
	}

	/// Strong-type creation: builds a `K` box from `value` and registers it into `target`.
	///
	/// - If `value` is null and `target` isn't empty, the current contents of `target` are used.
	/// - Otherwise, if `target` isn't empty and `allow_override` is false, this fails with
	///   [`ErrorKind::OverrideNotAllowed`].
	///
	/// A `K` box is duplicated; anything else is coerced. The coercion runs with `target` unlocked,
	/// so if `target` is written to in the meantime and the write matters, this also fails with
	/// [`ErrorKind::OverrideNotAllowed`]. On failure, `target` is unchanged.
	pub(crate) fn create(target: &Variable, value: Value, allow_override: bool, nullable: bool) -> Result<()> {
		let (source, reused, writes) = {
			let current = target.binding().lock();

			if current.is_null() {
				(value, false, current.writes())
			} else if value.is_null() {
				(current.clone(), true, current.writes())
			} else if allow_override {
				(value, false, current.writes())
			} else {
				return Err(Error::from(ErrorKind::OverrideNotAllowed { typename: K::TYPENAME }));
			}
		};

		let mut boxed = Self::construct(&source, nullable)?;
		drop(source);

		let displaced = {
			let mut table = slots::lock();
			let mut current = target.binding().lock();

			if current.writes() != writes && (reused || !allow_override) {
				return Err(Error::from(ErrorKind::OverrideNotAllowed { typename: K::TYPENAME }));
			}

			boxed.register(&mut table, target);
			std::mem::replace(&mut *current, Value::Boxed(AnyBox::new(boxed)))
		};

		// The old contents may be a registered box, which needs the table to reconcile.
		drop(displaced);
		Ok(())
	}

	fn register(&mut self, table: &mut SlotTable, target: &Variable) {
		let slot = table.allocate(target.binding());
		self.slot = Some(slot);
		debug!(%slot, typename=K::TYPENAME, "registered strong type");
	}

	/// Puts a `K` box taken out of `target` back, registering it if it isn't already.
	///
	/// If `target` was written to since it was taken (`writes` no longer matches), the box is
	/// handed back instead; it must be dropped after this returns.
	pub(crate) fn restore(target: &Variable, mut taken: AnyBox, writes: u64) -> Option<AnyBox> {
		let mut table = slots::lock();
		let mut current = target.binding().lock();

		if current.writes() != writes {
			return Some(taken);
		}

		if let Some(boxed) = taken.downcast_mut::<K>() {
			if boxed.slot.is_none() {
				boxed.register(&mut table, target);
			}
		}

		let displaced = std::mem::replace(&mut *current, Value::Boxed(taken));
		debug_assert!(displaced.is_null());
		None
	}

	/// Coerces `value` and stores it in `self`. On failure, `self` is unchanged.
	///
	/// Null clears `self`, unless it's nullable, in which case the payload becomes absent.
	pub fn assign(&mut self, value: impl Into<Value>) -> Result<()> {
		match ty::coerce::<K>(&value.into())? {
			Some(payload) => self.payload = Some(payload),
			None if self.nullable => self.payload = None,
			None => self.clear(),
		}

		Ok(())
	}

	/// Resets the payload to [`Kind::empty`].
	pub fn clear(&mut self) {
		self.payload = Some(K::empty());
	}

	#[must_use]
	pub fn payload(&self) -> Option<&K::Payload> {
		self.payload.as_ref()
	}

	#[must_use]
	pub fn is_null(&self) -> bool {
		self.payload.is_none()
	}

	#[must_use]
	pub const fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// The slot `self` owns, if it's registered.
	#[must_use]
	pub const fn slot(&self) -> Option<SlotId> {
		self.slot
	}

	/// The payload as a raw value, or null if it's absent.
	#[must_use]
	pub fn to_value(&self) -> Value {
		self.payload.as_ref().map_or(Value::Null, K::to_value)
	}

	/// Loosely compares the payload of `self` with `other`.
	///
	/// # Examples
	/// ```
	/// # use strongtype::value::{Boxed, ty::{Float, Int}};
	/// let five = Boxed::<Int>::new(5)?;
	///
	/// assert!(five.equals(&Boxed::<Float>::new(5.0)?));
	/// assert!(five.equals("5"));
	/// assert!(!five.is_identical(&Boxed::<Float>::new(5.0)?));
	/// # strongtype::Result::<()>::Ok(())
	/// ```
	pub fn equals<V: ToValue + ?Sized>(&self, other: &V) -> bool {
		self.to_value().loose_eq(&other.to_value())
	}

	/// Strictly compares the payload of `self` with `other`.
	pub fn is_identical<V: ToValue + ?Sized>(&self, other: &V) -> bool {
		self.to_value().strict_eq(&other.to_value())
	}

	/// Copies `self` without its slot.
	#[must_use]
	pub fn duplicate(&self) -> Self {
		let mut duplicate = Self::blank(self.nullable);
		duplicate.payload = self.payload.clone();
		duplicate
	}

	/// A duplicate of `self` with `payload` instead.
	pub(crate) fn with_payload(&self, payload: K::Payload) -> Self {
		let mut duplicate = Self::blank(self.nullable);
		duplicate.payload = Some(payload);
		duplicate
	}

	fn convert<T: Kind>(&self) -> Result<Variable> {
		let target = Variable::default();
		T::create(&target, AnyBox::new(self.duplicate()), false)?;
		Ok(target)
	}

	/// Creates a [`Boolean`] from `self` in a new variable.
	pub fn to_bool(&self) -> Result<Variable> {
		self.convert::<Boolean>()
	}

	/// Creates a [`Text`] from `self` in a new variable.
	pub fn to_text(&self) -> Result<Variable> {
		self.convert::<Text>()
	}

	fn get_value(&self) -> Result<Value> {
		Ok(self.to_value())
	}

	fn set_value(&mut self, value: Value) -> Result<()> {
		self.assign(value)
	}

	fn delete_value(&mut self) -> Result<()> {
		if self.nullable {
			self.payload = None;
		} else {
			self.clear();
		}

		Ok(())
	}
}

impl<K: Kind> Clone for Boxed<K> {
	fn clone(&self) -> Self {
		self.duplicate()
	}
}

impl<K: Kind> Debug for Boxed<K> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match &self.payload {
			Some(payload) => write!(f, "{}({payload:?})", K::TYPENAME),
			None => write!(f, "{}(null)", K::TYPENAME),
		}
	}
}

impl<K: Kind> Display for Boxed<K> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		Display::fmt(&self.to_value(), f)
	}
}

impl<K: Kind> NamedType for Boxed<K> {
	const TYPENAME: Typename = K::TYPENAME;
}

impl<K: Kind> ToValue for Boxed<K> {
	fn to_value(&self) -> Value {
		Boxed::to_value(self)
	}
}

impl<K: Kind> PropertyDispatch for Boxed<K> {
	fn property(name: &str) -> Option<Property<Self>> {
		match name {
			"value" => Some(Property::new(Self::get_value).with_setter(Self::set_value).with_deleter(Self::delete_value)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::ty::{Float, Int, Integer, List, UInt};
	use crate::value::Array;

	#[test]
	fn assign_failure_leaves_payload() {
		let mut int = Boxed::<Int>::new(4).unwrap();
		assert!(int.assign(Array::new()).is_err());
		assert_eq!(int.payload(), Some(&4));
	}

	#[test]
	fn same_kind_is_copied() {
		let list = Boxed::<List>::new(Array::from(vec![1, 2])).unwrap();
		let copy = Boxed::<List>::construct(&AnyBox::new(list.duplicate()).into(), false).unwrap();

		assert_eq!(copy.payload().map(Array::len), Some(2));
		assert!(copy.slot().is_none());
	}

	#[test]
	fn null_source_box_is_cleared_when_not_nullable() {
		let null = Boxed::<Integer>::new_nullable(Value::Null).unwrap();
		let copy = Boxed::<Integer>::construct(&AnyBox::new(null).into(), false).unwrap();

		assert_eq!(copy.payload(), Some(&0));
	}

	#[test]
	fn equality() {
		let five = Boxed::<Int>::new(5).unwrap();

		assert!(five.equals(&Boxed::<Float>::new(5.0).unwrap()));
		assert!(!five.is_identical(&Boxed::<Float>::new(5.0).unwrap()));
		assert!(five.is_identical(&Boxed::<Integer>::new(5).unwrap()));
		assert!(five.is_identical(&Boxed::<UInt>::new(5).unwrap()));
		assert!(!five.equals(&Value::Null));
		assert!(Boxed::<Int>::new(0).unwrap().equals(&Value::Null));
	}

	#[test]
	fn coercion_is_idempotent() {
		for value in [Value::from(true), Value::from(-3), Value::from(2.5), Value::from("x")] {
			let once = Boxed::<Text>::new(value).unwrap();
			let twice = Boxed::<Text>::new(AnyBox::new(once.duplicate())).unwrap();
			assert!(once.is_identical(&twice));
		}
	}

	#[test]
	fn conversions() {
		let int = Boxed::<Int>::new(12).unwrap();

		assert_eq!(int.to_text().unwrap().payload::<Text>().unwrap().as_deref(), Some("12"));
		assert_eq!(int.to_bool().unwrap().payload::<Boolean>().unwrap(), Some(true));
		assert_eq!(Boxed::<Int>::new(0).unwrap().to_bool().unwrap().payload::<Boolean>().unwrap(), Some(false));
	}

	#[test]
	fn value_property() {
		let mut int = Boxed::<Int>::new(1).unwrap();

		int.set("value", 9).unwrap();
		assert_matches!(int.get("value"), Ok(Value::Integer(9)));
		assert!(int.has("value").unwrap());
		assert!(!int.has("other").unwrap());

		int.delete("value").unwrap();
		assert_eq!(int.payload(), Some(&0));

		let mut nullable = Boxed::<Int>::new_nullable(1).unwrap();
		nullable.delete("value").unwrap();
		assert!(nullable.is_null());
		assert_eq!(format!("{nullable:?}"), "Int(null)");
	}

	thread_local! {
		static MEDDLED: std::cell::RefCell<Option<Variable>> = std::cell::RefCell::new(None);
	}

	/// An integer kind that writes `99` into `MEDDLED` while coercing.
	#[derive(crate::NamedType)]
	struct Meddling;

	impl Kind for Meddling {
		type Payload = i64;

		fn empty() -> i64 {
			0
		}

		fn to_value(payload: &i64) -> Value {
			Value::Integer(*payload)
		}

		fn from_int(integer: i64) -> Option<i64> {
			MEDDLED.with(|meddled| {
				if let Some(var) = &*meddled.borrow() {
					var.assign(99);
				}
			});

			Some(integer)
		}
	}

	#[test]
	fn writes_during_create_are_not_overridden() {
		let var = Variable::default();
		MEDDLED.with(|meddled| *meddled.borrow_mut() = Some(var.clone()));

		assert_matches!(
			Meddling::create(&var, 1, false).unwrap_err().kind,
			ErrorKind::OverrideNotAllowed { typename: "Meddling" }
		);
		assert_matches!(var.get(), Value::Integer(99));
		assert!(var.slot().is_none());

		Meddling::create(&var, 2, true).unwrap();
		assert_eq!(var.payload::<Meddling>().unwrap(), Some(2));
		assert!(var.slot().is_some());

		MEDDLED.with(|meddled| meddled.borrow_mut().take());
	}

	#[test]
	fn restore_registers_replacements() {
		let var = Variable::default();
		let taken = AnyBox::new(Boxed::<Int>::new(3).unwrap());

		assert!(Boxed::<Int>::restore(&var, taken, 0).is_none());
		assert!(var.slot().is_some());

		let stale = AnyBox::new(Boxed::<Int>::new(4).unwrap());
		let returned = Boxed::<Int>::restore(&var, stale, 0).expect("the variable was written to");
		assert_matches!(returned.payload_value(), Value::Integer(4));
		assert_eq!(var.payload::<Int>().unwrap(), Some(3));
	}
}
