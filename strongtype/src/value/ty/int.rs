use super::integer::truncate;
use super::UInt;
use crate::value::{Boxed, Kind, Value};
use crate::Result;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// An integer with bitwise operations.
///
/// Every operation leaves its operands alone and returns a new, unregistered box.
///
/// # Examples
/// ```
/// # use strongtype::value::{Boxed, ty::Int};
/// let six = Boxed::<Int>::new(6)?;
///
/// assert_eq!(six.bit_and(3)?.payload(), Some(&2));
/// assert_eq!(six.bit_or(3)?.payload(), Some(&7));
/// assert_eq!(six.bit_xor(3)?.payload(), Some(&5));
/// assert_eq!(six.bit_not().payload(), Some(&-7));
/// assert_eq!(Boxed::<Int>::new(1)?.shift_left(3)?.payload(), Some(&8));
/// # strongtype::Result::<()>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Int;

impl Kind for Int {
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

fn shl(value: i64, amount: u64) -> i64 {
	u32::try_from(amount).ok().and_then(|amount| value.checked_shl(amount)).unwrap_or(0)
}

fn shr(value: i64, amount: u64) -> i64 {
	u32::try_from(amount)
		.ok()
		.and_then(|amount| value.checked_shr(amount))
		.unwrap_or(if value < 0 { -1 } else { 0 })
}

impl Boxed<Int> {
	/// The payload, with null read as `0`.
	fn integer(&self) -> i64 {
		self.payload().copied().unwrap_or(0)
	}

	/// Bitwise and, with `rhs` coerced to an [`Int`].
	pub fn bit_and(&self, rhs: impl Into<Value>) -> Result<Self> {
		Ok(self & &Self::new(rhs)?)
	}

	/// Bitwise or, with `rhs` coerced to an [`Int`].
	pub fn bit_or(&self, rhs: impl Into<Value>) -> Result<Self> {
		Ok(self | &Self::new(rhs)?)
	}

	/// Bitwise xor, with `rhs` coerced to an [`Int`].
	pub fn bit_xor(&self, rhs: impl Into<Value>) -> Result<Self> {
		Ok(self ^ &Self::new(rhs)?)
	}

	#[must_use]
	pub fn bit_not(&self) -> Self {
		!self
	}

	/// Shifts left by `amount`, which is coerced to a [`UInt`]. Shifting by 64 or more yields `0`.
	pub fn shift_left(&self, amount: impl Into<Value>) -> Result<Self> {
		Ok(self << &Boxed::<UInt>::new(amount)?)
	}

	/// Arithmetic right shift by `amount`, which is coerced to a [`UInt`]. Shifting by 64 or more
	/// leaves only the sign.
	pub fn shift_right(&self, amount: impl Into<Value>) -> Result<Self> {
		Ok(self >> &Boxed::<UInt>::new(amount)?)
	}
}

macro_rules! impl_bitwise {
	($($imp:ident $method:ident $op:tt),* $(,)?) => {$(
		impl $imp for &Boxed<Int> {
			type Output = Boxed<Int>;

			fn $method(self, rhs: Self) -> Boxed<Int> {
				self.with_payload(self.integer() $op rhs.integer())
			}
		}
	)*};
}

impl_bitwise!(BitAnd bitand &, BitOr bitor |, BitXor bitxor ^);

impl Not for &Boxed<Int> {
	type Output = Boxed<Int>;

	fn not(self) -> Boxed<Int> {
		self.with_payload(!self.integer())
	}
}

impl Shl<&Boxed<UInt>> for &Boxed<Int> {
	type Output = Boxed<Int>;

	fn shl(self, amount: &Boxed<UInt>) -> Boxed<Int> {
		self.with_payload(shl(self.integer(), amount.payload().copied().unwrap_or(0)))
	}
}

impl Shr<&Boxed<UInt>> for &Boxed<Int> {
	type Output = Boxed<Int>;

	fn shr(self, amount: &Boxed<UInt>) -> Boxed<Int> {
		self.with_payload(shr(self.integer(), amount.payload().copied().unwrap_or(0)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;

	fn int(integer: i64) -> Boxed<Int> {
		Boxed::new(integer).unwrap()
	}

	#[test]
	fn operators() {
		assert_eq!((&int(6) & &int(3)).payload(), Some(&2));
		assert_eq!((&int(6) | &int(3)).payload(), Some(&7));
		assert_eq!((&int(6) ^ &int(3)).payload(), Some(&5));
		assert_eq!((!&int(6)).payload(), Some(&-7));
		assert_eq!((&int(1) << &Boxed::<UInt>::new(3).unwrap()).payload(), Some(&8));
		assert_eq!((&int(-16) >> &Boxed::<UInt>::new(2).unwrap()).payload(), Some(&-4));
	}

	#[test]
	fn operands_are_coerced() {
		assert_eq!(int(6).bit_and(true).unwrap().payload(), Some(&0));
		assert_eq!(int(6).bit_or(1.9).unwrap().payload(), Some(&7));
		assert_matches!(int(6).bit_xor("3").unwrap_err().kind, ErrorKind::InvalidValue { into: "Int", .. });
	}

	#[test]
	fn negative_shifts_are_rejected() {
		assert_matches!(
			int(1).shift_left(-1).unwrap_err().kind,
			ErrorKind::InvalidValue { into: "UInt", given: "int", .. }
		);
	}

	#[test]
	fn wide_shifts() {
		assert_eq!(int(1).shift_left(64).unwrap().payload(), Some(&0));
		assert_eq!(int(-5).shift_right(100).unwrap().payload(), Some(&-1));
		assert_eq!(int(5).shift_right(u32::MAX).unwrap().payload(), Some(&0));
	}

	#[test]
	fn operands_are_untouched() {
		let six = Boxed::<Int>::new_nullable(6).unwrap();
		let result = six.bit_not();

		assert_eq!(six.payload(), Some(&6));
		assert!(result.is_nullable());
		assert!(result.slot().is_none());
	}

	#[test]
	fn null_is_zero() {
		let null = Boxed::<Int>::new_nullable(Value::Null).unwrap();
		assert_eq!(null.bit_or(5).unwrap().payload(), Some(&5));
	}
}
