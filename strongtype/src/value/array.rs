use crate::value::Value;
use std::fmt::{self, Debug, Display, Formatter};

/// The key of an [`Array`] entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Index(i64),
	Name(String),
}

impl Debug for Key {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Index(index) => Debug::fmt(index, f),
			Self::Name(name) => Debug::fmt(name, f),
		}
	}
}

impl Display for Key {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Index(index) => Display::fmt(index, f),
			Self::Name(name) => f.write_str(name),
		}
	}
}

impl From<i64> for Key {
	fn from(index: i64) -> Self {
		Self::Index(index)
	}
}

impl From<i32> for Key {
	fn from(index: i32) -> Self {
		Self::Index(index.into())
	}
}

impl From<&str> for Key {
	fn from(name: &str) -> Self {
		Self::Name(name.to_owned())
	}
}

impl From<String> for Key {
	fn from(name: String) -> Self {
		Self::Name(name)
	}
}

/// An ordered, keyed collection of [`Value`]s.
///
/// Entries keep their insertion order. Pushing appends under the next free integer index, and
/// inserting under an existing key replaces that entry in place.
///
/// Arrays are expected to be small, so lookups are linear.
///
/// # Examples
/// ```
/// # use strongtype::value::{Array, Key};
/// let mut array = Array::new();
/// array.push(1);
/// array.insert("name", "machin");
/// array.push(2);
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.keys().cloned().collect::<Vec<_>>(), [Key::Index(0), Key::from("name"), Key::Index(1)]);
/// ```
#[derive(Clone, Default)]
pub struct Array {
	entries: Vec<(Key, Value)>,
	next_index: i64,
}

impl Array {
	/// Creates a new, empty [`Array`].
	#[must_use]
	pub const fn new() -> Self {
		Self { entries: Vec::new(), next_index: 0 }
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Appends `value` under the next free integer index, returning that index.
	///
	/// Returns `None` and leaves `self` alone once the integer indices are exhausted.
	pub fn push(&mut self, value: impl Into<Value>) -> Option<i64> {
		let index = self.next_index;
		let key = Key::Index(index);

		if self.get(&key).is_some() {
			return None;
		}

		self.entries.push((key, value.into()));
		self.next_index = index.saturating_add(1);
		Some(index)
	}

	/// Sets `key` to `value`, returning the previous value if `key` was already present.
	pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
		let key = key.into();
		let value = value.into();

		if let Some(slot) = self.get_mut(&key) {
			return Some(std::mem::replace(slot, value));
		}

		if let Key::Index(index) = key {
			self.next_index = self.next_index.max(index.saturating_add(1));
		}

		self.entries.push((key, value));
		None
	}

	#[must_use]
	pub fn get(&self, key: &Key) -> Option<&Value> {
		self.entries.iter().find(|(k, _)| k == key).map(|(_, value)| value)
	}

	pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
		self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, value)| value)
	}

	/// Removes `key`, returning its value if it was present. Order of the others is preserved.
	pub fn remove(&mut self, key: &Key) -> Option<Value> {
		let position = self.entries.iter().position(|(k, _)| k == key)?;
		Some(self.entries.remove(position).1)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> + '_ {
		self.entries.iter().map(|(key, value)| (key, value))
	}

	pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
		self.entries.iter().map(|(key, _)| key)
	}

	pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
		self.entries.iter().map(|(_, value)| value)
	}
}

impl Debug for Array {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<V: Into<Value>> FromIterator<V> for Array {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		let mut array = Self::new();

		for value in iter {
			array.push(value);
		}

		array
	}
}

impl<V: Into<Value>> From<Vec<V>> for Array {
	fn from(values: Vec<V>) -> Self {
		values.into_iter().collect()
	}
}
