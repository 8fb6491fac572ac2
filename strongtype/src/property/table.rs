use super::Property;
use hashbrown::HashMap;
use std::fmt::{self, Debug, Formatter};

/// A closed set of named [`Property`]s, meant to be built once per type.
pub struct PropertyTable<T>(HashMap<&'static str, Property<T>>);

impl<T> PropertyTable<T> {
	/// Creates a table out of `properties`.
	///
	/// # Panics
	/// Panics if a name is declared twice.
	pub fn new(properties: impl IntoIterator<Item = (&'static str, Property<T>)>) -> Self {
		let mut table = HashMap::new();

		for (name, property) in properties {
			assert!(table.insert(name, property).is_none(), "property `{name}` was declared twice");
		}

		Self(table)
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<Property<T>> {
		self.0.get(name).copied()
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.0.keys().copied()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<T> Debug for PropertyTable<T> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}
