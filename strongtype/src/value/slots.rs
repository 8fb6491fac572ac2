//! The process-wide memory slot table.
//!
//! Every registered [`Boxed`](crate::value::Boxed) owns exactly one slot, which records the
//! [`Variable`](crate::value::Variable) binding it was stored into. When a registered box is
//! dropped, it looks its slot up to find out whether something else has since been written into
//! that binding (see [`Boxed`'s `Drop`](crate::value::Boxed#slot-reconciliation)).
//!
//! Slots are generational indices: a freed index is handed out again with a bumped generation, so
//! a stale [`SlotId`] never aliases a live one. Indices whose generation can't be bumped are
//! retired instead.

use crate::value::variable::Binding;
use crate::{Error, ErrorKind, Result};
use once_cell::sync::OnceCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// The id of an entry in the slot table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
	index: u32,
	generation: u32,
}

sa::assert_eq_size!(SlotId, u64);

impl SlotId {
	#[must_use]
	pub const fn index(self) -> u32 {
		self.index
	}

	#[must_use]
	pub const fn generation(self) -> u32 {
		self.generation
	}
}

impl Debug for SlotId {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "SlotId({self})")
	}
}

impl Display for SlotId {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "#{}v{}", self.index, self.generation)
	}
}

#[derive(Debug, Default)]
struct Entry {
	generation: u32,
	occupant: Option<Weak<Binding>>,
}

#[derive(Debug, Default)]
pub(crate) struct SlotTable {
	entries: Vec<Entry>,
	free: Vec<u32>,
	live: usize,
}

impl SlotTable {
	/// Reserves a fresh slot occupied by `binding`.
	pub(crate) fn allocate(&mut self, binding: &Arc<Binding>) -> SlotId {
		let occupant = Some(Arc::downgrade(binding));

		let index = if let Some(index) = self.free.pop() {
			self.entries[index as usize].occupant = occupant;
			index
		} else {
			let index = self.entries.len() as u32;
			self.entries.push(Entry { generation: 0, occupant });
			index
		};

		self.live += 1;
		let slot = SlotId { index, generation: self.entries[index as usize].generation };
		trace!(%slot, live=self.live, "allocated slot");
		slot
	}

	fn entry(&self, slot: SlotId) -> Option<&Entry> {
		self.entries
			.get(slot.index as usize)
			.filter(|entry| entry.generation == slot.generation && entry.occupant.is_some())
	}

	/// Gets the binding `slot` refers to.
	///
	/// Fails if `slot` was freed (or never allocated), or if its binding has since been dropped.
	#[track_caller]
	pub(crate) fn occupant(&self, slot: SlotId) -> Result<Arc<Binding>> {
		self.entry(slot)
			.and_then(|entry| entry.occupant.as_ref())
			.and_then(Weak::upgrade)
			.ok_or_else(|| Error::from(ErrorKind::UnknownSlot(slot)))
	}

	/// Releases `slot`. Any later lookup through the same id fails.
	#[track_caller]
	pub(crate) fn free(&mut self, slot: SlotId) -> Result<()> {
		if self.entry(slot).is_none() {
			return Err(Error::from(ErrorKind::UnknownSlot(slot)));
		}

		let entry = &mut self.entries[slot.index as usize];
		entry.occupant = None;
		self.live -= 1;

		// An index whose generations ran out is never handed out again.
		match entry.generation.checked_add(1) {
			Some(generation) => {
				entry.generation = generation;
				self.free.push(slot.index);
			}
			None => debug!(%slot, "retiring slot index"),
		}

		trace!(%slot, live=self.live, "freed slot");
		Ok(())
	}

	fn is_live(&self, slot: SlotId) -> bool {
		self.entry(slot).is_some()
	}
}

fn table() -> &'static Mutex<SlotTable> {
	static TABLE: OnceCell<Mutex<SlotTable>> = OnceCell::new();

	TABLE.get_or_init(Default::default)
}

/// Locks the global slot table.
///
/// Anything that also needs a binding's lock must take this one first.
pub(crate) fn lock() -> MutexGuard<'static, SlotTable> {
	table().lock().unwrap_or_else(PoisonError::into_inner)
}

/// Checks to see whether `slot` is currently allocated.
#[must_use]
pub fn is_live(slot: SlotId) -> bool {
	lock().is_live(slot)
}

/// The amount of slots currently allocated, process-wide.
#[must_use]
pub fn live_count() -> usize {
	lock().live
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allocations_are_distinct() {
		let mut table = SlotTable::default();
		let binding = Arc::new(Binding::default());

		let first = table.allocate(&binding);
		let second = table.allocate(&binding);

		assert_ne!(first, second);
		assert_eq!(table.live, 2);
		assert!(Arc::ptr_eq(&table.occupant(first).unwrap(), &binding));
	}

	#[test]
	fn freed_indices_are_reused_with_new_generation() {
		let mut table = SlotTable::default();
		let binding = Arc::new(Binding::default());

		let old = table.allocate(&binding);
		table.free(old).unwrap();
		let new = table.allocate(&binding);

		assert_eq!(old.index(), new.index());
		assert_ne!(old, new);
		assert_matches!(table.occupant(old).unwrap_err().kind, ErrorKind::UnknownSlot(slot) if slot == old);
		assert_matches!(table.free(old).unwrap_err().kind, ErrorKind::UnknownSlot(_));
		assert!(table.is_live(new));
	}

	#[test]
	fn dropped_bindings_have_no_occupant() {
		let mut table = SlotTable::default();
		let binding = Arc::new(Binding::default());
		let slot = table.allocate(&binding);

		drop(binding);

		assert_matches!(table.occupant(slot).unwrap_err().kind, ErrorKind::UnknownSlot(_));
		assert!(table.free(slot).is_ok());
	}

	#[test]
	fn exhausted_indices_are_retired() {
		let mut table = SlotTable::default();
		let binding = Arc::new(Binding::default());

		let first = table.allocate(&binding);
		table.entries[first.index() as usize].generation = u32::MAX;
		let last = SlotId { index: first.index(), generation: u32::MAX };
		table.free(last).unwrap();

		let next = table.allocate(&binding);
		assert_ne!(next.index(), last.index());
		assert!(!table.is_live(last));
		assert_matches!(table.occupant(last).unwrap_err().kind, ErrorKind::UnknownSlot(_));
		assert_eq!(table.live, 1);
	}
}
