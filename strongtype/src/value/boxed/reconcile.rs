use super::{AnyBox, Boxed};
use crate::value::slots::SlotTable;
use crate::value::variable::Binding;
use crate::value::{slots, Kind, SlotId, Value};
use std::sync::Arc;

/// Whatever has to be dropped once the slot table is unlocked.
#[derive(Default)]
struct Graveyard {
	_binding: Option<Arc<Binding>>,
	_orphan: Option<Value>,
}

impl<K: Kind> Boxed<K> {
	/// Promotes the orphaned contents of `binding` into a new registered box, if there are any.
	fn rescue(&self, table: &mut SlotTable, slot: SlotId, binding: &Arc<Binding>, graveyard: &mut Graveyard) {
		let mut current = binding.lock();

		let is_orphan = match &*current {
			Value::Null => false,
			// Whoever registered this box has already claimed the binding.
			Value::Boxed(boxed) => !boxed.is_registered(),
			_ => true,
		};

		if !is_orphan {
			return;
		}

		let orphan = std::mem::take(&mut *current);

		match Self::construct(&orphan, self.nullable) {
			Ok(mut rescued) => {
				let new_slot = table.allocate(binding);
				rescued.slot = Some(new_slot);
				debug!(old=%slot, new=%new_slot, typename=K::TYPENAME, given=orphan.typename(), "rescued orphaned value");

				*current = Value::Boxed(AnyBox::new(rescued));
				graveyard._orphan = Some(orphan);
			}
			Err(err) => {
				warn!(%slot, typename=K::TYPENAME, %err, "unable to rescue orphaned value");
				*current = orphan;
			}
		}
	}
}

impl<K: Kind> Drop for Boxed<K> {
	fn drop(&mut self) {
		let Some(slot) = self.slot.take() else {
			return;
		};

		let mut graveyard = Graveyard::default();

		{
			let mut table = slots::lock();

			match table.occupant(slot) {
				Ok(binding) => {
					self.rescue(&mut table, slot, &binding, &mut graveyard);
					graveyard._binding = Some(binding);
				}
				Err(err) => trace!(%slot, %err, "binding is gone, nothing to reconcile"),
			}

			if let Err(err) = table.free(slot) {
				warn!(%slot, %err, "unable to free slot");
			}
		}

		drop(graveyard);
	}
}
