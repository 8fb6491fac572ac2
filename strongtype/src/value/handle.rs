use crate::value::{NamedType, Typename};
use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// A shared reference to an arbitrary host object.
///
/// Two `ObjectRef`s are equal only if they refer to the same object.
#[derive(Clone)]
pub struct ObjectRef {
	typename: Typename,
	inner: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
	/// Wraps `object` in a new [`ObjectRef`].
	pub fn new<T: NamedType + Send + Sync + 'static>(object: T) -> Self {
		Self { typename: T::TYPENAME, inner: Arc::new(object) }
	}

	#[must_use]
	pub fn typename(&self) -> Typename {
		self.typename
	}

	/// Gets a reference to the object if it's a `T`.
	#[must_use]
	pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
		self.inner.downcast_ref()
	}

	/// Checks to see whether `self` and `rhs` refer to the same object.
	#[must_use]
	pub fn ptr_eq(&self, rhs: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &rhs.inner)
	}
}

impl Debug for ObjectRef {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{}({:p})", self.typename, Arc::as_ptr(&self.inner))
	}
}

#[derive(Debug)]
struct Resource {
	id: u64,
	kind: &'static str,
	closed: AtomicBool,
}

/// An opaque handle to an external resource, such as a stream.
///
/// Handles are shared: closing one closes every clone of it. A closed handle is a kind of its own
/// that nothing can be coerced from.
#[derive(Clone)]
pub struct ResourceHandle(Arc<Resource>);

impl ResourceHandle {
	/// Creates a new, open handle with a process-unique id.
	#[must_use]
	pub fn new(kind: &'static str) -> Self {
		static NEXT_ID: AtomicU64 = AtomicU64::new(1);

		let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
		Self(Arc::new(Resource { id, kind, closed: AtomicBool::new(false) }))
	}

	#[must_use]
	pub fn id(&self) -> u64 {
		self.0.id
	}

	#[must_use]
	pub fn kind(&self) -> &'static str {
		self.0.kind
	}

	/// Closes the resource, returning whether it was open.
	pub fn close(&self) -> bool {
		!self.0.closed.swap(true, Ordering::AcqRel)
	}

	#[must_use]
	pub fn is_closed(&self) -> bool {
		self.0.closed.load(Ordering::Acquire)
	}
}

impl Debug for ResourceHandle {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "Resource id #{} ({}", self.id(), self.kind())?;

		if self.is_closed() {
			write!(f, ", closed")?;
		}

		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(crate::NamedType)]
	struct Connection;

	#[test]
	fn objects_compare_by_identity() {
		let first = ObjectRef::new(Connection);
		let second = ObjectRef::new(Connection);

		assert!(first.ptr_eq(&first.clone()));
		assert!(!first.ptr_eq(&second));
		assert_eq!(first.typename(), "Connection");
		assert!(first.downcast_ref::<Connection>().is_some());
	}

	#[test]
	fn closing_is_shared_between_clones() {
		let resource = ResourceHandle::new("stream");
		let alias = resource.clone();

		assert!(!alias.is_closed());
		assert!(resource.close());
		assert!(alias.is_closed());
		assert!(!alias.close());
		assert_ne!(resource.id(), ResourceHandle::new("stream").id());
	}
}
