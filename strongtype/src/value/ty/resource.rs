use crate::value::{Kind, ResourceHandle, Value};

/// An open resource handle.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Resource;

impl Kind for Resource {
	type Payload = ResourceHandle;

	/// A handle that's already closed, as there's nothing to be open to.
	fn empty() -> ResourceHandle {
		let handle = ResourceHandle::new("none");
		handle.close();
		handle
	}

	fn to_value(payload: &ResourceHandle) -> Value {
		Value::Resource(payload.clone())
	}

	fn from_resource(resource: &ResourceHandle) -> Option<ResourceHandle> {
		Some(resource.clone())
	}
}
