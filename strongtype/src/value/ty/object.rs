use crate::value::{Kind, ObjectRef, Value};

/// A reference to a host object.
#[derive(Debug, Clone, Copy, crate::NamedType)]
pub struct Object;

/// What a cleared [`Object`] box refers to.
#[derive(Debug, crate::NamedType)]
#[named_type(name = "object")]
pub struct Blank;

impl Kind for Object {
	type Payload = ObjectRef;

	/// A fresh [`Blank`] object, distinct from every other one.
	fn empty() -> ObjectRef {
		ObjectRef::new(Blank)
	}

	fn to_value(payload: &ObjectRef) -> Value {
		Value::Object(payload.clone())
	}

	fn from_object(object: &ObjectRef) -> Option<ObjectRef> {
		Some(object.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Boxed;

	#[test]
	fn keeps_the_same_reference() {
		let object = ObjectRef::new(Blank);
		let boxed = Boxed::<Object>::new(object.clone()).unwrap();

		assert!(boxed.payload().unwrap().ptr_eq(&object));
		assert!(boxed.is_identical(&object));
		assert!(!boxed.equals(&ObjectRef::new(Blank)));
	}

	#[test]
	fn clearing_makes_a_blank_object() {
		let mut boxed = Boxed::<Object>::new(ObjectRef::new(Blank)).unwrap();
		boxed.clear();

		assert_eq!(boxed.payload().unwrap().typename(), "object");
		assert!(boxed.payload().unwrap().downcast_ref::<Blank>().is_some());
	}
}
