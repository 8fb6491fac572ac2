use crate::value::{SlotId, Typename};
use std::fmt::{self, Display, Formatter};
use std::panic::Location;

/// An error type that contains both the [`Location`] it was raised at and an [`ErrorKind`].
#[derive(Debug)]
#[must_use]
pub struct Error {
	pub kind: ErrorKind,
	pub location: &'static Location<'static>,
}

/// Type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which kind of property access failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
	Get,
	Set,
	Delete,
}

/// Possible errors that can be raised by strong typing and property dispatch.
#[derive(Debug)]
#[must_use]
#[non_exhaustive]
pub enum ErrorKind {
	/// No handler exists for `property` on `object` for the given `access`.
	///
	/// This is the only error [`PropertyDispatch::has`](crate::PropertyDispatch::has) recovers from.
	UnknownProperty {
		object: Typename,
		property: String,
		access: Access,
		/// The value that was being written, rendered for diagnostics.
		value: Option<String>,
	},

	/// A value of an acceptable kind failed a handler's domain rule.
	InvalidValue {
		into: Typename,
		given: Typename,
		reason: Option<String>,
	},

	/// The raw input's runtime kind has no coercion handler at all.
	TypeMismatch {
		expected: Typename,
		given: Typename,
	},

	/// Strong-type creation targeted an occupied variable with override disabled.
	OverrideNotAllowed {
		typename: Typename,
	},

	/// The slot is free, stale, or its binding no longer exists.
	UnknownSlot(SlotId),

	/// A feature that was declared but deliberately left for later.
	NotImplemented(&'static str),
}

impl Error {
	/// Gets the [`ErrorKind`] of `self`.
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Shorthand for an [`ErrorKind::InvalidValue`] carrying a reason.
	#[track_caller]
	pub fn invalid_value(into: Typename, given: Typename, reason: impl Into<String>) -> Self {
		Self::from(ErrorKind::InvalidValue { into, given, reason: Some(reason.into()) })
	}

	/// Whether this is an [`ErrorKind::UnknownProperty`].
	#[must_use]
	pub fn is_unknown_property(&self) -> bool {
		matches!(self.kind, ErrorKind::UnknownProperty { .. })
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		if f.alternate() {
			write!(f, "error: {}\n  at {}", self.kind, self.location)
		} else {
			Display::fmt(&self.kind, f)
		}
	}
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::UnknownProperty { object, property, access: Access::Get, .. } => {
				write!(f, "{object}::${property} : invalid property.")
			}
			Self::UnknownProperty { object, property, access: Access::Set, value } => {
				write!(f, "{object}::${property} : attempt to write invalid property")?;
				if let Some(value) = value {
					write!(f, ", using value {value}")?;
				}
				write!(f, ".")
			}
			Self::UnknownProperty { object, property, access: Access::Delete, .. } => {
				write!(f, "{object}::${property} : invalid attempt to delete property.")
			}
			Self::InvalidValue { into, given, reason: None } => {
				write!(f, "{given} value rejected by {into}")
			}
			Self::InvalidValue { into, given, reason: Some(reason) } => {
				write!(f, "{given} value rejected by {into}: {reason}")
			}
			Self::TypeMismatch { expected, given } => {
				write!(f, "invalid type {given}, expected {expected}")
			}
			Self::OverrideNotAllowed { typename } => {
				write!(f, "cannot create {typename}: variable is already set and override is disabled")
			}
			Self::UnknownSlot(slot) => write!(f, "slot {slot} is not allocated"),
			Self::NotImplemented(what) => write!(f, "feature not implemented yet: {what}"),
		}
	}
}

impl From<ErrorKind> for Error {
	#[track_caller]
	fn from(kind: ErrorKind) -> Self {
		Self { kind, location: Location::caller() }
	}
}

impl std::error::Error for Error {}
