#![allow(
	clippy::unreadable_literal, // there's only a handful and they're not meant to be readable.

	// TODOS:
	clippy::missing_errors_doc,
	clippy::missing_panics_doc,

	// Things that could be issues but aren't
	clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss,

	// Simply my coding style, bite me clippy
	clippy::module_inception,
	clippy::module_name_repetitions,
)]

// Lets `#[derive(NamedType)]` expand to `::strongtype::...` inside this crate too.
extern crate self as strongtype;

extern crate static_assertions as sa;

#[macro_use]
extern crate tracing;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

pub use strongtype_macros::NamedType;

pub mod error;
pub mod property;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use property::PropertyDispatch;
pub use value::{Boxed, Kind, ToValue, Value, Variable};
