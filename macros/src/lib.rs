use syn::{parse_macro_input, DeriveInput};
mod named_type;

/// Implements `strongtype::value::NamedType` for the annotated type.
///
/// The type name defaults to the identifier; it can be overridden with
/// `#[named_type(name = "...")]`.
#[proc_macro_derive(NamedType, attributes(named_type))]
pub fn named_type(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	named_type::expand_named_type(input).unwrap_or_else(syn::Error::into_compile_error).into()
}
