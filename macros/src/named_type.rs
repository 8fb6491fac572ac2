use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Lit, Meta, NestedMeta};

fn get_type_name(input: &DeriveInput) -> syn::Result<Option<String>> {
	for attr in input.attrs.iter().filter(|attr| attr.path.is_ident("named_type")) {
		let list = match attr.parse_meta()? {
			Meta::List(list) => list,
			other => return Err(syn::Error::new_spanned(other, "expected `#[named_type(name = \"...\")]`")),
		};

		for nested in list.nested {
			match nested {
				NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("name") => match nv.lit {
					Lit::Str(name) => return Ok(Some(name.value())),
					other => return Err(syn::Error::new_spanned(other, "`name` must be a string literal")),
				},
				other => return Err(syn::Error::new_spanned(other, "unknown `named_type` option")),
			}
		}
	}

	Ok(None)
}

pub fn expand_named_type(input: DeriveInput) -> syn::Result<TokenStream> {
	let type_name = get_type_name(&input)?.unwrap_or_else(|| input.ident.to_string());
	let name = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics ::strongtype::value::NamedType for #name #ty_generics #where_clause {
			const TYPENAME: ::strongtype::value::Typename = #type_name;
		}
	})
}
