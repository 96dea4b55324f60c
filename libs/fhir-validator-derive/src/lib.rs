//! `#[derive(Validate)]` for FHIR model types
//!
//! Field attributes (`#[fhir(...)]`):
//!
//! - `required` - the element must be present (non-empty for strings)
//! - `min = N` - a list must hold at least `N` elements
//! - `choice` - an `Option<Enum>` choice group, checked for exclusivity
//! - `extensions` - the flattened catch-all map consulted by choice checks
//! - `skip` - not walked
//!
//! Container attributes:
//!
//! - `resource = "Account"` - checks the `resource_type` discriminator first
//!   and implements `Resource`
//!
//! JSON names come from `#[serde(rename)]` or the lowerCamelCase field name.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod enums;
mod structs;

#[proc_macro_derive(Validate, attributes(fhir))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        syn::Data::Struct(data) => structs::expand(&input, data),
        syn::Data::Enum(data) => enums::expand(&input, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Validate cannot be derived for unions",
        )),
    };

    expanded
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
