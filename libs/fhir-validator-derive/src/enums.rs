use heck::ToLowerCamelCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields, LitStr};

use crate::attrs::serde_rename;

/// Unit-only enums are coded values with nothing to check. Enums of
/// single-field variants are choice groups: each variant delegates to its
/// payload and the serde keys become the group's `Choice::KEYS`.
pub(crate) fn expand(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    if data.variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
        return Ok(quote! {
            impl #impl_generics ::ferrum_validator::Validate for #name #ty_generics #where_clause {
                fn validate_with(
                    &self,
                    _ctx: &mut ::ferrum_validator::ValidationContext,
                ) -> ::core::result::Result<(), ::ferrum_validator::ValidationError> {
                    ::core::result::Result::Ok(())
                }

                fn type_name(&self) -> &'static str {
                    "code"
                }
            }
        });
    }

    let mut idents = Vec::new();
    let mut keys = Vec::new();
    for variant in &data.variants {
        match &variant.fields {
            Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "choice variants must wrap exactly one value, e.g. `DateTime(String)`",
                ))
            }
        }
        let key = match serde_rename(&variant.attrs)? {
            Some(rename) => rename,
            None => variant.ident.to_string().to_lower_camel_case(),
        };
        idents.push(&variant.ident);
        keys.push(LitStr::new(&key, variant.ident.span()));
    }

    Ok(quote! {
        impl #impl_generics ::ferrum_validator::Validate for #name #ty_generics #where_clause {
            fn validate_with(
                &self,
                ctx: &mut ::ferrum_validator::ValidationContext,
            ) -> ::core::result::Result<(), ::ferrum_validator::ValidationError> {
                match self {
                    #(Self::#idents(value) => ::ferrum_validator::Validate::validate_with(value, ctx),)*
                }
            }

            fn type_name(&self) -> &'static str {
                match self {
                    #(Self::#idents(value) => ::ferrum_validator::Validate::type_name(value),)*
                }
            }

            fn has_value(&self) -> bool {
                match self {
                    #(Self::#idents(value) => ::ferrum_validator::Validate::has_value(value),)*
                }
            }
        }

        impl #impl_generics ::ferrum_validator::Choice for #name #ty_generics #where_clause {
            const KEYS: &'static [&'static str] = &[#(#keys),*];

            fn key(&self) -> &'static str {
                match self {
                    #(Self::#idents(_) => #keys,)*
                }
            }
        }
    })
}
