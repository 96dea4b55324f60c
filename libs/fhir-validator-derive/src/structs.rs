use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, LitStr};

use crate::attrs::{
    container_kind, json_name, serde_deserialize_with, ContainerAttrs, ContainerKind, FieldAttrs,
};

pub(crate) fn expand(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let container = ContainerAttrs::parse(name, &input.attrs)?;

    let fields = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => {
            return Ok(unit_impl(input));
        }
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Validate requires named fields",
            ))
        }
    };

    let parsed = fields
        .iter()
        .map(|f| Ok((f, FieldAttrs::parse(&f.attrs)?)))
        .collect::<syn::Result<Vec<_>>>()?;

    let extensions = parsed
        .iter()
        .find(|(_, attrs)| attrs.extensions)
        .and_then(|(f, _)| f.ident.clone());

    let mut checks = Vec::new();

    if let Some(resource) = &container.resource {
        if !fields
            .iter()
            .any(|f| f.ident.as_ref().is_some_and(|i| i == "resource_type"))
        {
            return Err(syn::Error::new_spanned(
                name,
                "#[fhir(resource)] requires a `resource_type: String` field",
            ));
        }
        checks.push(quote! {
            ctx.resource_type(#resource, &self.resource_type)?;
        });
    }

    for (field, attrs) in &parsed {
        let Some(ident) = &field.ident else { continue };
        if attrs.skip || attrs.extensions {
            continue;
        }
        if container.resource.is_some() && ident == "resource_type" {
            continue;
        }

        let json = json_name(field)?;
        let kind = container_kind(&field.ty);

        if attrs.choice {
            if kind != ContainerKind::Option {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "#[fhir(choice)] fields must be `Option<ChoiceEnum>`",
                ));
            }
            if serde_deserialize_with(&field.attrs)?.is_none() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[fhir(choice)] fields must set \
                     `#[serde(deserialize_with = \"ferrum_validator::choice::deserialize\")]`",
                ));
            }
            let Some(extra) = &extensions else {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[fhir(choice)] needs a sibling `#[fhir(extensions)]` map to detect conflicts",
                ));
            };
            let group = LitStr::new(&format!("{json}[x]"), ident.span());
            let required = attrs.required;
            checks.push(quote! {
                ctx.choice(#group, self.#ident.as_ref(), &self.#extra, #required)?;
            });
            continue;
        }

        let key = LitStr::new(&json, ident.span());
        let min = attrs.min.or(attrs.required.then_some(1));

        let check = match kind {
            ContainerKind::Plain => {
                let required = attrs.required.then(|| {
                    quote! { ctx.required_value(#key, &self.#ident)?; }
                });
                quote! {
                    #required
                    ctx.field(#key, &self.#ident)?;
                }
            }
            ContainerKind::Option => {
                let required = attrs.required.then(|| {
                    quote! { ctx.required(#key, &self.#ident)?; }
                });
                quote! {
                    #required
                    if let ::core::option::Option::Some(value) = &self.#ident {
                        ctx.field(#key, value)?;
                    }
                }
            }
            ContainerKind::Vec => {
                let min = min.map(|min| {
                    quote! { ctx.min_len(#key, self.#ident.len(), #min)?; }
                });
                quote! {
                    #min
                    ctx.each(#key, &self.#ident)?;
                }
            }
            ContainerKind::OptionVec => {
                let min = min.map(|min| {
                    quote! {
                        ctx.min_len(#key, self.#ident.as_ref().map_or(0, ::std::vec::Vec::len), #min)?;
                    }
                });
                quote! {
                    #min
                    if let ::core::option::Option::Some(items) = &self.#ident {
                        ctx.each(#key, items)?;
                    }
                }
            }
        };
        checks.push(check);
    }

    let type_name = container
        .resource
        .clone()
        .unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let resource_impl = container.resource.as_ref().map(|resource| {
        quote! {
            impl #impl_generics ::ferrum_validator::Resource for #name #ty_generics #where_clause {
                const RESOURCE_TYPE: &'static str = #resource;

                fn resource_type(&self) -> &str {
                    &self.resource_type
                }

                fn empty() -> Self {
                    Self {
                        resource_type: ::std::string::String::from(#resource),
                        ..::core::default::Default::default()
                    }
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::ferrum_validator::Validate for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn validate_with(
                &self,
                ctx: &mut ::ferrum_validator::ValidationContext,
            ) -> ::core::result::Result<(), ::ferrum_validator::ValidationError> {
                #(#checks)*
                ::core::result::Result::Ok(())
            }

            fn type_name(&self) -> &'static str {
                #type_name
            }
        }

        #resource_impl
    })
}

/// Marker structs carry no constraints.
fn unit_impl(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let type_name = LitStr::new(&name.to_string(), name.span());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::ferrum_validator::Validate for #name #ty_generics #where_clause {
            fn validate_with(
                &self,
                _ctx: &mut ::ferrum_validator::ValidationContext,
            ) -> ::core::result::Result<(), ::ferrum_validator::ValidationError> {
                ::core::result::Result::Ok(())
            }

            fn type_name(&self) -> &'static str {
                #type_name
            }
        }
    }
}
