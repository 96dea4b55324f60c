use heck::ToLowerCamelCase;
use syn::ext::IdentExt;
use syn::{Attribute, Field, Ident, LitInt, LitStr, Type};

/// Container-level `#[fhir(...)]` options.
#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub resource: Option<LitStr>,
}

impl ContainerAttrs {
    pub fn parse(ident: &Ident, attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("fhir")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("resource") {
                    out.resource = Some(if meta.input.peek(syn::Token![=]) {
                        meta.value()?.parse()?
                    } else {
                        LitStr::new(&ident.unraw().to_string(), ident.span())
                    });
                    Ok(())
                } else {
                    Err(meta.error("unsupported container attribute, expected `resource`"))
                }
            })?;
        }
        Ok(out)
    }
}

/// Field-level `#[fhir(...)]` options.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub required: bool,
    pub min: Option<usize>,
    pub choice: bool,
    pub extensions: bool,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("fhir")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    out.required = true;
                } else if meta.path.is_ident("min") {
                    let lit: LitInt = meta.value()?.parse()?;
                    out.min = Some(lit.base10_parse()?);
                } else if meta.path.is_ident("choice") {
                    out.choice = true;
                } else if meta.path.is_ident("extensions") {
                    out.extensions = true;
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else {
                    return Err(meta.error(
                        "unsupported field attribute, expected one of `required`, `min`, `choice`, `extensions`, `skip`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// Value of a plain `#[serde(rename = "...")]`, ignoring every other serde option.
pub(crate) fn serde_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    serde_string(attrs, "rename")
}

/// Path given to `#[serde(deserialize_with = "...")]` or `#[serde(with = "...")]`.
pub(crate) fn serde_deserialize_with(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    Ok(serde_string(attrs, "deserialize_with")?.or(serde_string(attrs, "with")?))
}

fn serde_string(attrs: &[Attribute], key: &str) -> syn::Result<Option<String>> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) && meta.input.peek(syn::Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                found = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<syn::Expr>()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<proc_macro2::TokenStream>()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

/// JSON element name of a field: the serde rename, else lowerCamelCase of the
/// identifier with any keyword-avoiding trailing underscore removed.
pub(crate) fn json_name(field: &Field) -> syn::Result<String> {
    if let Some(rename) = serde_rename(&field.attrs)? {
        return Ok(rename);
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    Ok(ident
        .unraw()
        .to_string()
        .trim_end_matches('_')
        .to_lower_camel_case())
}

/// How a field wraps its element type.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Plain,
    Option,
    Vec,
    OptionVec,
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    p.path.segments.last()
}

fn single_type_arg(segment: &syn::PathSegment) -> Option<&Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

pub(crate) fn container_kind(ty: &Type) -> ContainerKind {
    let Some(seg) = last_segment(ty) else {
        return ContainerKind::Plain;
    };

    if seg.ident == "Option" {
        let is_vec = single_type_arg(seg)
            .and_then(last_segment)
            .is_some_and(|inner| inner.ident == "Vec" && single_type_arg(inner).is_some());
        if is_vec {
            return ContainerKind::OptionVec;
        }
        if single_type_arg(seg).is_some() {
            return ContainerKind::Option;
        }
    }

    if seg.ident == "Vec" && single_type_arg(seg).is_some() {
        return ContainerKind::Vec;
    }

    ContainerKind::Plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn detects_containers() {
        assert!(container_kind(&parse_quote!(String)) == ContainerKind::Plain);
        assert!(container_kind(&parse_quote!(Option<Coding>)) == ContainerKind::Option);
        assert!(container_kind(&parse_quote!(Vec<Identifier>)) == ContainerKind::Vec);
        assert!(
            container_kind(&parse_quote!(Option<Vec<Identifier>>)) == ContainerKind::OptionVec
        );
        assert!(
            container_kind(&parse_quote!(std::option::Option<Box<Reference>>))
                == ContainerKind::Option
        );
    }

    #[test]
    fn json_name_prefers_serde_rename() {
        let field: Field = parse_quote! {
            #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
            pub is_abstract: Option<bool>
        };
        assert_eq!(json_name(&field).unwrap(), "abstract");
    }

    #[test]
    fn json_name_camel_cases_identifier() {
        let field: Field = parse_quote!(pub value_set: Option<String>);
        assert_eq!(json_name(&field).unwrap(), "valueSet");

        let field: Field = parse_quote!(pub type_: Option<String>);
        assert_eq!(json_name(&field).unwrap(), "type");

        let field: Field = parse_quote! {
            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub r#use: Vec<String>
        };
        assert_eq!(json_name(&field).unwrap(), "use");
    }

    #[test]
    fn parses_field_attributes() {
        let field: Field = parse_quote! {
            #[fhir(min = 2)]
            pub format: Vec<String>
        };
        let attrs = FieldAttrs::parse(&field.attrs).unwrap();
        assert_eq!(attrs.min, Some(2));
        assert!(!attrs.required);

        let field: Field = parse_quote! {
            #[fhir(bogus)]
            pub format: Vec<String>
        };
        assert!(FieldAttrs::parse(&field.attrs).is_err());
    }

    #[test]
    fn reads_serde_string_options() {
        let field: syn::Field = parse_quote! {
            #[serde(
                flatten,
                deserialize_with = "ferrum_validator::choice::deserialize",
                skip_serializing_if = "Option::is_none"
            )]
            pub onset: Option<ConditionOnset>
        };
        assert_eq!(
            serde_deserialize_with(&field.attrs).unwrap().as_deref(),
            Some("ferrum_validator::choice::deserialize")
        );
        assert_eq!(serde_rename(&field.attrs).unwrap(), None);

        let plain: syn::Field = parse_quote! {
            #[serde(flatten, skip_serializing_if = "Option::is_none")]
            pub onset: Option<ConditionOnset>
        };
        assert_eq!(serde_deserialize_with(&plain.attrs).unwrap(), None);
    }
}
