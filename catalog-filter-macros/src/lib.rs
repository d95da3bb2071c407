//! Procedural macros for catalog-filter
//!
//! - `#[derive(Filterable)]` - declare an entity's filter schema from its struct

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type,
};

/// Derive `catalog_filter::Filterable` for a struct with named fields.
///
/// Every field becomes a schema entry named after the field, typed from its
/// Rust type:
///
/// - `String`, `&str`, `Box<str>` - `FieldType::String`
/// - integer primitives - `FieldType::Integer`
/// - `f32`, `f64` - `FieldType::Float`
/// - `Option<T>` - the type of `T`
/// - anything else (collections, relations, timestamps) - `FieldType::Other`
///
/// # Usage
///
/// ```ignore
/// #[derive(Filterable)]
/// #[filter(entity = "offers")]
/// pub struct Offer {
///     pub name: String,
///     pub price: f64,
///     #[filter(rename = "type")]
///     pub kind: String,
///     #[filter(skip)]
///     pub internal_note: String,
/// }
/// ```
///
/// Without `entity`, the entity name is the struct name in snake case.
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn derive_filterable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    // The schema lives in one static per impl, which generic structs would share
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Filterable cannot be derived for generic structs",
        ));
    }

    let mut entity = name.to_string().to_case(Case::Snake);
    for attr in &input.attrs {
        if !attr.path().is_ident("filter") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("entity") {
                let value: LitStr = meta.value()?.parse()?;
                entity = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported filter attribute, expected `entity = \"...\"`"))
            }
        })?;
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Filterable requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut declarations = Vec::new();
    for field in fields {
        let mut skip = false;
        let mut column = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("filter") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    column = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported filter attribute, expected `skip` or `rename = \"...\"`",
                    ))
                }
            })?;
        }

        if skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let column = column.unwrap_or_else(|| ident.unraw().to_string());
        let field_type = classify(&field.ty);

        declarations.push(quote! {
            .field(#column, ::catalog_filter::FieldType::#field_type)
        });
    }

    Ok(quote! {
        impl ::catalog_filter::Filterable for #name {
            const ENTITY: &'static str = #entity;

            fn schema() -> &'static ::catalog_filter::EntitySchema {
                static SCHEMA: ::catalog_filter::__private::OnceCell<::catalog_filter::EntitySchema> =
                    ::catalog_filter::__private::OnceCell::new();
                SCHEMA.get_or_init(|| {
                    ::catalog_filter::EntitySchema::builder(#entity)
                        #(#declarations)*
                        .build()
                })
            }
        }
    })
}

/// Map a Rust field type to the `FieldType` variant name.
fn classify(ty: &Type) -> Ident {
    let variant = match ty {
        Type::Reference(reference) => return classify(&reference.elem),
        Type::Group(group) => return classify(&group.elem),
        Type::Path(path) => match path.path.segments.last() {
            Some(segment) => match segment.ident.to_string().as_str() {
                "String" | "str" => "String",
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" => "Integer",
                "f32" | "f64" => "Float",
                "Option" | "Box" => match first_type_argument(&segment.arguments) {
                    Some(inner) => return classify(inner),
                    None => "Other",
                },
                _ => "Other",
            },
            None => "Other",
        },
        _ => "Other",
    };
    format_ident!("{}", variant)
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
