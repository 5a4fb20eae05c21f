//! `XmlEnum` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

struct VariantSpec<'a> {
    ident: &'a syn::Ident,
    wire: Option<String>,
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "XmlEnum can only be derived for enums",
        ));
    };
    require_repr_i32(input)?;

    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "XmlEnum variants cannot carry data",
            ));
        }

        let mut rename: Option<LitStr> = None;
        let mut sentinel = variant.ident == "Unspecified";
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("xml")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("sentinel") {
                    sentinel = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown xml variant attribute"))
                }
            })?;
        }

        let wire = if sentinel {
            None
        } else {
            Some(match rename {
                Some(lit) => lit.value(),
                None => wire_name(&name_str, &variant.ident.to_string()),
            })
        };
        variants.push(VariantSpec {
            ident: &variant.ident,
            wire,
        });
    }

    if variants.iter().filter(|v| v.wire.is_none()).count() > 1 {
        return Err(syn::Error::new_spanned(
            name,
            "XmlEnum allows at most one sentinel variant",
        ));
    }

    let as_str_arms = variants.iter().map(|v| {
        let ident = v.ident;
        let wire = v.wire.as_deref().unwrap_or("");
        quote! { Self::#ident => #wire }
    });
    let listed: Vec<&syn::Ident> = variants
        .iter()
        .filter(|v| v.wire.is_some())
        .map(|v| v.ident)
        .collect();
    let sentinel = match variants.iter().find(|v| v.wire.is_none()) {
        Some(v) => {
            let ident = v.ident;
            quote! { ::core::option::Option::Some(Self::#ident) }
        }
        None => quote! { ::core::option::Option::None },
    };
    let wires: Vec<&str> = variants.iter().filter_map(|v| v.wire.as_deref()).collect();
    let try_from_arms = variants.iter().map(|v| {
        let ident = v.ident;
        quote! { x if x == Self::#ident as i32 => ::core::result::Result::Ok(Self::#ident) }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::ddexkit_core::XmlEnum for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;
            const ALL: &'static [Self] = &[#(Self::#listed),*];
            const SENTINEL: ::core::option::Option<Self> = #sentinel;

            fn as_xml_str(&self) -> &'static str {
                match self {
                    #(#as_str_arms,)*
                }
            }

            fn parse_xml_str(s: &str) -> ::core::option::Option<Self> {
                <Self as ::ddexkit_core::XmlEnum>::ALL
                    .iter()
                    .copied()
                    .find(|v| ::ddexkit_core::XmlEnum::as_xml_str(v).eq_ignore_ascii_case(s))
            }

            fn descriptor() -> ::ddexkit_core::EnumDescriptor {
                ::ddexkit_core::EnumDescriptor {
                    name: #name_str,
                    values: &[#(#wires),*],
                }
            }
        }

        impl #impl_generics ::ddexkit_core::XmlText for #name #ty_generics #where_clause {
            fn from_text(text: &str, context: &str) -> ::ddexkit_core::Result<Self> {
                ::ddexkit_core::enums::parse_enum(text, context)
            }

            fn to_text(&self) -> ::std::string::String {
                ::ddexkit_core::enums::format_enum(self)
            }
        }

        impl #impl_generics ::core::convert::From<#name #ty_generics> for i32 #where_clause {
            fn from(value: #name #ty_generics) -> i32 {
                value as i32
            }
        }

        impl #impl_generics ::core::convert::TryFrom<i32> for #name #ty_generics #where_clause {
            type Error = ::ddexkit_core::CodecError;

            fn try_from(value: i32) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    #(#try_from_arms,)*
                    other => ::core::result::Result::Err(::ddexkit_core::CodecError::invalid_value(
                        #name_str,
                        other.to_string(),
                        "enumeration discriminant",
                    )),
                }
            }
        }
    })
}

fn require_repr_i32(input: &DeriveInput) -> syn::Result<()> {
    let mut found = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("i32") {
                found = true;
            }
            Ok(())
        })?;
    }
    if found {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.ident,
            "XmlEnum requires #[repr(i32)]",
        ))
    }
}

/// Strips the enum name from the front of a variant name.
fn wire_name(enum_name: &str, variant: &str) -> String {
    match variant.strip_prefix(enum_name) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => variant.to_string(),
    }
}
