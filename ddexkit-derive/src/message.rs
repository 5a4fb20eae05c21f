//! `XmlMessage` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Ident, LitStr, Type};

/// Parsed `#[xml(...)]` arguments of the struct.
struct RootArgs {
    root: LitStr,
    namespace: Expr,
}

/// How a field is bound.
enum Binding {
    Attr(LitStr),
    Element(LitStr),
    Text,
    NamespaceAttrs,
    Skip,
}

/// Cardinality read off the field type.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Shape {
    One,
    Optional,
    Repeated,
}

struct FieldSpec<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    binding: Binding,
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "XmlMessage can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "XmlMessage requires named fields",
        ));
    };

    let root = parse_root_args(input)?;
    let fields = named
        .named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let side_channel: Vec<&FieldSpec<'_>> = fields
        .iter()
        .filter(|f| matches!(f.binding, Binding::NamespaceAttrs))
        .collect();
    match (&root, side_channel.as_slice()) {
        (Some(_), [_]) | (None, []) => {}
        (Some(_), []) => {
            return Err(syn::Error::new_spanned(
                name,
                "root messages need one #[xml(namespace_attrs)] field",
            ));
        }
        (Some(_), [_, extra, ..]) => {
            return Err(syn::Error::new_spanned(
                extra.ident,
                "only one #[xml(namespace_attrs)] field is allowed",
            ));
        }
        (None, [field, ..]) => {
            return Err(syn::Error::new_spanned(
                field.ident,
                "#[xml(namespace_attrs)] is only allowed on root messages",
            ));
        }
    }

    let mut decoders = Vec::new();
    let mut attr_writers = Vec::new();
    let mut text_writer = None;
    let mut child_writers = Vec::new();
    let mut typed_attrs = Vec::new();

    for field in &fields {
        let ident = field.ident;
        let shape = shape_of(field.ty);
        match &field.binding {
            Binding::Attr(key) => {
                typed_attrs.push(key.clone());
                match shape {
                    Shape::One => {
                        decoders.push(quote! {
                            #ident: ::ddexkit_core::codec::read_attr(element, #key)?
                        });
                        attr_writers.push(quote! {
                            ::ddexkit_core::codec::write_attr(&mut element, #key, &self.#ident);
                        });
                    }
                    Shape::Optional => {
                        decoders.push(quote! {
                            #ident: ::ddexkit_core::codec::read_optional_attr(element, #key)?
                        });
                        attr_writers.push(quote! {
                            ::ddexkit_core::codec::write_optional_attr(
                                &mut element, #key, self.#ident.as_ref(),
                            );
                        });
                    }
                    Shape::Repeated => {
                        return Err(syn::Error::new_spanned(
                            field.ty,
                            "attributes cannot repeat",
                        ));
                    }
                }
            }
            Binding::Element(child) => match shape {
                Shape::One => {
                    decoders.push(quote! {
                        #ident: ::ddexkit_core::codec::read_child(element, #child)?
                    });
                    child_writers.push(quote! {
                        ::ddexkit_core::codec::write_child(&mut element, #child, &self.#ident);
                    });
                }
                Shape::Optional => {
                    decoders.push(quote! {
                        #ident: ::ddexkit_core::codec::read_optional_child(element, #child)?
                    });
                    child_writers.push(quote! {
                        ::ddexkit_core::codec::write_optional_child(
                            &mut element, #child, self.#ident.as_ref(),
                        );
                    });
                }
                Shape::Repeated => {
                    decoders.push(quote! {
                        #ident: ::ddexkit_core::codec::read_children(element, #child)?
                    });
                    child_writers.push(quote! {
                        ::ddexkit_core::codec::write_children(&mut element, #child, &self.#ident);
                    });
                }
            },
            Binding::Text => {
                if shape != Shape::One || text_writer.is_some() {
                    return Err(syn::Error::new_spanned(
                        ident,
                        "#[xml(text)] needs a single non-optional field",
                    ));
                }
                decoders.push(quote! {
                    #ident: ::ddexkit_core::codec::read_text(element)?
                });
                text_writer = Some(quote! {
                    element.text = ::ddexkit_core::XmlText::to_text(&self.#ident);
                });
            }
            Binding::NamespaceAttrs => {
                decoders.push(quote! {
                    #ident: ::core::option::Option::Some(
                        ::ddexkit_core::codec::capture_side_channel(element),
                    )
                });
            }
            Binding::Skip => {
                decoders.push(quote! {
                    #ident: ::core::default::Default::default()
                });
            }
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let finish = match (&root, side_channel.first()) {
        (Some(_), Some(field)) => {
            let ident = field.ident;
            quote! {
                ::ddexkit_core::codec::finish_root_element(
                    &mut element,
                    <Self as ::ddexkit_core::RootMessage>::NAMESPACE,
                    <Self as ::ddexkit_core::RootMessage>::TYPED_ATTRIBUTES,
                    self.#ident.as_ref(),
                );
            }
        }
        _ => TokenStream::new(),
    };

    let value_impl = quote! {
        impl #impl_generics ::ddexkit_core::XmlElementValue for #name #ty_generics #where_clause {
            fn from_element(
                element: &::ddexkit_core::XmlElement,
            ) -> ::ddexkit_core::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#decoders,)*
                })
            }

            fn to_element(&self, name: &str) -> ::ddexkit_core::XmlElement {
                #[allow(unused_mut)]
                let mut element = ::ddexkit_core::XmlElement::new(name);
                #(#attr_writers)*
                #text_writer
                #(#child_writers)*
                #finish
                element
            }
        }
    };

    let root_impl = match (&root, side_channel.first()) {
        (Some(RootArgs { root, namespace }), Some(field)) => {
            let ident = field.ident;
            quote! {
                impl #impl_generics ::ddexkit_core::RootMessage for #name #ty_generics #where_clause {
                    const ROOT_ELEMENT: &'static str = #root;
                    const NAMESPACE: &'static str = #namespace;
                    const TYPED_ATTRIBUTES: &'static [&'static str] = &[#(#typed_attrs),*];

                    fn namespace_attrs(
                        &self,
                    ) -> ::core::option::Option<&::ddexkit_core::NamespaceAttrs> {
                        self.#ident.as_ref()
                    }

                    fn namespace_attrs_mut(
                        &mut self,
                    ) -> &mut ::core::option::Option<::ddexkit_core::NamespaceAttrs> {
                        &mut self.#ident
                    }
                }
            }
        }
        _ => TokenStream::new(),
    };

    Ok(quote! {
        #value_impl
        #root_impl
    })
}

fn parse_root_args(input: &DeriveInput) -> syn::Result<Option<RootArgs>> {
    let mut root: Option<LitStr> = None;
    let mut namespace: Option<Expr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("xml")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("root") {
                root = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("namespace") {
                namespace = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown xml attribute, expected `root` or `namespace`"))
            }
        })?;
    }

    match (root, namespace) {
        (Some(root), Some(namespace)) => Ok(Some(RootArgs { root, namespace })),
        (None, None) => Ok(None),
        (Some(root), None) => Err(syn::Error::new_spanned(
            root,
            "root messages need a `namespace`",
        )),
        (None, Some(namespace)) => Err(syn::Error::new_spanned(
            namespace,
            "`namespace` is only allowed together with `root`",
        )),
    }
}

fn parse_field(field: &syn::Field) -> syn::Result<FieldSpec<'_>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let mut binding: Option<Binding> = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("xml")) {
        attr.parse_nested_meta(|meta| {
            let parsed = if meta.path.is_ident("attr") {
                Binding::Attr(meta.value()?.parse()?)
            } else if meta.path.is_ident("element") {
                Binding::Element(meta.value()?.parse()?)
            } else if meta.path.is_ident("text") {
                Binding::Text
            } else if meta.path.is_ident("namespace_attrs") {
                Binding::NamespaceAttrs
            } else if meta.path.is_ident("skip") {
                Binding::Skip
            } else {
                return Err(meta.error("unknown xml field attribute"));
            };
            if binding.replace(parsed).is_some() {
                return Err(meta.error("a field takes a single xml binding"));
            }
            Ok(())
        })?;
    }

    let binding = binding.unwrap_or_else(|| {
        Binding::Element(LitStr::new(&pascal_case(&ident.to_string()), ident.span()))
    });

    Ok(FieldSpec {
        ident,
        ty: &field.ty,
        binding,
    })
}

fn shape_of(ty: &Type) -> Shape {
    let Type::Path(path) = ty else {
        return Shape::One;
    };
    match path.path.segments.last() {
        Some(segment) if segment.ident == "Option" => Shape::Optional,
        Some(segment) if segment.ident == "Vec" => Shape::Repeated,
        _ => Shape::One,
    }
}

/// `message_header` becomes `MessageHeader`; a raw identifier prefix is dropped.
fn pascal_case(field: &str) -> String {
    field
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
