use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Implements `notewire::Notification` for a struct with named fields.
///
/// Struct attributes (all optional):
/// - `#[notification(name = "...")]` fixed dispatch name
/// - `#[notification(namespace = "...")]` prefix for the derived name
/// - `#[notification(crate = "...")]` path to the crate exporting `Notification`,
///   `notewire` by default (crates using `notewire-core` directly pass
///   `"notewire_core"`)
///
/// The sender is the field marked `#[notification(object)]`, else a field
/// named `object`. Without either the notification has no sender.
#[proc_macro_derive(Notification, attributes(notification))]
pub fn derive_notification(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct StructArgs {
    name: Option<LitStr>,
    namespace: Option<LitStr>,
    krate: Option<syn::Path>,
}

fn struct_args(input: &DeriveInput) -> syn::Result<StructArgs> {
    let mut args = StructArgs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("notification") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                args.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("namespace") {
                args.namespace = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("crate") {
                let path: LitStr = meta.value()?.parse()?;
                args.krate = Some(path.parse()?);
            } else {
                return Err(meta.error("expected `name`, `namespace` or `crate`"));
            }
            Ok(())
        })?;
    }
    Ok(args)
}

fn is_marked_object(field: &syn::Field) -> syn::Result<bool> {
    let mut marked = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("notification") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("object") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("expected `object`"))
            }
        })?;
    }
    Ok(marked)
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Notification derive requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Notification derive only supports structs",
            ))
        }
    };

    let args = struct_args(input)?;
    let krate = args
        .krate
        .unwrap_or_else(|| syn::parse_quote!(::notewire));

    let mut marked = Vec::new();
    for field in fields {
        if is_marked_object(field)? {
            marked.push(field);
        }
    }
    if marked.len() > 1 {
        return Err(syn::Error::new_spanned(
            marked[1],
            "only one field may be marked #[notification(object)]",
        ));
    }
    let object_field = marked
        .first()
        .copied()
        .or_else(|| fields.iter().find(|f| f.ident.as_ref().is_some_and(|id| id == "object")));

    let (object_ty, object_body) = match object_field {
        Some(field) => {
            let ident = &field.ident;
            let ty = &field.ty;
            (quote! { #ty }, quote! { &self.#ident })
        }
        None => (quote! { () }, quote! { &() }),
    };

    let namespace_fn = args.namespace.map(|ns| {
        quote! {
            fn namespace() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#ns)
            }
        }
    });
    let name_fn = args.name.map(|n| {
        quote! {
            fn name() -> ::std::string::String {
                ::std::string::String::from(#n)
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #krate::Notification for #name #ty_generics #where_clause {
            type Object = #object_ty;

            fn object(&self) -> &Self::Object {
                #object_body
            }

            #namespace_fn
            #name_fn
        }
    })
}
