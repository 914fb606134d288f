//! Arith FFI Macro
//!
//! Provides the #[ffi] attribute for exposing a Rust function through the C ABI.
//! The annotated function is kept callable from Rust, and an unmangled
//! `extern "C"` entry point is emitted for it.

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::Parser;
use syn::{FnArg, Ident, ItemFn, LitStr, Pat};

/// Export a function under an unmangled C symbol
///
/// # Example
/// ```ignore
/// #[ffi(export = "Add")]
/// pub fn add(a: f64, b: f64) -> f64 {
///     a + b
/// }
/// ```
///
/// Without `export`, the function itself becomes the entry point and keeps its name.
#[proc_macro_attribute]
pub fn ffi(attr: TokenStream, item: TokenStream) -> TokenStream {
    match expand(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let mut export: Option<LitStr> = None;
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("export") {
            export = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported ffi property, expected `export = \"Name\"`"))
        }
    });
    attr_parser.parse2(attr)?;

    let mut func: ItemFn = syn::parse2(item)?;
    let sig = &func.sig;

    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "ffi functions cannot be generic",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "ffi functions cannot be async"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(unsafety, "ffi functions cannot be unsafe"));
    }
    if let Some(abi) = &sig.abi {
        return Err(syn::Error::new_spanned(abi, "ffi functions must not declare an ABI"));
    }

    let mut args = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat_ident) => args.push(pat_ident.ident.clone()),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "ffi parameters must be plain identifiers",
                    ))
                }
            },
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "ffi functions cannot have a `self` parameter",
                ))
            }
        }
    }

    let export_ident = match export {
        Some(lit) => Some(syn::parse_str::<Ident>(&lit.value()).map_err(|_| {
            syn::Error::new(
                lit.span(),
                format!("`{}` is not a valid symbol name", lit.value()),
            )
        })?),
        None => None,
    };

    match export_ident {
        Some(export_ident) if export_ident != func.sig.ident => {
            let vis = &func.vis;
            let rust_ident = &func.sig.ident;
            let inputs = &func.sig.inputs;
            let output = &func.sig.output;
            Ok(quote! {
                #func

                #[no_mangle]
                #[allow(non_snake_case)]
                #vis extern "C" fn #export_ident(#inputs) #output {
                    #rust_ident(#(#args),*)
                }
            })
        }
        // Same name: the function itself is the entry point
        _ => {
            func.sig.abi = Some(syn::parse_quote!(extern "C"));
            Ok(quote! {
                #[no_mangle]
                #[allow(non_snake_case)]
                #func
            })
        }
    }
}
