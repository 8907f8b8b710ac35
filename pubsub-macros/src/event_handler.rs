use crate::utils::{call_body, check_signature, marker_tokens, parse_event_names, typed_params};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{ItemFn, parse_macro_input};

/// #[event_handler("A", ...)] 宏实现
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as ItemFn);

    match expand_fn(attr.into(), &func) {
        Ok(candidate) => TokenStream::from(quote! {
            #func

            #candidate
        }),
        Err(err) => {
            let err = err.to_compile_error();
            TokenStream::from(quote! {
                #func

                #err
            })
        }
    }
}

fn expand_fn(attr: TokenStream2, func: &ItemFn) -> syn::Result<TokenStream2> {
    let names = parse_event_names(attr, func.sig.ident.span())?;

    if let Some(receiver) = func.sig.receiver() {
        return Err(syn::Error::new(
            receiver.self_token.span,
            "#[event_handler] only on free functions; use #[event_handlers] with #[subscribe] for methods",
        ));
    }
    check_signature(&func.sig, "#[event_handler]")?;

    let (idents, types) = typed_params(&func.sig)?;

    let vis = &func.vis;
    let fn_ident = &func.sig.ident;
    let fn_name = fn_ident.to_string();
    let candidate_ident = format_ident!("{}_candidate", fn_ident);
    let doc = format!("`{fn_name}` 的发现候选");

    let marker = marker_tokens(&names);
    let body = call_body(quote! { #fn_ident(#(#idents),*) }, &func.sig.output);

    Ok(quote! {
        #[doc = #doc]
        #vis fn #candidate_ident() -> ::pubsub_core::Candidate {
            ::pubsub_core::Candidate::new(
                #marker,
                ::pubsub_core::HandlerRef::from_fn(
                    ::core::concat!(::core::module_path!(), "::", #fn_name),
                    |(#(#idents,)*): (#(#types,)*)| -> ::pubsub_core::HandlerResult { #body },
                ),
            )
        }
    })
}
