use crate::utils::{call_body, check_signature, marker_tokens, parse_event_names, typed_params};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{Attribute, ImplItem, ImplItemFn, ItemImpl, LitStr, parse_macro_input};

/// #[event_handlers] 宏实现
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr: TokenStream2 = attr.into();
    if !attr.is_empty() {
        return syn::Error::new(attr.span(), "#[event_handlers] takes no arguments")
            .to_compile_error()
            .into();
    }

    let mut imp = parse_macro_input!(item as ItemImpl);

    let trait_span = imp.trait_.as_ref().map(|(_, path, _)| path.span());
    let result = match trait_span {
        Some(span) => Err(syn::Error::new(
            span,
            "#[event_handlers] only on inherent impl blocks",
        )),
        None => expand_impl(&mut imp),
    };

    match result {
        Ok(out) => TokenStream::from(out),
        Err(err) => {
            // 保留原 impl（去掉 #[subscribe] 标记），只报宏自身的错误
            for item in imp.items.iter_mut() {
                if let ImplItem::Fn(method) = item {
                    take_subscribe_attrs(&mut method.attrs);
                }
            }
            let err = err.to_compile_error();
            TokenStream::from(quote! {
                #imp

                #err
            })
        }
    }
}

fn expand_impl(imp: &mut ItemImpl) -> syn::Result<TokenStream2> {
    let type_label = imp
        .self_ty
        .to_token_stream()
        .to_string()
        .replace(' ', "");

    let mut entries: Vec<TokenStream2> = Vec::new();
    for item in imp.items.iter_mut() {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        // 取出并移除 #[subscribe(...)] 标记
        let tags = take_subscribe_attrs(&mut method.attrs);
        if tags.is_empty() {
            continue;
        }

        let mut names: Vec<LitStr> = Vec::new();
        for tag in tags {
            let tokens = tag.meta.require_list()?.tokens.clone();
            for name in parse_event_names(tokens, tag.span())? {
                if !names.iter().any(|n| n.value() == name.value()) {
                    names.push(name);
                }
            }
        }

        entries.push(candidate_for(method, &names, &type_label)?);
    }

    if entries.is_empty() {
        return Err(syn::Error::new(
            imp.self_ty.span(),
            "#[event_handlers] found no #[subscribe(\"...\")] methods",
        ));
    }

    let self_ty = &imp.self_ty;
    let (impl_generics, _, where_clause) = imp.generics.split_for_impl();

    Ok(quote! {
        #imp

        impl #impl_generics #self_ty #where_clause {
            /// 以给定实例绑定本类型中所有 `#[subscribe]` 方法，生成发现候选
            pub fn handler_candidates(
                self: &::std::sync::Arc<Self>,
            ) -> ::std::vec::Vec<::pubsub_core::Candidate> {
                ::std::vec![ #(#entries),* ]
            }
        }
    })
}

fn take_subscribe_attrs(attrs: &mut Vec<Attribute>) -> Vec<Attribute> {
    let mut tags = Vec::new();
    attrs.retain(|attr| {
        if attr.path().is_ident("subscribe") {
            tags.push(attr.clone());
            false
        } else {
            true
        }
    });
    tags
}

fn candidate_for(
    method: &ImplItemFn,
    names: &[LitStr],
    type_label: &str,
) -> syn::Result<TokenStream2> {
    let sig = &method.sig;
    check_signature(sig, "#[subscribe]")?;
    let (idents, types) = typed_params(sig)?;

    let method_ident = &sig.ident;
    let label = format!("{type_label}::{method_ident}");
    let marker = marker_tokens(names);

    let handler = match sig.receiver() {
        None => {
            let body = call_body(quote! { Self::#method_ident(#(#idents),*) }, &sig.output);
            quote! {
                ::pubsub_core::HandlerRef::from_fn(
                    ::core::concat!(::core::module_path!(), "::", #label),
                    |(#(#idents,)*): (#(#types,)*)| -> ::pubsub_core::HandlerResult { #body },
                )
            }
        }
        Some(receiver)
            if receiver.reference.is_some()
                && receiver.mutability.is_none()
                && receiver.colon_token.is_none() =>
        {
            let body = call_body(quote! { this.#method_ident(#(#idents),*) }, &sig.output);
            quote! {
                ::pubsub_core::HandlerRef::bind(
                    ::std::sync::Arc::clone(self),
                    ::core::concat!(::core::module_path!(), "::", #label),
                    |this: &Self, (#(#idents,)*): (#(#types,)*)| -> ::pubsub_core::HandlerResult { #body },
                )
            }
        }
        Some(receiver) => {
            return Err(syn::Error::new(
                receiver.self_token.span,
                "#[subscribe] methods must take &self; use interior mutability for state",
            ));
        }
    };

    Ok(quote! {
        ::pubsub_core::Candidate::new(#marker, #handler)
    })
}
