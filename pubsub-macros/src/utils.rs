use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{FnArg, Ident, LitStr, ReturnType, Signature, Token, Type};

// 解析事件名列表：至少一个字符串字面量
pub(crate) fn parse_event_names(
    tokens: TokenStream2,
    span: proc_macro2::Span,
) -> syn::Result<Vec<LitStr>> {
    let parser = Punctuated::<LitStr, Token![,]>::parse_terminated;
    let names: Vec<LitStr> = parser.parse2(tokens)?.into_iter().collect();
    if names.is_empty() {
        return Err(syn::Error::new(
            span,
            "expected at least one event name, e.g. (\"Error\")",
        ));
    }
    Ok(names)
}

// HandlerMarker::new(first).with(second)...
pub(crate) fn marker_tokens(names: &[LitStr]) -> TokenStream2 {
    let (first, rest) = match names.split_first() {
        Some(split) => split,
        None => return quote! { ::core::compile_error!("missing event name") },
    };
    quote! {
        ::pubsub_core::HandlerMarker::new(#first) #( .with(#rest) )*
    }
}

// 签名检查：非 async、无泛型参数
pub(crate) fn check_signature(sig: &Signature, macro_name: &str) -> syn::Result<()> {
    if let Some(token) = &sig.asyncness {
        return Err(syn::Error::new(
            token.span,
            format!("{macro_name} does not support async functions"),
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            sig.ident.span(),
            format!("{macro_name} does not support generic handlers"),
        ));
    }
    Ok(())
}

// 提取具名参数类型，并为其生成位置绑定名（跳过接收者）
pub(crate) fn typed_params(sig: &Signature) -> syn::Result<(Vec<Ident>, Vec<Type>)> {
    let mut idents = Vec::new();
    let mut types = Vec::new();

    for arg in sig.inputs.iter() {
        let FnArg::Typed(pt) = arg else {
            continue;
        };
        match pt.ty.as_ref() {
            Type::Reference(r) => {
                return Err(syn::Error::new(
                    r.and_token.spans[0],
                    "handler parameters must be owned values, e.g. String instead of &str",
                ));
            }
            Type::ImplTrait(t) => {
                return Err(syn::Error::new(
                    t.impl_token.span,
                    "handler parameters must name a concrete type",
                ));
            }
            ty => {
                idents.push(format_ident!("__arg{}", idents.len()));
                types.push(ty.clone());
            }
        }
    }

    Ok((idents, types))
}

// 处理器闭包体：`()` 返回值视为成功，其余返回值的错误转换为 anyhow::Error
pub(crate) fn call_body(call: TokenStream2, output: &ReturnType) -> TokenStream2 {
    match output {
        ReturnType::Type(_, ty) if !is_unit(ty) => quote! {
            ::core::result::Result::map_err(#call, ::core::convert::Into::into)
        },
        _ => quote! {
            #call;
            ::core::result::Result::Ok(())
        },
    }
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(t) if t.elems.is_empty())
}
