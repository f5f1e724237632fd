use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, ItemFn, ItemStruct, Lit, LitStr, Meta, Token};

/// Expands `#[api_model]`: injects the workspace DTO policy (serde derives,
/// camelCase wire names, strict field checking, conditional `ToSchema`).
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let overrides = match ModelOverrides::parse(args) {
        Ok(overrides) => overrides,
        Err(err) => return err.to_compile_error(),
    };
    let existing = match ExistingAttrs::scan(&input.attrs) {
        Ok(existing) => existing,
        Err(err) => return err.to_compile_error(),
    };

    let policy = match synthesize_policy(&overrides, &existing, &input) {
        Ok(policy) => policy,
        Err(err) => return err.to_compile_error(),
    };

    quote! {
        #policy
        #input
    }
}

/// Expands `#[api_handler]`: forwards the arguments to `utoipa::path` when the
/// `server` feature of the consuming crate is on, leaving the handler body as
/// plain Axum otherwise.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = &input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

/// Caller-supplied knobs on `#[api_model(...)]`.
struct ModelOverrides {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

impl ModelOverrides {
    fn parse(args: TokenStream) -> syn::Result<Self> {
        let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;

        let mut rename_all: Option<LitStr> = None;
        let mut deny_unknown_fields: Option<bool> = None;

        for meta in metas {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new_spanned(
                    meta,
                    "Expected name-value arguments like `rename_all = \"...\"`",
                ));
            };
            if nv.path.is_ident("rename_all") {
                if rename_all.is_some() {
                    return Err(syn::Error::new_spanned(&nv, "Duplicate argument"));
                }
                rename_all = Some(literal(&nv, |lit| match lit {
                    Lit::Str(s) => Some(s.clone()),
                    _ => None,
                })?);
            } else if nv.path.is_ident("deny_unknown_fields") {
                if deny_unknown_fields.is_some() {
                    return Err(syn::Error::new_spanned(&nv, "Duplicate argument"));
                }
                deny_unknown_fields = Some(literal(&nv, |lit| match lit {
                    Lit::Bool(b) => Some(b.value),
                    _ => None,
                })?);
            } else {
                return Err(syn::Error::new_spanned(
                    nv.path,
                    "Unsupported argument; expected rename_all or deny_unknown_fields",
                ));
            }
        }

        Ok(Self { rename_all, deny_unknown_fields })
    }
}

fn literal<T>(nv: &syn::MetaNameValue, pick: impl Fn(&Lit) -> Option<T>) -> syn::Result<T> {
    if let syn::Expr::Lit(expr_lit) = &nv.value
        && let Some(value) = pick(&expr_lit.lit)
    {
        return Ok(value);
    }
    Err(syn::Error::new_spanned(&nv.value, "Argument must be a literal of the expected type"))
}

/// What the struct already declares, so injected attributes never collide.
struct ExistingAttrs {
    derives: Vec<String>,
    serde_rename_all: Option<LitStr>,
    serde_deny_unknown: bool,
}

impl ExistingAttrs {
    fn scan(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut derives = Vec::new();
        let mut serde_rename_all = None;
        let mut serde_deny_unknown = false;

        for attr in attrs {
            if attr.path().is_ident("derive") {
                let _ = attr.parse_nested_meta(|meta| {
                    if let Some(seg) = meta.path.segments.last() {
                        derives.push(seg.ident.to_string());
                    }
                    Ok(())
                });
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        serde_rename_all = Some(meta.value()?.parse::<LitStr>()?);
                    } else if meta.path.is_ident("deny_unknown_fields") {
                        serde_deny_unknown = true;
                    }
                    Ok(())
                })?;
            }
        }

        Ok(Self { derives, serde_rename_all, serde_deny_unknown })
    }

    fn has_derive(&self, name: &str) -> bool {
        self.derives.iter().any(|d| d == name)
    }
}

fn synthesize_policy(
    overrides: &ModelOverrides,
    existing: &ExistingAttrs,
    input: &ItemStruct,
) -> syn::Result<TokenStream> {
    let mut missing = Vec::new();
    if !existing.has_derive("Debug") {
        missing.push(quote! { Debug });
    }
    if !existing.has_derive("Serialize") {
        missing.push(quote! { ::serde::Serialize });
    }
    if !existing.has_derive("Deserialize") {
        missing.push(quote! { ::serde::Deserialize });
    }
    let derive_attr =
        (!missing.is_empty()).then(|| quote! { #[derive(#(#missing),*)] }).unwrap_or_default();

    let schema_attr = if existing.has_derive("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let wanted_rename = overrides
        .rename_all
        .clone()
        .unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &existing.serde_rename_all {
        Some(declared) if declared.value() != wanted_rename.value() => {
            return Err(syn::Error::new_spanned(
                declared,
                "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
            ));
        }
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #wanted_rename)] },
    };

    let deny = overrides.deny_unknown_fields.unwrap_or(true);
    let deny_attr = if existing.serde_deny_unknown {
        if !deny {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        }
        quote! {}
    } else if deny {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
    })
}
