use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Type};

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    match ErrorEnum::parse(&input) {
        Ok(model) => model.emit(&input),
        Err(err) => err.to_compile_error(),
    }
}

/// Parsed shape of the annotated enum.
struct ErrorEnum {
    ident: Ident,
    ext_trait: Ident,
    variants: Vec<ErrorVariant>,
    needs_debug: bool,
    needs_error: bool,
}

struct ErrorVariant {
    ident: Ident,
    /// Name and type of the wrapped upstream error, when the variant has one.
    source: Option<(Ident, Type)>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

impl ErrorEnum {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(input, "dhub_error can only be derived for enums"));
        };

        let mut variants = Vec::with_capacity(data.variants.len());
        for v in &data.variants {
            let Fields::Named(fields) = &v.fields else {
                return Err(syn::Error::new_spanned(
                    v,
                    "dhub_error requires named fields for source/context handling",
                ));
            };

            let mut source = None;
            let mut has_context = false;
            for field in &fields.named {
                let Some(name) = &field.ident else { continue };
                if name == "context" {
                    if !is_context_type(&field.ty) {
                        return Err(syn::Error::new_spanned(
                            &field.ty,
                            "context field must be Option<Cow<'static, str>>",
                        ));
                    }
                    has_context = true;
                } else if source.is_none()
                    && (name == "source"
                        || field.attrs.iter().any(|attr| {
                            attr.path().is_ident("source") || attr.path().is_ident("from")
                        }))
                {
                    source = Some((name.clone(), field.ty.clone()));
                }
            }

            if source.is_some() && !has_context {
                return Err(syn::Error::new_spanned(
                    &v.ident,
                    "dhub_error requires `context: Option<Cow<'static, str>>` for variants with a source",
                ));
            }

            variants.push(ErrorVariant {
                ident: v.ident.clone(),
                source,
                has_context,
                cfg_attrs: v
                    .attrs
                    .iter()
                    .filter(|attr| attr.path().is_ident("cfg"))
                    .cloned()
                    .collect(),
            });
        }

        let declared = declared_derives(&input.attrs);
        Ok(Self {
            ident: input.ident.clone(),
            ext_trait: format_ident!("{}Ext", input.ident),
            variants,
            needs_debug: !declared.iter().any(|d| d == "Debug"),
            needs_error: !declared.iter().any(|d| d == "Error"),
        })
    }

    fn emit(&self, input: &DeriveInput) -> TokenStream {
        let mut derives = Vec::new();
        if self.needs_debug {
            derives.push(quote! { Debug });
        }
        if self.needs_error {
            derives.push(quote! { ::thiserror::Error });
        }
        let derive_attr =
            (!derives.is_empty()).then(|| quote! { #[derive(#(#derives),*)] }).unwrap_or_default();

        let ext_trait = self.emit_ext_trait();
        let from_impls = self.variants.iter().map(|v| self.emit_variant_impls(v));
        let internal_impls = self.emit_internal_impls();

        quote! {
            #[allow(non_shorthand_field_patterns)]
            #derive_attr
            #input

            #ext_trait
            #(#from_impls)*
            #internal_impls

            #[allow(dead_code)]
            fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
                context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
            }
        }
    }

    /// The `…Ext` trait plus its impl for results already carrying this error,
    /// where `.context()` fills the variant's context slot in place.
    fn emit_ext_trait(&self) -> TokenStream {
        let name = &self.ident;
        let ext = &self.ext_trait;

        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let cfg_attrs = &v.cfg_attrs;
            let ident = &v.ident;
            quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
        });

        quote! {
            pub trait #ext<T> {
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #ext<T> for Result<T, #name> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                    self.map_err(|mut e| {
                        match &mut e {
                            #( #arms )*
                            _ => {}
                        }
                        e
                    })
                }
            }
        }
    }

    /// `From<SourceError>` and contextful conversion for one source-carrying
    /// variant. `Internal` is excluded so the string fallbacks stay unambiguous.
    fn emit_variant_impls(&self, v: &ErrorVariant) -> TokenStream {
        if v.ident == "Internal" {
            return quote!();
        }
        let Some((field, ty)) = &v.source else {
            return quote!();
        };
        let name = &self.ident;
        let ext = &self.ext_trait;
        let variant = &v.ident;
        let cfg_attrs = &v.cfg_attrs;

        quote! {
            #(#cfg_attrs)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self { Self::#variant { #field, context: None } }
            }

            #(#cfg_attrs)*
            impl<T> #ext<T> for std::result::Result<T, #ty> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                    self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
                }
            }
        }
    }

    fn emit_internal_impls(&self) -> TokenStream {
        let Some(internal) = self.variants.iter().find(|v| v.ident == "Internal") else {
            return quote!();
        };
        let name = &self.ident;
        let cfg_attrs = &internal.cfg_attrs;

        quote! {
            #(#cfg_attrs)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
            }
            #(#cfg_attrs)*
            impl From<String> for #name {
                #[inline]
                fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
            }
        }
    }
}

fn declared_derives(attrs: &[Attribute]) -> Vec<String> {
    let mut derives = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                derives.push(seg.ident.to_string());
            }
            Ok(())
        });
    }
    derives
}

/// Accepts `Option<Cow<'static, str>>` under any path qualification by
/// comparing the rendered type with qualifiers and whitespace stripped.
fn is_context_type(ty: &Type) -> bool {
    let rendered = ty.to_token_stream().to_string().replace(' ', "");
    let normalized = rendered
        .replace("std::borrow::", "")
        .replace("alloc::borrow::", "")
        .replace("core::option::", "")
        .replace("std::option::", "");
    normalized == "Option<Cow<'static,str>>"
}
