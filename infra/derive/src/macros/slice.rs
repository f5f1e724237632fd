use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

/// Turns the annotated struct into a cheap-to-clone slice handle: the declared
/// fields move into a `<Name>Inner` state struct, and the original name becomes
/// an `Arc` wrapper that derefs to it and registers as a `FeatureSlice`.
pub fn expand_slice(input: ItemStruct) -> TokenStream {
    let ItemStruct { attrs, vis, ident: handle, fields, .. } = &input;
    let state = format_ident!("{handle}Inner");

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #state #fields

        #[derive(Debug, Clone)]
        #vis struct #handle {
            inner: std::sync::Arc<#state>,
        }

        impl #handle {
            pub fn new(inner: #state) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #handle {
            type Target = #state;
            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::dhub_kernel::domain::registry::FeatureSlice for #handle {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}
