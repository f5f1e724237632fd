use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, ItemFn, ReturnType, Type};

/// Rewrites an `async fn main` into a sync entry point that builds the
/// workspace Tokio runtime for the requested profile and blocks on the body.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "The #[dhub_runtime::main] attribute can only be used on async functions",
        )
        .to_compile_error();
    }
    if !result_return(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "The #[dhub_runtime::main] attribute requires a Result return type",
        )
        .to_compile_error();
    }

    let config = match profile_config(args) {
        Ok(config) => config,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = &input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #config;
            let rt = ::dhub_runtime::build_runtime_with_config(&config)?;
            rt.block_on(async { #block })
        }
    }
}

fn profile_config(args: TokenStream) -> syn::Result<TokenStream> {
    if args.is_empty() {
        return Ok(quote! { ::dhub_runtime::RuntimeConfig::default() });
    }

    let profile: syn::Ident = syn::parse2(args)?;
    match profile.to_string().as_str() {
        "high_performance" => Ok(quote! { ::dhub_runtime::RuntimeConfig::high_performance() }),
        "default" => Ok(quote! { ::dhub_runtime::RuntimeConfig::default() }),
        _ => {
            Err(Error::new_spanned(profile, "Unknown runtime profile. Use: high_performance or default"))
        }
    }
}

fn result_return(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
