#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros that carry the workspace's conventions: runtime
//! bootstrapping, DTO serde/OpenAPI policy, context-carrying error enums,
//! and the feature-slice wrapper.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a sync `fn main` that builds the workspace
/// Tokio runtime first.
///
/// The optional argument picks a `RuntimeConfig` preset: `high_performance`
/// for server binaries, or `default` (worker count auto-detected).
///
/// ```rust,ignore
/// #[dhub_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Applies the workspace DTO policy to a struct.
///
/// Injects `Debug`/`Serialize`/`Deserialize` when missing, derives
/// `utoipa::ToSchema` behind the consuming crate's `server` feature, renames
/// fields to `camelCase`, and turns on `deny_unknown_fields` — each only when
/// the struct does not already declare it, and each overridable:
///
/// * `rename_all = "..."` changes the wire casing.
/// * `deny_unknown_fields = false` accepts unknown JSON fields.
///
/// ```rust,ignore
/// use dhub_derive::api_model;
///
/// #[api_model]
/// pub struct CreateMatchRequest {
///     pub team1_name: String,
///     pub team2_name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Documents an Axum handler with `utoipa::path` without tying the handler
/// crate to OpenAPI when its `server` feature is off.
///
/// Takes the usual `utoipa::path` arguments (`get`, `path = "..."`,
/// `responses(...)`, `tag = ...`) and also silences `clippy::unused_async`,
/// since extractor-only handlers often have no await point.
///
/// ```rust,ignore
/// use dhub_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/api/match/{id}",
///     responses((status = OK, body = MatchResponse)),
///     tag = SCOREBOARD_TAG,
/// )]
/// async fn get_match(/* ... */) {}
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Upgrades an enum into the workspace error shape.
///
/// Generated pieces:
/// * `#[derive(Debug, thiserror::Error)]` (when not already derived);
/// * a `<Name>Ext` trait whose `.context(...)` attaches a message either to a
///   result already carrying this error or to a result carrying a variant's
///   source error;
/// * `From<SourceType>` for every variant with a `source` field (or a field
///   marked `#[source]`/`#[from]`), so `?` converts upstream errors;
/// * `From<&'static str>`/`From<String>` when an `Internal` variant exists;
/// * a `format_context` helper the `#[error(...)]` format strings can call.
///
/// Variants must use named fields; variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// use dhub_derive::dhub_error;
/// use std::borrow::Cow;
///
/// #[dhub_error]
/// pub enum ScoreboardError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database {
///         #[source]
///         source: dhub_database::DatabaseError,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn lookup() -> Result<Match, ScoreboardError> {
///     repo.get(id).context("Loading match")? // DatabaseError + context
/// }
/// ```
#[proc_macro_attribute]
pub fn dhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature-slice handle.
///
/// The annotated struct's fields become `<Name>Inner`; the original name turns
/// into an `Arc`-backed wrapper with `new`, `Deref` to the inner state, and a
/// `FeatureSlice` impl for registration in the kernel state.
///
/// ```rust,ignore
/// #[dhub_derive::dhub_slice]
/// pub struct Scoreboard {
///     pub matches: MatchRepository,
/// }
///
/// let slice = Scoreboard::new(ScoreboardInner { matches });
/// ```
#[proc_macro_attribute]
pub fn dhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
