use axum::Router;
use dhub::kernel::prelude::ApiState;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

/// Assembles the full application router: API routes under `/api`, the Scalar
/// documentation UI at `/api`, and the static scoreboard UI for everything
/// else.
#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    let api = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(dhub::server::router::system_router())
        .merge(dhub::server::router::scoreboard_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // split_for_parts separates the routes from the collected OpenAPI document
    let (api_routes, api_doc) = api.split_for_parts();

    Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/api", api_doc))
        .fallback_service(ServeDir::new(static_dir))
}
