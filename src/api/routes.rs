use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        // Recommendations
        .route(
            "/recommendations",
            get(handlers::list_recommendations).post(handlers::create_recommendation),
        )
        .route(
            "/recommendations/:id",
            get(handlers::get_recommendation)
                .put(handlers::update_recommendation)
                .delete(handlers::delete_recommendation),
        )
        .route("/recommendations/:id/like", put(handlers::like_recommendation))
        .route(
            "/recommendations/:id/dislike",
            put(handlers::dislike_recommendation),
        )
        .route(
            "/recommendations/:id/link/:recommend_product_id",
            put(handlers::link_recommendation),
        )
        // The first segment is the product_id here
        .route(
            "/recommendations/:id/:recommend_product_id",
            axum::routing::delete(handlers::delete_recommendation_by_pair),
        );

    router = match state.static_dir.as_ref() {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(handlers::route_not_found.into_service()),
        ),
        None => router
            .route("/", get(handlers::index))
            .fallback(handlers::route_not_found),
    };

    router
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
