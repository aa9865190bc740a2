// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        applications::applications_handler, auth::auth_handler, jobs::jobs_handler,
        messages::messages_handler, notification_handler::notification_routes,
        profiles::profile_handler, users::users_handler, verification::verification_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/profiles",
            profile_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/jobs", jobs_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/applications",
            applications_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/verification",
            verification_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/notifications",
            notification_routes().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/messages",
            messages_handler().layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
