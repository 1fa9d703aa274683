use super::{
    handlers::{admin, admin_comments, admin_filters, comments, health},
    middleware::admin::require_admin,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/filters",
            get(admin_filters::list_rules).post(admin_filters::add_rule),
        )
        .route("/api/v1/admin/filters/ip", post(admin_filters::add_ip))
        .route("/api/v1/admin/filters/email", post(admin_filters::add_email))
        .route(
            "/api/v1/admin/filters/{id}",
            delete(admin_filters::delete_rule),
        )
        .route(
            "/api/v1/admin/custom-filters",
            get(admin_filters::list_custom_filters),
        )
        .route(
            "/api/v1/admin/custom-filters/{full_name}",
            patch(admin_filters::update_custom_filter),
        )
        .route(
            "/api/v1/admin/comments/{id}/approve",
            post(admin_comments::approve_comment),
        )
        .route(
            "/api/v1/admin/comments/{id}/reject",
            post(admin_comments::reject_comment),
        )
        .route(
            "/api/v1/admin/comments/{id}/report-mistake",
            post(admin_comments::report_mistake),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/posts/{id}/comments",
            post(comments::submit_comment).get(comments::list_comments),
        )
        .route("/api/v1/admin/login", post(admin::login))
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
