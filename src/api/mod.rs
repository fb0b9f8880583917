//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new().merge(routes::report_routes::create_report_router());

    Router::new()
        .nest("/api", api)
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-engine"),
            HeaderValue::from_static("patient-report"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
