//! Lessonbase HTTP server.
//!
//! Routes:
//!
//! - `GET /api/modules` - every module
//! - `GET /api/modules/{module_id}` - content items of one module
//! - `GET /api/index` - glossary grouped by first letter
//! - `GET /api/search/{search_term}?mod=f&ind=f` - unified search

pub mod api;
pub mod error;


use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use lessonbase_core::search::{SearchConfig, Searcher};
use lessonbase_core::ContentStore;
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Clone)]
pub struct AppState {
    pub searcher: Searcher<ContentStore>,
}

impl AppState {
    pub fn new(store: ContentStore, config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(Arc::new(store), config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/modules", get(api::list_modules))
        .route("/api/modules/{module_id}", get(api::get_module_content))
        .route("/api/index", get(api::get_index))
        .route("/api/search/{search_term}", get(api::search))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .with_state(state)
}
