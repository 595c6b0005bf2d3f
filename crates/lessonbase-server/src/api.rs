//! HTTP handlers for the read-only content API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use lessonbase_core::search::{ContentSource, IndexLetterBucket, SearchOptions, UnifiedResult};
use lessonbase_core::{ContentRecord, ModuleRecord};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// Query-string switches for `/api/search`. Only the literal `f` disables a
/// source; any other value, or no value, leaves it on.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "mod")]
    pub modules: Option<String>,
    pub ind: Option<String>,
}

impl SearchParams {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            include_modules: self.modules.as_deref() != Some("f"),
            include_index: self.ind.as_deref() != Some("f"),
        }
    }
}

pub async fn list_modules(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModuleRecord>>, ApiError> {
    let modules = state.searcher.source().scan_modules().await?;
    Ok(Json(modules))
}

pub async fn get_module_content(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<Json<Vec<ContentRecord>>, ApiError> {
    let items = state
        .searcher
        .source()
        .module_content_by_parent(&module_id)
        .await?;
    Ok(Json(items))
}

pub async fn get_index(State(state): State<AppState>) -> Json<Vec<IndexLetterBucket>> {
    Json(state.searcher.build_index().await)
}

pub async fn search(
    State(state): State<AppState>,
    Path(search_term): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<UnifiedResult>>, ApiError> {
    let options = params.options();
    log::debug!(
        "[Server] search \"{}\" (modules: {}, index: {})",
        search_term,
        options.include_modules,
        options.include_index
    );
    let results = state.searcher.search(&search_term, options).await?;
    Ok(Json(results))
}
