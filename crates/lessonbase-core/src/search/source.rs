//! Async query contract between the search engine and the store

use async_trait::async_trait;

use crate::{ContentRecord, ContentStore, CoreResult, GlossaryRecord, ModuleRecord};

use super::error::SearchResult;

/// The query shapes the search engine needs from a store.
///
/// Substring and prefix arguments are matched case-insensitively by the
/// store. Implementations must be cheap to share across concurrent queries.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn scan_modules(&self) -> SearchResult<Vec<ModuleRecord>>;

    async fn module_content_by_parent(&self, parent_module: &str)
        -> SearchResult<Vec<ContentRecord>>;

    /// Entries whose term starts with `letter`, ordered by term
    async fn glossary_by_prefix(&self, letter: char) -> SearchResult<Vec<GlossaryRecord>>;

    /// Modules whose title or description contains `term`
    async fn modules_by_substring(&self, term: &str) -> SearchResult<Vec<ModuleRecord>>;

    /// Content items whose content or text contains `term`
    async fn module_content_by_substring(&self, term: &str) -> SearchResult<Vec<ContentRecord>>;

    /// Glossary entries whose term or definition contains `term`
    async fn glossary_by_substring(&self, term: &str) -> SearchResult<Vec<GlossaryRecord>>;
}

impl ContentStore {
    /// Run a blocking store call off the async workers.
    async fn run_blocking<T, F>(&self, query: F) -> SearchResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ContentStore) -> CoreResult<T> + Send + 'static,
    {
        let store = self.clone();
        let rows = tokio::task::spawn_blocking(move || query(&store)).await??;
        Ok(rows)
    }
}

#[async_trait]
impl ContentSource for ContentStore {
    async fn scan_modules(&self) -> SearchResult<Vec<ModuleRecord>> {
        self.run_blocking(|store| store.list_modules()).await
    }

    async fn module_content_by_parent(
        &self,
        parent_module: &str,
    ) -> SearchResult<Vec<ContentRecord>> {
        let parent_module = parent_module.to_string();
        self.run_blocking(move |store| store.module_content(&parent_module))
            .await
    }

    async fn glossary_by_prefix(&self, letter: char) -> SearchResult<Vec<GlossaryRecord>> {
        self.run_blocking(move |store| store.glossary_starting_with(&letter.to_string()))
            .await
    }

    async fn modules_by_substring(&self, term: &str) -> SearchResult<Vec<ModuleRecord>> {
        let term = term.to_string();
        self.run_blocking(move |store| store.find_modules(&term)).await
    }

    async fn module_content_by_substring(&self, term: &str) -> SearchResult<Vec<ContentRecord>> {
        let term = term.to_string();
        self.run_blocking(move |store| store.find_module_content(&term))
            .await
    }

    async fn glossary_by_substring(&self, term: &str) -> SearchResult<Vec<GlossaryRecord>> {
        let term = term.to_string();
        self.run_blocking(move |store| store.find_glossary_entries(&term))
            .await
    }
}
