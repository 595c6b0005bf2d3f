//! Cross-collection search

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::config::{SearchBehaviorConfig, SearchConfig};
use super::error::{SearchError, SearchResult};
use super::glossary_index::build_index;
use super::normalizer::normalize;
use super::sanitize::{is_blank, sanitize};
use super::source::ContentSource;
use super::types::{module_title_index, IndexLetterBucket, RawRecord, SearchOptions, UnifiedResult};

/// Fans a term out to modules, module content and the glossary and merges
/// the answers into one list of [`UnifiedResult`]s.
pub struct Searcher<S> {
    source: Arc<S>,
    config: SearchBehaviorConfig,
}

impl<S> Clone for Searcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<S: ContentSource> Searcher<S> {
    pub fn new(source: Arc<S>, config: SearchConfig) -> Self {
        Self {
            source,
            config: config.search,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &SearchBehaviorConfig {
        &self.config
    }

    /// Search every enabled collection for `term`.
    ///
    /// Results are ordered by source (modules, module content, glossary) and
    /// keep the store's row order within a source. A blank term returns an
    /// empty list without touching the store. Any store failure fails the
    /// whole search.
    pub async fn search(
        &self,
        term: &str,
        options: SearchOptions,
    ) -> SearchResult<Vec<UnifiedResult>> {
        let term = sanitize(term);
        if is_blank(&term) {
            log::debug!("[Search] Blank term, skipping store queries");
            return Ok(Vec::new());
        }

        let timeout = self.config.query_timeout();
        let source = self.source.as_ref();

        let all_modules = with_timeout("module scan", timeout, source.scan_modules()).await?;
        let titles = module_title_index(&all_modules);

        let (modules, content, glossary) = tokio::try_join!(
            gated(options.include_modules, || {
                with_timeout("module search", timeout, source.modules_by_substring(&term))
            }),
            gated(options.include_modules, || {
                with_timeout(
                    "module content search",
                    timeout,
                    source.module_content_by_substring(&term),
                )
            }),
            gated(options.include_index, || {
                with_timeout("glossary search", timeout, source.glossary_by_substring(&term))
            }),
        )?;

        log::debug!(
            "[Search] \"{}\": {} modules, {} content items, {} glossary entries",
            term,
            modules.len(),
            content.len(),
            glossary.len()
        );

        let mut records: Vec<RawRecord> =
            Vec::with_capacity(modules.len() + content.len() + glossary.len());
        records.extend(modules.into_iter().map(RawRecord::from));
        records.extend(content.into_iter().map(RawRecord::from));
        records.extend(glossary.into_iter().map(RawRecord::from));

        Ok(normalize(&term, records, &titles, self.config.snippet_margin))
    }

    /// Alphabetical glossary listing, one bucket per non-empty letter.
    pub async fn build_index(&self) -> Vec<IndexLetterBucket> {
        build_index(self.source.as_ref(), self.config.query_timeout()).await
    }
}

/// Run `query` only when `enabled`; a disabled query yields no rows.
async fn gated<T, F, Fut>(enabled: bool, query: F) -> SearchResult<Vec<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = SearchResult<Vec<T>>>,
{
    if enabled {
        query().await
    } else {
        Ok(Vec::new())
    }
}

pub(crate) async fn with_timeout<T, F>(
    operation: &str,
    limit: Option<Duration>,
    query: F,
) -> SearchResult<T>
where
    F: Future<Output = SearchResult<T>>,
{
    let Some(limit) = limit else {
        return query.await;
    };
    tokio::time::timeout(limit, query)
        .await
        .map_err(|_| SearchError::Timeout {
            operation: operation.to_string(),
            after_ms: limit.as_millis() as u64,
        })?
}
