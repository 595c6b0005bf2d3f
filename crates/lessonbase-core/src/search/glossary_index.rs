//! Alphabetical glossary index
//!
//! One prefix lookup per letter A-Z runs concurrently. The listing is built
//! only after all 26 lookups have settled; a failed lookup counts as settled
//! and simply leaves its letter out.

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};

use super::searcher::with_timeout;
use super::source::ContentSource;
use super::types::IndexLetterBucket;

pub const LETTER_COUNT: usize = 26;

/// Build the sorted, sparse letter index.
pub async fn build_index<S>(source: &S, timeout: Option<Duration>) -> Vec<IndexLetterBucket>
where
    S: ContentSource + ?Sized,
{
    let mut lookups: FuturesUnordered<_> = ('A'..='Z')
        .map(|letter| async move {
            let outcome = with_timeout(
                "glossary prefix lookup",
                timeout,
                source.glossary_by_prefix(letter),
            )
            .await;
            (letter, outcome)
        })
        .collect();

    let mut settled = 0;
    let mut failed = 0;
    let mut buckets = Vec::new();

    // Completion order; sorted below.
    while let Some((letter, outcome)) = lookups.next().await {
        settled += 1;
        match outcome {
            Ok(terms) if terms.is_empty() => {}
            Ok(terms) => buckets.push(IndexLetterBucket {
                letter,
                terms,
                key: 0,
            }),
            Err(e) => {
                failed += 1;
                log::warn!("[Index] Lookup for letter {} failed: {}", letter, e);
            }
        }
    }
    debug_assert_eq!(settled, LETTER_COUNT);

    buckets.sort_by_key(|bucket| bucket.letter);
    for (key, bucket) in buckets.iter_mut().enumerate() {
        bucket.key = key;
    }

    log::debug!(
        "[Index] {} lookups settled: {} letters listed, {} failed",
        settled,
        buckets.len(),
        failed
    );
    buckets
}
