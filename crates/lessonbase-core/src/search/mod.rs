//! Lessonbase Search Module
//!
//! Unified search across modules, module content and the glossary, plus the
//! alphabetical glossary index.
//!
//! ## Features
//!
//! - Concurrent fan-out to the three collections with positional merge order
//! - Case-insensitive substring matching (no ranking)
//! - Ellipsis-marked snippets around the match
//! - 26-way letter index joined behind a completion barrier
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lessonbase_core::search::{Searcher, SearchConfig, SearchOptions};
//!
//! let searcher = Searcher::new(Arc::new(store), SearchConfig::load()?);
//! let results = searcher.search("photosynthesis", SearchOptions::default()).await?;
//! let index = searcher.build_index().await;
//! ```

mod config;
mod error;
mod glossary_index;
mod normalizer;
mod sanitize;
mod searcher;
mod snippet;
mod source;
mod types;


pub use config::{SearchBehaviorConfig, SearchConfig};
pub use error::{SearchError, SearchResult};
pub use glossary_index::{build_index, LETTER_COUNT};
pub use normalizer::{normalize, normalize_record};
pub use sanitize::{is_blank, sanitize};
pub use searcher::Searcher;
pub use snippet::{contains_folded, extract_snippet, snippet, DEFAULT_SNIPPET_MARGIN};
pub use source::ContentSource;
pub use types::*;
