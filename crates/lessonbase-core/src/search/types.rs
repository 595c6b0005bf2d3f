//! Common types for search module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{ContentRecord, GlossaryRecord, ModuleRecord};

/// A row returned by one of the substring queries, tagged by its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Module(ModuleRecord),
    Glossary(GlossaryRecord),
    Content(ContentRecord),
}

impl From<ModuleRecord> for RawRecord {
    fn from(record: ModuleRecord) -> Self {
        RawRecord::Module(record)
    }
}

impl From<GlossaryRecord> for RawRecord {
    fn from(record: GlossaryRecord) -> Self {
        RawRecord::Glossary(record)
    }
}

impl From<ContentRecord> for RawRecord {
    fn from(record: ContentRecord) -> Self {
        RawRecord::Content(record)
    }
}

/// Module id -> module title, built fresh for every search
pub type ModuleTitleIndex = HashMap<String, String>;

/// Build a title index from a full module scan
pub fn module_title_index(modules: &[ModuleRecord]) -> ModuleTitleIndex {
    modules
        .iter()
        .map(|m| (m.module_id.clone(), m.module_title.clone()))
        .collect()
}

/// Client screen a result navigates to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Route {
    ModuleScreen,
    IndexScreen,
}

/// Identifier handed to the target screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RouteParam {
    Module(String),
    Index(i64),
}

/// The uniform search result returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnifiedResult {
    pub route: Route,
    pub param: RouteParam,
    /// Display label; `None` when a content item's parent module is unknown
    pub name: Option<String>,
    /// Snippet around the match
    pub text: String,
}

/// Which collections a search should touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Search modules and their content items
    pub include_modules: bool,
    /// Search the glossary
    pub include_index: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_modules: true,
            include_index: true,
        }
    }
}

/// Glossary terms sharing a first letter
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexLetterBucket {
    pub letter: char,
    pub terms: Vec<GlossaryRecord>,
    /// Position in the sorted listing
    pub key: usize,
}
