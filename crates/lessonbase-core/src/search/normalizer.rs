//! Raw record -> UnifiedResult mapping

use crate::{ContentRecord, ContentType, GlossaryRecord, ModuleRecord};

use super::snippet::{contains_folded, extract_snippet};
use super::types::{ModuleTitleIndex, RawRecord, Route, RouteParam, UnifiedResult};

/// Convert raw records into unified results, preserving input order.
pub fn normalize(
    term: &str,
    records: Vec<RawRecord>,
    module_titles: &ModuleTitleIndex,
    margin: usize,
) -> Vec<UnifiedResult> {
    records
        .into_iter()
        .map(|record| normalize_record(term, record, module_titles, margin))
        .collect()
}

pub fn normalize_record(
    term: &str,
    record: RawRecord,
    module_titles: &ModuleTitleIndex,
    margin: usize,
) -> UnifiedResult {
    let (route, param, name, sample) = match record {
        RawRecord::Module(module) => {
            let sample = module_sample(term, &module);
            (
                Route::ModuleScreen,
                RouteParam::Module(module.module_id),
                Some(module.module_title),
                sample,
            )
        }
        RawRecord::Glossary(entry) => {
            let sample = glossary_sample(term, &entry);
            (
                Route::IndexScreen,
                RouteParam::Index(entry.index_id),
                Some(entry.term),
                sample,
            )
        }
        RawRecord::Content(item) => {
            let name = module_titles.get(&item.parent_module).cloned();
            let sample = content_sample(&item);
            (
                Route::ModuleScreen,
                RouteParam::Module(item.parent_module),
                name,
                sample,
            )
        }
    };

    UnifiedResult {
        route,
        param,
        name,
        text: extract_snippet(Some(term), sample.as_deref(), margin),
    }
}

fn module_sample(term: &str, module: &ModuleRecord) -> Option<String> {
    match module.module_desc.as_deref() {
        Some(desc) if contains_folded(desc, term) => Some(desc.to_string()),
        _ => Some(module.module_title.clone()),
    }
}

fn glossary_sample(term: &str, entry: &GlossaryRecord) -> Option<String> {
    match entry.definition.as_deref() {
        Some(definition) if contains_folded(definition, term) => Some(definition.to_string()),
        _ => Some(entry.term.clone()),
    }
}

fn content_sample(item: &ContentRecord) -> Option<String> {
    match item.content_type {
        ContentType::Text | ContentType::List => item.text.clone(),
        ContentType::Quiz => Some(format!(
            "{} {}",
            item.content.as_deref().unwrap_or_default(),
            item.text.as_deref().unwrap_or_default()
        )),
        ContentType::Other(_) => item.content.clone(),
    }
}
