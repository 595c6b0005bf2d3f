//! Unit tests for lessonbase-core

#[cfg(test)]
pub(crate) mod store_tests {
    use crate::{ContentStore, ContentType, EnvOverrides};
    use tempfile::TempDir;

    pub(crate) fn create_test_store() -> (ContentStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();

        let store = ContentStore::initialize(EnvOverrides {
            base_root: Some(base_path.clone()),
            db_path: Some(base_path.join("test.db")),
        })
        .expect("Failed to initialize store");

        (store, temp_dir)
    }

    /// Two modules, a handful of content items and a small glossary.
    pub(crate) fn seed(store: &ContentStore) {
        store
            .insert_module("plants", "Plants", Some("How plants turn light into food"))
            .unwrap();
        store
            .insert_module("cells", "Cells", Some("The building blocks of life"))
            .unwrap();

        store
            .insert_module_content("plants", 2, &ContentType::List, None, Some("Roots, stem, leaf"))
            .unwrap();
        store
            .insert_module_content(
                "plants",
                1,
                &ContentType::Text,
                None,
                Some("Photosynthesis happens in the leaf"),
            )
            .unwrap();
        store
            .insert_module_content(
                "cells",
                1,
                &ContentType::Quiz,
                Some("Which organelle holds DNA?"),
                Some("The nucleus"),
            )
            .unwrap();

        store
            .insert_glossary_entry("Chlorophyll", Some("Green pigment in the leaf"))
            .unwrap();
        store
            .insert_glossary_entry("Cell", Some("Smallest unit of life"))
            .unwrap();
        store
            .insert_glossary_entry("Atom", Some("Smallest unit of matter"))
            .unwrap();
    }

    #[test]
    fn test_initialize_creates_database() {
        let (store, temp_dir) = create_test_store();
        let info = store.env_info();

        assert!(info.db_path.exists(), "Database file should exist");
        assert_eq!(info.base_root, temp_dir.path());
    }

    #[test]
    fn test_initialize_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();

        let overrides = EnvOverrides {
            base_root: Some(base_path.clone()),
            db_path: Some(base_path.join("test.db")),
        };

        let first = ContentStore::initialize(overrides.clone()).expect("First init failed");
        first.insert_module("m1", "Module", None).unwrap();
        drop(first);

        let second = ContentStore::initialize(overrides).expect("Second init failed");
        assert_eq!(second.list_modules().unwrap().len(), 1);
    }

    #[test]
    fn test_list_modules() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let modules = store.list_modules().expect("Failed to list modules");

        let ids: Vec<_> = modules.iter().map(|m| m.module_id.as_str()).collect();
        assert_eq!(ids, vec!["cells", "plants"]);
        assert_eq!(modules[1].module_title, "Plants");
    }

    #[test]
    fn test_insert_module_rejects_duplicates() {
        let (store, _temp) = create_test_store();
        store.insert_module("m1", "One", None).unwrap();

        let err = store.insert_module("m1", "Again", None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_insert_module_requires_id() {
        let (store, _temp) = create_test_store();
        assert!(store.insert_module("  ", "Untitled", None).is_err());
    }

    #[test]
    fn test_get_module() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let module = store.get_module("cells").unwrap().expect("module missing");
        assert_eq!(module.module_title, "Cells");
        assert!(store.get_module("nope").unwrap().is_none());
    }

    #[test]
    fn test_module_content_is_ordered() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let items = store.module_content("plants").unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content_order, 1);
        assert_eq!(items[0].content_type, ContentType::Text);
        assert_eq!(items[1].content_type, ContentType::List);
        assert!(store.module_content("missing").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_content_type_round_trips() {
        let (store, _temp) = create_test_store();
        store
            .insert_module_content("m1", 0, &ContentType::Other("video".into()), Some("clip.mp4"), None)
            .unwrap();

        let items = store.module_content("m1").unwrap();
        assert_eq!(items[0].content_type, ContentType::Other("video".into()));
        assert_eq!(items[0].content_type.as_str(), "video");
    }

    #[test]
    fn test_find_modules_matches_title_or_description() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let by_title = store.find_modules("plant").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].module_id, "plants");

        let by_desc = store.find_modules("BUILDING").unwrap();
        assert_eq!(by_desc.len(), 1);
        assert_eq!(by_desc[0].module_id, "cells");
    }

    #[test]
    fn test_find_module_content_matches_content_or_text() {
        let (store, _temp) = create_test_store();
        seed(&store);

        assert_eq!(store.find_module_content("leaf").unwrap().len(), 2);
        assert_eq!(store.find_module_content("organelle").unwrap().len(), 1);
        assert!(store.find_module_content("zebra").unwrap().is_empty());
    }

    #[test]
    fn test_find_glossary_entries() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let hits = store.find_glossary_entries("smallest").unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.find_glossary_entries("chloro").unwrap();
        assert_eq!(hits[0].term, "Chlorophyll");
    }

    #[test]
    fn test_glossary_starting_with_is_sorted() {
        let (store, _temp) = create_test_store();
        seed(&store);

        let terms: Vec<_> = store
            .glossary_starting_with("C")
            .unwrap()
            .into_iter()
            .map(|g| g.term)
            .collect();
        assert_eq!(terms, vec!["Cell", "Chlorophyll"]);
        assert!(store.glossary_starting_with("Q").unwrap().is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive_beyond_ascii() {
        let (store, _temp) = create_test_store();
        store
            .insert_module("naturalism", "Émile Zola", Some("Über Naturalismus"))
            .unwrap();
        store
            .insert_glossary_entry("Ωμέγα", Some("Last letter of the Greek alphabet"))
            .unwrap();

        assert_eq!(store.find_modules("émile").unwrap().len(), 1);
        assert_eq!(store.find_modules("ÜBER").unwrap().len(), 1);
        assert_eq!(store.find_modules("zola").unwrap().len(), 1);
        assert!(store.find_modules("emile").unwrap().is_empty());

        let hits = store.find_glossary_entries("ωμέγα").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "Ωμέγα");
    }

    #[test]
    fn test_glossary_prefix_ignores_case() {
        let (store, _temp) = create_test_store();
        for term in ["avocado", "Atom", "apple", "Éclair", "éther", "Banana"] {
            store.insert_glossary_entry(term, None).unwrap();
        }

        let terms = |prefix: &str| -> Vec<String> {
            store
                .glossary_starting_with(prefix)
                .unwrap()
                .into_iter()
                .map(|g| g.term)
                .collect()
        };

        assert_eq!(terms("A"), vec!["apple", "Atom", "avocado"]);
        assert_eq!(terms("é"), vec!["Éclair", "éther"]);
        assert_eq!(terms("b"), vec!["Banana"]);
    }

    #[test]
    fn test_insert_glossary_requires_term() {
        let (store, _temp) = create_test_store();
        assert!(store.insert_glossary_entry("", Some("nothing")).is_err());
    }
}

#[cfg(all(test, feature = "search"))]
mod search_store_tests {
    use super::store_tests::{create_test_store, seed};
    use crate::search::{Route, RouteParam, SearchConfig, SearchOptions, Searcher};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_against_store() {
        let (store, _temp) = create_test_store();
        seed(&store);
        let searcher = Searcher::new(Arc::new(store), SearchConfig::default());

        let results = searcher
            .search("LEAF", SearchOptions::default())
            .await
            .expect("search failed");

        // Two content items, then the glossary entry.
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].route, Route::ModuleScreen);
        assert_eq!(results[0].param, RouteParam::Module("plants".into()));
        assert_eq!(results[0].name.as_deref(), Some("Plants"));
        assert_eq!(results[2].route, Route::IndexScreen);
        assert_eq!(results[2].text, "Green pigment in the leaf");
    }

    #[tokio::test]
    async fn test_search_wildcards_are_stripped() {
        let (store, _temp) = create_test_store();
        seed(&store);
        let searcher = Searcher::new(Arc::new(store), SearchConfig::default());

        let results = searcher.search("%", SearchOptions::default()).await.unwrap();
        assert!(results.is_empty());

        let results = searcher.search("nucle_us", SearchOptions::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "Which organelle holds DNA? The nucleus");
        assert_eq!(results[0].name.as_deref(), Some("Cells"));
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let (store, _temp) = create_test_store();
        store
            .insert_module("naturalism", "Émile Zola", Some("Über Naturalismus"))
            .unwrap();
        let searcher = Searcher::new(Arc::new(store), SearchConfig::default());

        for term in ["émile", "ÉMILE", "über", "ÜBER", "zola"] {
            let results = searcher.search(term, SearchOptions::default()).await.unwrap();
            assert_eq!(results.len(), 1, "{term}");
            assert_eq!(results[0].name.as_deref(), Some("Émile Zola"));
        }

        let results = searcher.search("ÜBER", SearchOptions::default()).await.unwrap();
        assert_eq!(results[0].text, "Über Naturalismus");
    }

    #[tokio::test]
    async fn test_build_index_against_store() {
        let (store, _temp) = create_test_store();
        seed(&store);
        let searcher = Searcher::new(Arc::new(store), SearchConfig::default());

        let index = searcher.build_index().await;

        let letters: Vec<_> = index.iter().map(|b| b.letter).collect();
        assert_eq!(letters, vec!['A', 'C']);
        assert_eq!(index[1].terms.len(), 2);
        assert_eq!(index[1].key, 1);
    }
}
