//! End-to-end search behaviour for SearchEngine

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tyto_core::{
    Anchoring, CancellationToken, DisplayCase, EngineConfig, SearchEngine, SearchOptions,
    SearchSession, SearchStatus,
};

const COUNTRIES: &[&str] = &[
    "Albania",
    "Andorra",
    "Armenia",
    "Austria",
    "Azerbaijan",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czechia",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Kosovo",
    "Latvia",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Moldova",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "North Macedonia",
    "Norway",
    "Poland",
    "Portugal",
    "Romania",
    "Russia",
    "San Marino",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Turkey",
    "Ukraine",
    "United Kingdom",
    "Vatican City",
];

fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn countries_engine() -> SearchEngine {
    SearchEngine::new(terms(COUNTRIES), None).unwrap()
}

#[tokio::test]
async fn test_transposed_letters_suggest_germany() {
    let engine = SearchEngine::new(terms(&["Germany"]), None).unwrap();
    let result = engine.search("Gremany", SearchOptions::new()).await;

    assert!(result.hits.is_empty());
    assert_eq!(result.suggestions, vec!["Germany"]);
    assert_eq!(result.status, SearchStatus::Complete);
}

#[tokio::test]
async fn test_empty_dictionary() {
    let engine = SearchEngine::new(Vec::new(), None).unwrap();
    let result = engine.search("anything", SearchOptions::new()).await;

    assert!(result.is_empty());
    assert_eq!(result.status, SearchStatus::Complete);
}

#[tokio::test]
async fn test_literal_hit_excludes_near_miss() {
    let engine = SearchEngine::new(terms(&["Montenegro", "Montenegrin"]), None).unwrap();
    let result = engine.search("Montenegro", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["Montenegro"]);
    assert!(!result.hits.contains(&"Montenegrin".to_string()));
    assert_eq!(result.suggestions, vec!["Montenegrin"]);
}

#[tokio::test]
async fn test_four_character_query_is_rejected() {
    let engine = countries_engine();
    let result = engine.search("Germ", SearchOptions::new()).await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_hits_are_case_insensitive() {
    let engine = countries_engine();
    let result = engine.search("SLOVA", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["Slovakia"]);
    assert!(result.suggestions.contains(&"Slovenia".to_string()));
}

#[tokio::test]
async fn test_inserted_letter() {
    let engine = countries_engine();
    let result = engine.search("Swiitzerland", SearchOptions::new()).await;

    assert!(result.hits.is_empty());
    assert_eq!(result.suggestions, vec!["Switzerland"]);
}

#[tokio::test]
async fn test_substring_in_longer_term() {
    let engine = countries_engine();
    let result = engine.search("herzegovina", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["Bosnia and Herzegovina"]);
    assert!(result.suggestions.is_empty());
}

#[tokio::test]
async fn test_duplicates_collapse_to_first_entry() {
    let engine = SearchEngine::new(terms(&["serbia", "Serbia", "SERBIA"]), None).unwrap();
    let result = engine.search("Serbia", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["serbia"]);
    assert!(result.suggestions.is_empty());
}

#[tokio::test]
async fn test_cap_limits_total_results() {
    let dictionary: Vec<String> = (0..40).map(|i| format!("Island {:02}", i)).collect();
    let engine = SearchEngine::new(dictionary, None).unwrap();

    let result = engine
        .search("Island", SearchOptions::new().max_suggestions(7))
        .await;
    assert!(result.len() <= 7);
    assert!(!result.is_empty());
}

#[tokio::test]
async fn test_engine_default_cap() {
    let config = EngineConfig {
        max_suggestions: Some(3),
        ..Default::default()
    };
    let dictionary: Vec<String> = (0..20).map(|i| format!("Lake {:02} Ohrid", i)).collect();
    let engine = SearchEngine::with_config(dictionary, config).unwrap();

    let result = engine.search("Ohrid", SearchOptions::new()).await;
    assert!(result.len() <= 3);

    // Per-call value overrides the engine default
    let result = engine
        .search("Ohrid", SearchOptions::new().max_suggestions(10))
        .await;
    assert!(result.len() <= 10);
    assert!(result.len() > 3);
}

#[tokio::test]
async fn test_capitalized_display() {
    let config = EngineConfig {
        display: DisplayCase::Capitalized,
        ..Default::default()
    };
    let engine = SearchEngine::with_config(terms(&["north macedonia"]), config).unwrap();
    let result = engine.search("macedonia", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["North Macedonia"]);
}

#[tokio::test]
async fn test_term_start_anchoring() {
    let config = EngineConfig {
        anchoring: Anchoring::TermStart,
        ..Default::default()
    };
    let engine =
        SearchEngine::with_config(terms(&["Ireland", "Northern Ireland"]), config).unwrap();
    let result = engine.search("Irelnad", SearchOptions::new()).await;

    assert_eq!(result.suggestions, vec!["Ireland"]);
}

#[tokio::test]
async fn test_custom_minimum_length() {
    let config = EngineConfig {
        min_query_len: 4,
        ..Default::default()
    };
    let engine = SearchEngine::with_config(terms(COUNTRIES), config).unwrap();
    let result = engine.search("Ital", SearchOptions::new()).await;

    assert_eq!(result.hits, vec!["Italy"]);
}

#[tokio::test]
async fn test_uncompilable_patterns_degrade_to_empty() {
    let config = EngineConfig {
        pattern_size_limit: 1,
        ..Default::default()
    };
    let engine = SearchEngine::with_config(terms(COUNTRIES), config).unwrap();
    let result = engine.search("Gremany", SearchOptions::new()).await;

    assert!(result.is_empty());
    assert_eq!(result.status, SearchStatus::Complete);
}

#[tokio::test]
async fn test_repeated_searches_are_deterministic() {
    let engine = countries_engine();
    let first = engine.search("Slovnia", SearchOptions::new()).await;
    for _ in 0..20 {
        let again = engine.search("Slovnia", SearchOptions::new()).await;
        assert_eq!(again, first);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_searches_share_engine() {
    let engine = countries_engine();
    let queries = ["Gremany", "Swiitzerland", "Rumania", "Montenegro", "Polnad"];

    let mut tasks = Vec::new();
    for query in queries {
        let engine = engine.clone();
        tasks.push(tokio::spawn(async move {
            (query, engine.search(query, SearchOptions::new()).await)
        }));
    }

    for task in tasks {
        let (query, result) = task.await.unwrap();
        let sequential = engine.search(query, SearchOptions::new()).await;
        assert_eq!(result, sequential, "query {query}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_deadline_returns_partial_result() {
    let dictionary: Vec<String> = (0..200_000)
        .map(|i| format!("Principality {:06}", i))
        .collect();
    let engine = SearchEngine::new(dictionary, None).unwrap();

    let result = engine
        .search(
            "Principality of Liechtenstein",
            SearchOptions::new().timeout(Duration::from_secs(3600)),
        )
        .await;

    assert_eq!(result.status, SearchStatus::TimedOut);
    assert!(result.is_partial());
}

#[tokio::test]
async fn test_cancelled_search_reports_status() {
    let engine = countries_engine();
    let token = CancellationToken::new();
    token.cancel();

    let result = engine
        .search("Gremany", SearchOptions::new().cancel_token(token))
        .await;
    assert_eq!(result.status, SearchStatus::Cancelled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_stops_dispatched_matchers() {
    let dictionary: Vec<String> = (0..400_000)
        .map(|i| format!("Principality {:06}", i))
        .collect();
    let engine = SearchEngine::new(dictionary, None).unwrap();
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            token.cancel();
        })
    };

    let result = engine
        .search(
            "Principality of Liechtenstein",
            SearchOptions::new().cancel_token(token.clone()),
        )
        .await;
    canceller.await.unwrap();

    assert!(token.is_cancelled());
    assert_eq!(result.status, SearchStatus::Cancelled);
    assert!(result.is_partial());
}

#[tokio::test]
async fn test_superseded_session_search_is_cancelled() {
    let dictionary: Vec<String> = (0..200_000)
        .map(|i| format!("Principality {:06}", i))
        .collect();
    let session = SearchSession::new(SearchEngine::new(dictionary, None).unwrap());
    let delivered = Arc::new(parking_lot::Mutex::new(Vec::new()));

    for query in ["Principality of Liechtenstein", "Principality of Monaco"] {
        let delivered = delivered.clone();
        session.submit(query, move |result| {
            delivered.lock().push((query, result.status));
        });
    }
    session.cancel();
    session.finish().await;
    // Let the superseded task deliver as well
    while delivered.lock().len() < 2 {
        tokio::task::yield_now().await;
    }

    let delivered = delivered.lock();
    assert!(delivered
        .iter()
        .any(|entry| *entry == ("Principality of Liechtenstein", SearchStatus::Cancelled)));
    assert!(delivered
        .iter()
        .any(|entry| *entry == ("Principality of Monaco", SearchStatus::Cancelled)));
}

#[test]
fn test_window_as_wide_as_query_is_rejected() {
    let result = SearchEngine::new(terms(&["Germany", "Gxyzw"]), Some(9));
    assert!(matches!(result, Err(tyto_core::EngineError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_pending_engine_waits_for_dictionary() {
    let (engine, loader) = SearchEngine::pending(EngineConfig::default()).unwrap();
    assert!(!engine.is_ready());
    assert_eq!(engine.term_count(), 0);

    let search = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.search("Gremany", SearchOptions::new()).await })
    };
    tokio::task::yield_now().await;
    loader.publish(terms(COUNTRIES));

    let result = search.await.unwrap();
    assert_eq!(result.suggestions, vec!["Germany"]);
    assert!(engine.is_ready());
    assert_eq!(engine.term_count(), COUNTRIES.len());
}

#[tokio::test]
async fn test_abandoned_loader_means_empty_dictionary() {
    let (engine, loader) = SearchEngine::pending(EngineConfig::default()).unwrap();
    drop(loader);

    let result = engine.search("Gremany", SearchOptions::new()).await;
    assert!(result.is_empty());
    assert_eq!(result.status, SearchStatus::Complete);
}

#[tokio::test(start_paused = true)]
async fn test_pending_engine_honours_deadline() {
    let (engine, _loader) = SearchEngine::pending(EngineConfig::default()).unwrap();

    let result = engine
        .search("Gremany", SearchOptions::new().timeout(Duration::from_millis(50)))
        .await;
    assert_eq!(result.status, SearchStatus::TimedOut);
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_session_supersedes_previous_query() {
    let session = SearchSession::new(countries_engine());
    let delivered = Arc::new(parking_lot::Mutex::new(Vec::new()));

    for query in ["Swi", "Swiit", "Swiitzerland"] {
        let delivered = delivered.clone();
        session.submit(query, move |result| {
            delivered.lock().push((query, result));
        });
    }
    session.finish().await;

    let delivered = delivered.lock();
    let (query, last) = delivered
        .iter()
        .find(|(query, _)| *query == "Swiitzerland")
        .unwrap();
    assert_eq!(*query, "Swiitzerland");
    assert_eq!(last.suggestions, vec!["Switzerland"]);
    assert_eq!(last.status, SearchStatus::Complete);
}
