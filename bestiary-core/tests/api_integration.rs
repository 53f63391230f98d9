//! Integration tests that call a running Monster Search Service.
//!
//! These tests need a service at BESTIARY_API_URL (via .env file or environment).
//! Run with: `cargo test -p bestiary-core --test api_integration -- --ignored`
//!
//! These are marked #[ignore] by default to avoid:
//! - Test failures when no service is running
//! - Depending on whatever data the service happens to be seeded with

use bestiary_core::{render_monster, ApiError, MonsterApi, SearchController, SearchOutcome, SearchQuery};

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if a service URL is configured
fn has_service() -> bool {
    std::env::var("BESTIARY_API_URL").is_ok()
}

#[tokio::test]
#[ignore] // Run with: cargo test -p bestiary-core --test api_integration -- --ignored
async fn test_empty_search_lists_monsters() {
    setup();
    if !has_service() {
        eprintln!("Skipping test: BESTIARY_API_URL not set");
        return;
    }

    let api = MonsterApi::from_env().expect("Failed to create client");
    let mut search = SearchController::new(api.config().page_size);

    let outcome = search.submit(&api).await;
    println!("Outcome: {outcome:?}");
    assert!(matches!(outcome, SearchOutcome::Applied(_)));

    for monster in search.results() {
        println!("{}\n", render_monster(monster));
    }
}

#[tokio::test]
#[ignore]
async fn test_search_results_match_name() {
    setup();
    if !has_service() {
        eprintln!("Skipping test: BESTIARY_API_URL not set");
        return;
    }

    let api = MonsterApi::from_env().expect("Failed to create client");
    let monsters = api.search_monsters("a").await.expect("search should succeed");

    for monster in &monsters {
        assert!(
            monster.name.to_lowercase().contains('a'),
            "{} does not match the query",
            monster.name
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_missing_monster_is_not_found() {
    setup();
    if !has_service() {
        eprintln!("Skipping test: BESTIARY_API_URL not set");
        return;
    }

    let api = MonsterApi::from_env().expect("Failed to create client");
    let result = api.get_monster(i64::MAX).await;
    assert!(matches!(result, Err(ApiError::NotFound)), "got {result:?}");
}

#[tokio::test]
#[ignore]
async fn test_spell_search() {
    setup();
    if !has_service() {
        eprintln!("Skipping test: BESTIARY_API_URL not set");
        return;
    }

    let api = MonsterApi::from_env().expect("Failed to create client");
    let spells = api
        .search_spells(&SearchQuery::by_name("").with_page_count(3))
        .await
        .expect("spell search should succeed");
    assert!(spells.len() <= 3);
}
