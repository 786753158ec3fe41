use super::*;
use async_trait::async_trait;
use cinetrack_catalog::{CatalogError, SeedCatalog};
use cinetrack_models::seed_movies;
use std::io;

use crate::confirm::AssumeYes;
use crate::persistence::{FileKeyValueStore, MemoryKeyValueStore};

const NAMESPACE: &str = "cinetrack";

fn movie(id: &str, title: &str) -> MovieRecord {
    MovieRecord {
        id: id.to_string(),
        title: title.to_string(),
        release_year: "2023".to_string(),
        image: None,
        rating: "7.5".to_string(),
        description: None,
        genre: None,
    }
}

fn rating(value: u8) -> PersonalRating {
    PersonalRating::new(value).unwrap()
}

fn memory_store() -> MovieStore<MemoryKeyValueStore> {
    MovieStore::open(PersistenceAdapter::new(MemoryKeyValueStore::new(), NAMESPACE))
}

fn stored_watchlist<S: KeyValueStore>(store: &MovieStore<S>) -> Vec<MovieRecord> {
    store.persistence().load(CollectionKey::Watchlist)
}

fn stored_watched<S: KeyValueStore>(store: &MovieStore<S>) -> Vec<WatchedRecord> {
    store.persistence().load(CollectionKey::Watched)
}

fn assert_exclusive(state: &MovieState) {
    let mut seen = std::collections::HashSet::new();
    for id in state
        .watchlist
        .iter()
        .map(|movie| movie.id.as_str())
        .chain(state.watched.iter().map(|record| record.movie.id.as_str()))
    {
        assert!(seen.insert(id.to_string()), "id {} held twice", id);
    }
}

struct Declined;

impl Confirmation for Declined {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Fails every write to keys containing `fail_on`
#[derive(Default)]
struct FailingStore {
    inner: MemoryKeyValueStore,
    fail_on: Option<&'static str>,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_on.is_some_and(|needle| key.contains(needle)) {
            return Err(StorageError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

struct BrokenCatalog;

#[async_trait]
impl CatalogSource for BrokenCatalog {
    fn source_name(&self) -> &str {
        "broken"
    }

    async fn fetch_popular(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".to_string()))
    }
}

#[test]
fn test_watchlist_to_watched_scenario() {
    let mut store = memory_store();

    assert!(store.add_to_watchlist(movie("tt1", "X")).unwrap());
    assert_eq!(store.state().watchlist.len(), 1);
    assert_eq!(store.state().watchlist[0].id, "tt1");
    assert!(store.state().watched.is_empty());

    let before = Utc::now();
    assert!(store.add_to_watched("tt1", Some(rating(9))).unwrap());

    let state = store.state();
    assert!(state.watchlist.is_empty());
    assert_eq!(state.watched.len(), 1);
    assert_eq!(state.watched[0].movie.id, "tt1");
    assert_eq!(state.watched[0].personal_rating, Some(rating(9)));
    assert!(state.watched[0].watched_date >= before);

    assert!(stored_watchlist(&store).is_empty());
    assert_eq!(stored_watched(&store), state.watched);
}

#[test]
fn test_collections_prepend_newest_first() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "First")).unwrap();
    store.add_to_watchlist(movie("tt2", "Second")).unwrap();

    let ids: Vec<&str> = store.state().watchlist.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt2", "tt1"]);

    store.add_to_watched("tt1", None).unwrap();
    store.add_to_watched("tt2", None).unwrap();
    let ids: Vec<&str> = store.state().watched.iter().map(|r| r.movie.id.as_str()).collect();
    assert_eq!(ids, vec!["tt2", "tt1"]);
}

#[test]
fn test_membership_stays_exclusive_across_actions() {
    let mut store = memory_store();
    store.search("");
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    store.add_to_watchlist(movie("tt2", "Two")).unwrap();

    let steps: Vec<Action> = vec![
        Action::AddToWatchlist(movie("tt1", "One again")),
        Action::AddToWatched {
            id: "tt1".to_string(),
            personal_rating: Some(rating(7)),
            watched_at: Utc::now(),
        },
        Action::AddToWatchlist(movie("tt1", "Already watched")),
        Action::AddToWatched {
            id: "tt1".to_string(),
            personal_rating: None,
            watched_at: Utc::now(),
        },
        Action::MoveToWatchlist("tt1".to_string()),
        Action::MoveToWatchlist("tt1".to_string()),
        Action::AddToWatched {
            id: "tt2".to_string(),
            personal_rating: None,
            watched_at: Utc::now(),
        },
        Action::ImportData {
            watchlist: vec![movie("tt3", "Three"), movie("tt3", "Three copy"), movie("tt4", "Four")],
            watched: vec![WatchedRecord::new(movie("tt4", "Four"), Utc::now(), None)],
        },
        Action::AddToWatchlist(movie("tt4", "Four")),
        Action::RemoveFromWatched("tt4".to_string()),
        Action::AddToWatchlist(movie("tt4", "Four")),
    ];

    for action in steps {
        store.dispatch(action).unwrap();
        assert_exclusive(store.state());
        assert_eq!(stored_watchlist(&store), store.state().watchlist);
        assert_eq!(stored_watched(&store), store.state().watched);
    }
}

#[test]
fn test_rewatch_gets_fresh_watched_date() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "X")).unwrap();

    let first = Utc::now() - chrono::Duration::days(3);
    store
        .dispatch(Action::AddToWatched {
            id: "tt1".to_string(),
            personal_rating: Some(rating(6)),
            watched_at: first,
        })
        .unwrap();

    assert!(store.move_to_watchlist("tt1").unwrap());
    assert_eq!(store.state().watchlist[0].id, "tt1");
    assert!(store.state().watched.is_empty());

    store.add_to_watched("tt1", None).unwrap();
    let record = &store.state().watched[0];
    assert!(record.watched_date > first);
    assert_eq!(record.personal_rating, None);
}

#[test]
fn test_add_to_watched_from_search_results() {
    let mut store = memory_store();
    let results = store.search("matrix").to_vec();
    assert_eq!(results.len(), 1);
    let id = results[0].id.clone();

    assert!(store.add_to_watched(&id, Some(rating(10))).unwrap());
    assert!(store.state().search_results.iter().all(|m| m.id != id));
    assert!(store.state().watchlist.is_empty());
    assert_eq!(store.state().watched[0].movie.title, "The Matrix");
}

#[test]
fn test_add_to_watchlist_drops_from_results() {
    let mut store = memory_store();
    store.search("");
    assert!(store.state().search_results.is_empty());

    let results = store.search("the").to_vec();
    let first = results[0].clone();
    store.add_to_watchlist(first.clone()).unwrap();

    assert!(store.state().search_results.iter().all(|m| m.id != first.id));
    assert_eq!(store.state().search_results.len(), results.len() - 1);
}

#[test]
fn test_unknown_ids_are_silent_no_ops() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "X")).unwrap();
    let before = store.state().clone();

    assert!(!store.remove_from_watchlist("tt404").unwrap());
    assert!(!store.remove_from_watched("tt404").unwrap());
    assert!(!store.move_to_watchlist("tt404").unwrap());
    assert!(!store.add_to_watched("tt404", None).unwrap());
    assert!(!store.update_personal_rating("tt1", rating(5)).unwrap());
    assert!(!store.add_to_watchlist(movie("", "No id")).unwrap());

    assert_eq!(store.state(), &before);
}

#[test]
fn test_update_personal_rating_in_place() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    store.add_to_watchlist(movie("tt2", "Two")).unwrap();
    store.add_to_watched("tt1", None).unwrap();
    store.add_to_watched("tt2", Some(rating(3))).unwrap();

    assert!(store.update_personal_rating("tt1", rating(8)).unwrap());

    let watched = &store.state().watched;
    assert_eq!(watched[1].movie.id, "tt1");
    assert_eq!(watched[1].personal_rating, Some(rating(8)));
    assert_eq!(stored_watched(&store), *watched);
}

#[test]
fn test_filter_is_not_persisted() {
    let mut store = memory_store();
    store.set_filter(ViewFilter::HighRated);

    assert_eq!(store.state().active_filter, ViewFilter::HighRated);
    assert!(store.persistence().store().is_empty());
}

#[test]
fn test_clear_all_data_erases_both_entries() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    store.add_to_watchlist(movie("tt2", "Two")).unwrap();
    store.add_to_watched("tt2", None).unwrap();

    assert!(store.clear_all_data(&AssumeYes).unwrap());

    assert!(store.state().watchlist.is_empty());
    assert!(store.state().watched.is_empty());
    assert!(!store.persistence().contains(CollectionKey::Watchlist));
    assert!(!store.persistence().contains(CollectionKey::Watched));
}

#[test]
fn test_declined_confirmation_changes_nothing() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    let before = store.state().clone();

    assert!(!store.clear_all_data(&Declined).unwrap());
    let snapshot = Snapshot {
        watchlist: vec![],
        watched: vec![],
        export_date: None,
        total_movies: None,
    };
    assert!(!store.import(snapshot, &Declined).unwrap());

    assert_eq!(store.state(), &before);
    assert_eq!(stored_watchlist(&store), before.watchlist);
}

#[test]
fn test_export_then_import_round_trip() {
    let mut store = memory_store();
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    store.add_to_watchlist(movie("tt2", "Two")).unwrap();
    store.add_to_watched("tt1", Some(rating(9))).unwrap();
    let exported = store.export_snapshot();
    assert_eq!(exported.total_movies, Some(2));

    let mut other = memory_store();
    other.add_to_watchlist(movie("tt9", "Will be replaced")).unwrap();
    let text = exported.to_json_pretty().unwrap();
    let parsed = crate::snapshot::parse_snapshot(&text).unwrap();
    assert!(other.import(parsed, &AssumeYes).unwrap());

    assert_eq!(other.state().watchlist, store.state().watchlist);
    assert_eq!(other.state().watched, store.state().watched);
    assert_eq!(stored_watched(&other), store.state().watched);
}

#[test]
fn test_import_drops_duplicates() {
    let mut store = memory_store();
    let watched_at = Utc::now();
    let snapshot = Snapshot {
        watchlist: vec![movie("tt1", "One"), movie("tt2", "Two"), movie("tt1", "One again")],
        watched: vec![
            WatchedRecord::new(movie("tt2", "Two"), watched_at, Some(rating(4))),
            WatchedRecord::new(movie("tt3", "Three"), watched_at, None),
            WatchedRecord::new(movie("tt3", "Three again"), watched_at, None),
        ],
        export_date: None,
        total_movies: None,
    };

    assert!(store.import(snapshot, &AssumeYes).unwrap());

    let state = store.state();
    assert_eq!(state.watchlist.len(), 1);
    assert_eq!(state.watchlist[0].title, "One");
    let watched: Vec<&str> = state.watched.iter().map(|r| r.movie.title.as_str()).collect();
    assert_eq!(watched, vec!["Two", "Three"]);
    assert_exclusive(state);
}

#[test]
fn test_reopen_restores_collections_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let kv = FileKeyValueStore::new(dir.path()).unwrap();
        let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
        store.add_to_watchlist(movie("tt1", "One")).unwrap();
        store.add_to_watchlist(movie("tt2", "Two")).unwrap();
        store.add_to_watched("tt1", Some(rating(7))).unwrap();
    }

    let kv = FileKeyValueStore::new(dir.path()).unwrap();
    let store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    assert_eq!(store.state().watchlist[0].id, "tt2");
    assert_eq!(store.state().watched[0].movie.id, "tt1");
    assert!(dir.path().join("cinetrack-watchlist.json").exists());
}

#[test]
fn test_corrupt_entry_hydrates_empty() {
    let mut kv = MemoryKeyValueStore::new();
    kv.set("cinetrack-watchlist", "definitely not json").unwrap();
    kv.set(
        "cinetrack-watched",
        &serde_json::to_string(&[WatchedRecord::new(movie("tt1", "One"), Utc::now(), None)]).unwrap(),
    )
    .unwrap();

    let store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    assert!(store.state().watchlist.is_empty());
    assert_eq!(store.state().watched.len(), 1);
}

#[test]
fn test_hydrate_rewrites_overlapping_collections() {
    let mut kv = MemoryKeyValueStore::new();
    kv.set(
        "cinetrack-watchlist",
        &serde_json::to_string(&[movie("tt1", "One"), movie("tt2", "Two")]).unwrap(),
    )
    .unwrap();
    kv.set(
        "cinetrack-watched",
        &serde_json::to_string(&[WatchedRecord::new(movie("tt1", "One"), Utc::now(), None)]).unwrap(),
    )
    .unwrap();

    let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    assert_exclusive(store.state());
    assert_eq!(stored_watchlist(&store), store.state().watchlist);
    assert_eq!(stored_watched(&store), store.state().watched);

    store.remove_from_watched("tt1").unwrap();
    assert_eq!(stored_watchlist(&store), store.state().watchlist);
    assert_eq!(stored_watched(&store), store.state().watched);
    assert!(!store.state().in_watchlist("tt1"));
}

#[test]
fn test_removed_duplicate_stays_gone_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut kv = FileKeyValueStore::new(dir.path()).unwrap();
        kv.set(
            "cinetrack-watchlist",
            &serde_json::to_string(&[movie("tt1", "One"), movie("tt2", "Two")]).unwrap(),
        )
        .unwrap();
        kv.set(
            "cinetrack-watched",
            &serde_json::to_string(&[WatchedRecord::new(movie("tt1", "One"), Utc::now(), None)]).unwrap(),
        )
        .unwrap();

        let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
        store.remove_from_watched("tt1").unwrap();
    }

    let kv = FileKeyValueStore::new(dir.path()).unwrap();
    let store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    let ids: Vec<&str> = store.state().watchlist.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt2"]);
    assert!(store.state().watched.is_empty());
}

#[test]
fn test_saved_results_resolve_in_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let nameless = cinetrack_models::normalize(&serde_json::json!({ "title": "Nameless" }));
    {
        let kv = FileKeyValueStore::new(dir.path()).unwrap();
        let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
        assert!(!store.restore_results());
        store.dispatch(Action::SetSearchResults(vec![nameless.clone()])).unwrap();
        store.save_results().unwrap();
    }

    let kv = FileKeyValueStore::new(dir.path()).unwrap();
    let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    assert!(store.state().search_results.is_empty());
    assert!(store.restore_results());
    assert_eq!(store.state().find_movie(&nameless.id), Some(&nameless));

    store.add_to_watched(&nameless.id, None).unwrap();
    assert_eq!(stored_watched(&store)[0].movie, nameless);
}

#[test]
fn test_storage_failure_is_not_committed() {
    let kv = FailingStore {
        fail_on: Some("watched"),
        ..FailingStore::default()
    };
    let mut store = MovieStore::open(PersistenceAdapter::new(kv, NAMESPACE));
    store.add_to_watchlist(movie("tt1", "One")).unwrap();
    let before = store.state().clone();

    let result = store.add_to_watched("tt1", None);
    assert!(matches!(result, Err(StorageError::Io(_))));

    assert_eq!(store.state(), &before);
    assert_eq!(stored_watchlist(&store), before.watchlist);
}

#[tokio::test]
async fn test_refresh_popular_uses_catalog() {
    let mut store = memory_store();
    let advisory = store.refresh_popular(&SeedCatalog).await;

    assert!(advisory.is_none());
    assert!(!store.state().loading);
    assert_eq!(store.state().popular_movies, seed_movies());
    assert_eq!(store.state().search_results, seed_movies());
}

#[tokio::test]
async fn test_refresh_popular_falls_back_with_advisory() {
    let mut store = memory_store();
    let advisory = store.refresh_popular(&BrokenCatalog).await.unwrap();

    assert!(advisory.starts_with("Using demo data. API Error:"));
    assert_eq!(store.state().error.as_deref(), Some(advisory.as_str()));
    assert_eq!(store.state().popular_movies, seed_movies());
    assert!(!store.state().loading);
}

#[test]
fn test_superseded_fetch_is_discarded() {
    let mut store = memory_store();
    let stale = store.begin_popular_fetch();
    let fresh = store.begin_popular_fetch();
    assert!(store.state().loading);

    let fresh_outcome = CatalogOutcome {
        movies: vec![movie("tt2", "Fresh")],
        advisory: None,
    };
    assert!(store.finish_popular_fetch(fresh, fresh_outcome));

    let stale_outcome = CatalogOutcome {
        movies: vec![movie("tt1", "Stale")],
        advisory: Some("old".to_string()),
    };
    assert!(!store.finish_popular_fetch(stale, stale_outcome));

    assert_eq!(store.state().popular_movies[0].title, "Fresh");
    assert_eq!(store.state().error, None);
}

#[test]
fn test_fetch_finishing_after_search_keeps_search_results() {
    let mut store = memory_store();
    let tag = store.begin_popular_fetch();
    store.search("godfather");

    let outcome = CatalogOutcome {
        movies: vec![movie("tt7", "Popular")],
        advisory: None,
    };
    assert!(store.finish_popular_fetch(tag, outcome));

    assert_eq!(store.state().popular_movies[0].id, "tt7");
    assert_eq!(store.state().search_results[0].title, "The Godfather");
    assert_eq!(store.state().search_query, "godfather");
}

#[test]
fn test_search_without_match_suggests_similar() {
    let mut store = memory_store();
    let results = store.search("zzzz-nothing");

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|m| m.title.ends_with(" (Similar)")));
}
