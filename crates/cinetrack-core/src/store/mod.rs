pub mod action;
pub mod reducer;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use reducer::{deduplicate_collections, reduce, PersistPlan, Transition};
pub use state::{MovieState, UnknownFilter, ViewFilter};

use chrono::Utc;
use cinetrack_catalog::{fetch_popular_or_seed, CatalogOutcome, CatalogSource};
use cinetrack_models::{MovieRecord, PersonalRating, WatchedRecord};
use tracing::{debug, info, warn};

use crate::confirm::{Confirmation, CLEAR_PROMPT, IMPORT_PROMPT};
use crate::persistence::{CollectionKey, KeyValueStore, PersistenceAdapter, StorageError};
use crate::search::SearchEngine;
use crate::snapshot::{export_snapshot, Snapshot};

/// Identifies a catalog fetch or search so late completions can be discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTag(u64);

/// The single owner of the collections.
///
/// Every mutation goes through [`MovieStore::dispatch`]: the pure reducer
/// computes the next state, the touched collections are written to the
/// persistence adapter, and only then is the new state committed. Methods take
/// `&mut self`, so actions never interleave.
pub struct MovieStore<S> {
    state: MovieState,
    persistence: PersistenceAdapter<S>,
    search: SearchEngine,
    last_request: u64,
    latest_popular: u64,
    latest_results: u64,
}

impl<S: KeyValueStore> MovieStore<S> {
    /// A store with empty collections; call [`MovieStore::hydrate`] to load saved data
    pub fn new(persistence: PersistenceAdapter<S>) -> Self {
        Self {
            state: MovieState::default(),
            persistence,
            search: SearchEngine::default(),
            last_request: 0,
            latest_popular: 0,
            latest_results: 0,
        }
    }

    /// Construct and load the persisted collections
    pub fn open(persistence: PersistenceAdapter<S>) -> Self {
        let mut store = Self::new(persistence);
        store.hydrate();
        store
    }

    pub fn state(&self) -> &MovieState {
        &self.state
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Replace in-memory collections with what the durable store holds.
    ///
    /// Duplicates found on load are dropped and the cleaned collections written
    /// back, so the durable store never disagrees with memory.
    pub fn hydrate(&mut self) {
        let watchlist: Vec<MovieRecord> = self.persistence.load(CollectionKey::Watchlist);
        let watched: Vec<WatchedRecord> = self.persistence.load(CollectionKey::Watched);
        let loaded = (watchlist.len(), watched.len());
        info!(
            operation = "hydrate",
            watchlist = loaded.0,
            watched = loaded.1,
            "Loaded collections from storage"
        );
        self.apply_transient(Action::LoadFromStorage { watchlist, watched });

        if (self.state.watchlist.len(), self.state.watched.len()) != loaded {
            warn!(
                operation = "hydrate",
                watchlist = self.state.watchlist.len(),
                watched = self.state.watched.len(),
                "Dropped duplicate movies from storage, rewriting collections"
            );
            let rewritten = self
                .persistence
                .save(CollectionKey::Watchlist, &self.state.watchlist)
                .and_then(|()| self.persistence.save(CollectionKey::Watched, &self.state.watched));
            if let Err(e) = rewritten {
                warn!("Failed to rewrite deduplicated collections: {}", e);
            }
        }
    }

    /// Apply an action. Returns `Ok(false)` when a precondition turned it into a
    /// no-op. On a storage error nothing is committed.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, StorageError> {
        let name = action.name();
        let transition = reduce(&self.state, action);

        if !transition.changed {
            debug!(action = name, "Precondition not met, state unchanged");
            return Ok(false);
        }

        if let Err(e) = self.persist(transition.persist, &transition.state) {
            warn!(action = name, "Failed to persist: {}. Change discarded.", e);
            self.restore_durable(transition.persist);
            return Err(e);
        }

        debug!(action = name, persisted = !transition.persist.is_empty(), "Action applied");
        self.state = transition.state;
        Ok(true)
    }

    /// For actions that only touch transient fields
    fn apply_transient(&mut self, action: Action) {
        let transition = reduce(&self.state, action);
        debug_assert!(transition.persist.is_empty());
        self.state = transition.state;
    }

    fn persist(&mut self, plan: PersistPlan, next: &MovieState) -> Result<(), StorageError> {
        if plan.clear {
            self.persistence.clear(CollectionKey::Watchlist)?;
            self.persistence.clear(CollectionKey::Watched)?;
            return Ok(());
        }
        if plan.watchlist {
            self.persistence.save(CollectionKey::Watchlist, &next.watchlist)?;
        }
        if plan.watched {
            self.persistence.save(CollectionKey::Watched, &next.watched)?;
        }
        Ok(())
    }

    /// Best effort: put the committed collections back after a partial write
    fn restore_durable(&mut self, plan: PersistPlan) {
        let restore_watchlist = plan.watchlist || plan.clear;
        let restore_watched = plan.watched || plan.clear;

        if restore_watchlist {
            if let Err(e) = self.persistence.save(CollectionKey::Watchlist, &self.state.watchlist) {
                warn!("Failed to restore stored watchlist: {}", e);
            }
        }
        if restore_watched {
            if let Err(e) = self.persistence.save(CollectionKey::Watched, &self.state.watched) {
                warn!("Failed to restore stored watched list: {}", e);
            }
        }
    }

    pub fn add_to_watchlist(&mut self, movie: MovieRecord) -> Result<bool, StorageError> {
        self.dispatch(Action::AddToWatchlist(movie))
    }

    pub fn remove_from_watchlist(&mut self, id: &str) -> Result<bool, StorageError> {
        self.dispatch(Action::RemoveFromWatchlist(id.to_string()))
    }

    /// Mark a movie from the watchlist or the current results as watched now
    pub fn add_to_watched(&mut self, id: &str, personal_rating: Option<PersonalRating>) -> Result<bool, StorageError> {
        self.dispatch(Action::AddToWatched {
            id: id.to_string(),
            personal_rating,
            watched_at: Utc::now(),
        })
    }

    pub fn remove_from_watched(&mut self, id: &str) -> Result<bool, StorageError> {
        self.dispatch(Action::RemoveFromWatched(id.to_string()))
    }

    pub fn move_to_watchlist(&mut self, id: &str) -> Result<bool, StorageError> {
        self.dispatch(Action::MoveToWatchlist(id.to_string()))
    }

    pub fn update_personal_rating(&mut self, id: &str, rating: PersonalRating) -> Result<bool, StorageError> {
        self.dispatch(Action::UpdatePersonalRating {
            id: id.to_string(),
            rating,
        })
    }

    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.apply_transient(Action::SetFilter(filter));
    }

    /// Erase both collections after confirmation. `Ok(false)` if declined.
    pub fn clear_all_data(&mut self, confirmation: &dyn Confirmation) -> Result<bool, StorageError> {
        if !confirmation.confirm(CLEAR_PROMPT) {
            info!("Clear all data declined");
            return Ok(false);
        }
        let cleared = self.dispatch(Action::ClearAllData)?;
        info!(operation = "clear_all_data", "All data cleared");
        Ok(cleared)
    }

    pub fn export_snapshot(&self) -> Snapshot {
        export_snapshot(&self.state, Utc::now())
    }

    /// Replace both collections with a snapshot after confirmation.
    ///
    /// Duplicate ids in the snapshot are dropped. `Ok(false)` if declined.
    pub fn import(&mut self, snapshot: Snapshot, confirmation: &dyn Confirmation) -> Result<bool, StorageError> {
        if !confirmation.confirm(IMPORT_PROMPT) {
            info!("Import declined");
            return Ok(false);
        }

        let incoming = snapshot.movie_count();
        self.dispatch(Action::ImportData {
            watchlist: snapshot.watchlist,
            watched: snapshot.watched,
        })?;

        let kept = self.state.total_movies();
        if kept < incoming {
            warn!(
                operation = "import",
                dropped = incoming - kept,
                "Dropped duplicate movies from imported snapshot"
            );
        }
        info!(
            operation = "import",
            watchlist = self.state.watchlist.len(),
            watched = self.state.watched.len(),
            "Imported snapshot"
        );
        Ok(true)
    }

    fn next_tag(&mut self) -> RequestTag {
        self.last_request += 1;
        RequestTag(self.last_request)
    }

    /// Mark a popular-movies fetch as in flight
    pub fn begin_popular_fetch(&mut self) -> RequestTag {
        let tag = self.next_tag();
        self.latest_popular = tag.0;
        self.latest_results = tag.0;
        self.apply_transient(Action::SetError(None));
        self.apply_transient(Action::SetLoading(true));
        tag
    }

    /// Apply a finished fetch unless a later one was started. The popular list
    /// is updated even if a later search owns the result set.
    pub fn finish_popular_fetch(&mut self, tag: RequestTag, outcome: CatalogOutcome) -> bool {
        if tag.0 != self.latest_popular {
            debug!(?tag, latest = self.latest_popular, "Discarding superseded catalog fetch");
            return false;
        }

        let owns_results = tag.0 == self.latest_results;
        if owns_results {
            self.apply_transient(Action::SetSearchResults(outcome.movies.clone()));
        }
        self.apply_transient(Action::SetPopularMovies(outcome.movies));
        self.apply_transient(Action::SetError(outcome.advisory));
        true
    }

    /// Fetch popular movies (seed data on failure) and show them as results.
    /// Returns the advisory message when seed data was used.
    pub async fn refresh_popular(&mut self, catalog: &dyn CatalogSource) -> Option<String> {
        let tag = self.begin_popular_fetch();
        let outcome = fetch_popular_or_seed(catalog).await;
        let advisory = outcome.advisory.clone();
        self.finish_popular_fetch(tag, outcome);
        advisory
    }

    /// Remember the current results so a later session can resolve their ids
    pub fn save_results(&mut self) -> Result<(), StorageError> {
        self.persistence.save(CollectionKey::Results, &self.state.search_results)
    }

    /// Bring back the results saved by [`MovieStore::save_results`].
    /// Returns false when nothing was saved.
    pub fn restore_results(&mut self) -> bool {
        let results: Vec<MovieRecord> = self.persistence.load(CollectionKey::Results);
        if results.is_empty() {
            return false;
        }
        debug!(results = results.len(), "Restored saved results");
        self.apply_transient(Action::SetSearchResults(results));
        true
    }

    /// Run a search and make its matches the current results
    pub fn search(&mut self, query: &str) -> &[MovieRecord] {
        let tag = self.next_tag();
        self.latest_results = tag.0;

        let results = self.search.search(query, &self.state.popular_movies);
        if !query.trim().is_empty() {
            self.apply_transient(Action::SetSearchQuery(query.to_string()));
            self.apply_transient(Action::SetError(None));
        }
        debug!(query, results = results.len(), "Search completed");
        self.apply_transient(Action::SetSearchResults(results));
        &self.state.search_results
    }
}
