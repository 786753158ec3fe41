use cinetrack_models::{MovieEntry, MovieRecord, WatchedRecord};
use std::collections::HashSet;

use crate::store::action::Action;
use crate::store::state::MovieState;

/// Which durable entries must be written before a transition counts as done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistPlan {
    pub watchlist: bool,
    pub watched: bool,
    /// Erase both entries instead of writing them
    pub clear: bool,
}

impl PersistPlan {
    pub const NONE: PersistPlan = PersistPlan {
        watchlist: false,
        watched: false,
        clear: false,
    };

    const BOTH: PersistPlan = PersistPlan {
        watchlist: true,
        watched: true,
        clear: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: MovieState,
    pub persist: PersistPlan,
    /// False when a precondition failed and the action was a no-op
    pub changed: bool,
}

impl Transition {
    fn unchanged(state: &MovieState) -> Self {
        Self {
            state: state.clone(),
            persist: PersistPlan::NONE,
            changed: false,
        }
    }

    fn transient(state: MovieState) -> Self {
        Self {
            state,
            persist: PersistPlan::NONE,
            changed: true,
        }
    }

    fn persisted(state: MovieState, persist: PersistPlan) -> Self {
        Self {
            state,
            persist,
            changed: true,
        }
    }
}

fn without_id<T: MovieEntry + Clone>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.movie_id() != id).cloned().collect()
}

/// Drop repeated ids inside each collection (first occurrence wins) and any
/// watchlist entry whose id is also watched.
pub fn deduplicate_collections(
    watchlist: Vec<MovieRecord>,
    watched: Vec<WatchedRecord>,
) -> (Vec<MovieRecord>, Vec<WatchedRecord>) {
    let mut watched_ids = HashSet::new();
    let watched: Vec<WatchedRecord> = watched
        .into_iter()
        .filter(|record| watched_ids.insert(record.movie.id.clone()))
        .collect();

    let mut watchlist_ids = HashSet::new();
    let watchlist: Vec<MovieRecord> = watchlist
        .into_iter()
        .filter(|movie| !watched_ids.contains(&movie.id))
        .filter(|movie| watchlist_ids.insert(movie.id.clone()))
        .collect();

    (watchlist, watched)
}

/// Compute the state that follows `action`. No I/O happens here; the store
/// carries out `Transition::persist` before committing the new state.
pub fn reduce(state: &MovieState, action: Action) -> Transition {
    match action {
        Action::SetLoading(loading) => Transition::transient(MovieState {
            loading,
            ..state.clone()
        }),

        Action::SetError(error) => Transition::transient(MovieState {
            error,
            loading: false,
            ..state.clone()
        }),

        Action::SetSearchResults(search_results) => Transition::transient(MovieState {
            search_results,
            loading: false,
            ..state.clone()
        }),

        Action::SetPopularMovies(popular_movies) => Transition::transient(MovieState {
            popular_movies,
            loading: false,
            ..state.clone()
        }),

        Action::SetSearchQuery(search_query) => Transition::transient(MovieState {
            search_query,
            ..state.clone()
        }),

        Action::SetFilter(active_filter) => Transition::transient(MovieState {
            active_filter,
            ..state.clone()
        }),

        Action::AddToWatchlist(movie) => {
            if movie.id.is_empty() || state.in_watchlist(&movie.id) || state.in_watched(&movie.id) {
                return Transition::unchanged(state);
            }

            let search_results = without_id(&state.search_results, &movie.id);
            let mut watchlist = Vec::with_capacity(state.watchlist.len() + 1);
            watchlist.push(movie);
            watchlist.extend(state.watchlist.iter().cloned());

            Transition::persisted(
                MovieState {
                    watchlist,
                    search_results,
                    ..state.clone()
                },
                PersistPlan {
                    watchlist: true,
                    ..PersistPlan::NONE
                },
            )
        }

        Action::RemoveFromWatchlist(id) => {
            if !state.in_watchlist(&id) {
                return Transition::unchanged(state);
            }

            Transition::persisted(
                MovieState {
                    watchlist: without_id(&state.watchlist, &id),
                    ..state.clone()
                },
                PersistPlan {
                    watchlist: true,
                    ..PersistPlan::NONE
                },
            )
        }

        Action::AddToWatched {
            id,
            personal_rating,
            watched_at,
        } => {
            if state.in_watched(&id) {
                return Transition::unchanged(state);
            }

            let from_watchlist = state.watchlist.iter().find(|movie| movie.id == id);
            let source = from_watchlist.or_else(|| state.search_results.iter().find(|movie| movie.id == id));
            let Some(movie) = source else {
                return Transition::unchanged(state);
            };

            let mut watched = Vec::with_capacity(state.watched.len() + 1);
            watched.push(WatchedRecord::new(movie.clone(), watched_at, personal_rating));
            watched.extend(state.watched.iter().cloned());

            Transition::persisted(
                MovieState {
                    watchlist: without_id(&state.watchlist, &id),
                    watched,
                    search_results: without_id(&state.search_results, &id),
                    ..state.clone()
                },
                PersistPlan {
                    watchlist: from_watchlist.is_some(),
                    watched: true,
                    clear: false,
                },
            )
        }

        Action::RemoveFromWatched(id) => {
            if !state.in_watched(&id) {
                return Transition::unchanged(state);
            }

            Transition::persisted(
                MovieState {
                    watched: without_id(&state.watched, &id),
                    ..state.clone()
                },
                PersistPlan {
                    watched: true,
                    ..PersistPlan::NONE
                },
            )
        }

        Action::MoveToWatchlist(id) => {
            let Some(record) = state.find_watched(&id) else {
                return Transition::unchanged(state);
            };

            let mut watchlist = Vec::with_capacity(state.watchlist.len() + 1);
            watchlist.push(record.clone().into_movie());
            watchlist.extend(state.watchlist.iter().filter(|movie| movie.id != id).cloned());

            Transition::persisted(
                MovieState {
                    watchlist,
                    watched: without_id(&state.watched, &id),
                    ..state.clone()
                },
                PersistPlan::BOTH,
            )
        }

        Action::UpdatePersonalRating { id, rating } => {
            if !state.in_watched(&id) {
                return Transition::unchanged(state);
            }

            let watched = state
                .watched
                .iter()
                .map(|record| {
                    if record.movie.id == id {
                        WatchedRecord {
                            personal_rating: Some(rating),
                            ..record.clone()
                        }
                    } else {
                        record.clone()
                    }
                })
                .collect();

            Transition::persisted(
                MovieState {
                    watched,
                    ..state.clone()
                },
                PersistPlan {
                    watched: true,
                    ..PersistPlan::NONE
                },
            )
        }

        Action::LoadFromStorage { watchlist, watched } => {
            let (watchlist, watched) = deduplicate_collections(watchlist, watched);
            Transition::transient(MovieState {
                watchlist,
                watched,
                ..state.clone()
            })
        }

        Action::ClearAllData => Transition::persisted(
            MovieState {
                watchlist: Vec::new(),
                watched: Vec::new(),
                ..state.clone()
            },
            PersistPlan {
                clear: true,
                ..PersistPlan::NONE
            },
        ),

        Action::ImportData { watchlist, watched } => {
            let (watchlist, watched) = deduplicate_collections(watchlist, watched);
            Transition::persisted(
                MovieState {
                    watchlist,
                    watched,
                    ..state.clone()
                },
                PersistPlan::BOTH,
            )
        }
    }
}
