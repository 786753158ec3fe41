use chrono::{DateTime, Utc};
use cinetrack_models::{MovieRecord, PersonalRating, WatchedRecord};

use crate::store::state::ViewFilter;

/// Every state change the store understands
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetSearchResults(Vec<MovieRecord>),
    SetPopularMovies(Vec<MovieRecord>),
    SetSearchQuery(String),
    SetFilter(ViewFilter),
    AddToWatchlist(MovieRecord),
    RemoveFromWatchlist(String),
    /// `watched_at` is stamped by the store so the reducer stays pure
    AddToWatched {
        id: String,
        personal_rating: Option<PersonalRating>,
        watched_at: DateTime<Utc>,
    },
    RemoveFromWatched(String),
    MoveToWatchlist(String),
    UpdatePersonalRating {
        id: String,
        rating: PersonalRating,
    },
    LoadFromStorage {
        watchlist: Vec<MovieRecord>,
        watched: Vec<WatchedRecord>,
    },
    ClearAllData,
    ImportData {
        watchlist: Vec<MovieRecord>,
        watched: Vec<WatchedRecord>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLoading(_) => "set_loading",
            Action::SetError(_) => "set_error",
            Action::SetSearchResults(_) => "set_search_results",
            Action::SetPopularMovies(_) => "set_popular_movies",
            Action::SetSearchQuery(_) => "set_search_query",
            Action::SetFilter(_) => "set_filter",
            Action::AddToWatchlist(_) => "add_to_watchlist",
            Action::RemoveFromWatchlist(_) => "remove_from_watchlist",
            Action::AddToWatched { .. } => "add_to_watched",
            Action::RemoveFromWatched(_) => "remove_from_watched",
            Action::MoveToWatchlist(_) => "move_to_watchlist",
            Action::UpdatePersonalRating { .. } => "update_personal_rating",
            Action::LoadFromStorage { .. } => "load_from_storage",
            Action::ClearAllData => "clear_all_data",
            Action::ImportData { .. } => "import_data",
        }
    }
}
