use cinetrack_models::{MovieRecord, WatchedRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// View filter selected by the user. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewFilter {
    #[default]
    All,
    /// Watchlist: catalog rating of 8 or more
    HighRated,
    /// Watchlist: newest ids first
    Recent,
    /// Watched: personal rating of 8 or more
    Rated,
    /// Watched: most recently watched first
    RecentWatched,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter `{0}` (expected all, high-rated, recent, rated or recent-watched)")]
pub struct UnknownFilter(pub String);

impl ViewFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewFilter::All => "all",
            ViewFilter::HighRated => "high-rated",
            ViewFilter::Recent => "recent",
            ViewFilter::Rated => "rated",
            ViewFilter::RecentWatched => "recent-watched",
        }
    }
}

impl FromStr for ViewFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ViewFilter::All),
            "high-rated" | "high_rated" => Ok(ViewFilter::HighRated),
            "recent" => Ok(ViewFilter::Recent),
            "rated" => Ok(ViewFilter::Rated),
            "recent-watched" | "recent_watched" => Ok(ViewFilter::RecentWatched),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the store knows. `watchlist` and `watched` are persisted, the
/// rest lives only as long as the process.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieState {
    pub watchlist: Vec<MovieRecord>,
    pub watched: Vec<WatchedRecord>,
    pub search_results: Vec<MovieRecord>,
    pub popular_movies: Vec<MovieRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub active_filter: ViewFilter,
}

impl MovieState {
    pub fn in_watchlist(&self, id: &str) -> bool {
        self.watchlist.iter().any(|movie| movie.id == id)
    }

    pub fn in_watched(&self, id: &str) -> bool {
        self.watched.iter().any(|record| record.movie.id == id)
    }

    pub fn find_watched(&self, id: &str) -> Option<&WatchedRecord> {
        self.watched.iter().find(|record| record.movie.id == id)
    }

    /// Look an id up wherever a record for it is currently held
    pub fn find_movie(&self, id: &str) -> Option<&MovieRecord> {
        self.watchlist
            .iter()
            .chain(self.search_results.iter())
            .chain(self.popular_movies.iter())
            .find(|movie| movie.id == id)
            .or_else(|| self.find_watched(id).map(|record| &record.movie))
    }

    pub fn total_movies(&self) -> usize {
        self.watchlist.len() + self.watched.len()
    }
}
