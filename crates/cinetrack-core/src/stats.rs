use cinetrack_models::{MovieRecord, WatchedRecord};
use serde::Serialize;

/// Summary numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub watchlist_count: usize,
    pub watched_count: usize,
    pub total_movies: usize,
    /// Share of all tracked movies that were watched, 0 to 100
    pub completion_percent: f64,
    pub average_watchlist_rating: f64,
    pub average_watched_rating: f64,
    pub average_personal_rating: f64,
    pub rated_count: usize,
    pub highest_rated: Option<WatchedRecord>,
    pub favorite: Option<WatchedRecord>,
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

impl CollectionStats {
    pub fn compute(watchlist: &[MovieRecord], watched: &[WatchedRecord]) -> Self {
        let total_movies = watchlist.len() + watched.len();
        let completion_percent = if total_movies == 0 {
            0.0
        } else {
            watched.len() as f64 / total_movies as f64 * 100.0
        };

        // First of equals wins, so ties go to the most recently added record.
        let highest_rated = watched
            .iter()
            .filter(|record| record.movie.catalog_rating_value() > 0.0)
            .fold(None::<&WatchedRecord>, |best, record| match best {
                Some(current) if current.movie.catalog_rating_value() >= record.movie.catalog_rating_value() => {
                    Some(current)
                }
                _ => Some(record),
            })
            .cloned();

        let favorite = watched
            .iter()
            .filter(|record| record.personal_rating_value() > 0)
            .fold(None::<&WatchedRecord>, |best, record| match best {
                Some(current) if current.personal_rating_value() >= record.personal_rating_value() => Some(current),
                _ => Some(record),
            })
            .cloned();

        Self {
            watchlist_count: watchlist.len(),
            watched_count: watched.len(),
            total_movies,
            completion_percent,
            average_watchlist_rating: average(watchlist.iter().map(MovieRecord::catalog_rating_value)),
            average_watched_rating: average(watched.iter().map(|record| record.movie.catalog_rating_value())),
            average_personal_rating: average(watched.iter().map(|record| f64::from(record.personal_rating_value()))),
            rated_count: watched.iter().filter(|record| record.personal_rating.is_some()).count(),
            highest_rated,
            favorite,
        }
    }
}
