use cinetrack_models::{MovieEntry, MovieRecord, WatchedRecord};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::store::ViewFilter;

/// Ratings at or above this count as "high"
pub const HIGH_RATING_THRESHOLD: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchlistSort {
    /// Stored order, newest addition first
    #[default]
    Added,
    Rating,
    Year,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedSort {
    #[default]
    Recent,
    PersonalRating,
    Rating,
    Year,
    Title,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order `{0}`")]
pub struct UnknownSort(pub String);

impl FromStr for WatchlistSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(WatchlistSort::Added),
            "rating" => Ok(WatchlistSort::Rating),
            "year" => Ok(WatchlistSort::Year),
            "title" => Ok(WatchlistSort::Title),
            _ => Err(UnknownSort(s.to_string())),
        }
    }
}

impl FromStr for WatchedSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(WatchedSort::Recent),
            "personal-rating" | "personal_rating" => Ok(WatchedSort::PersonalRating),
            "rating" => Ok(WatchedSort::Rating),
            "year" => Ok(WatchedSort::Year),
            "title" => Ok(WatchedSort::Title),
            _ => Err(UnknownSort(s.to_string())),
        }
    }
}

impl fmt::Display for WatchlistSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WatchlistSort::Added => "added",
            WatchlistSort::Rating => "rating",
            WatchlistSort::Year => "year",
            WatchlistSort::Title => "title",
        })
    }
}

impl fmt::Display for WatchedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WatchedSort::Recent => "recent",
            WatchedSort::PersonalRating => "personal-rating",
            WatchedSort::Rating => "rating",
            WatchedSort::Year => "year",
            WatchedSort::Title => "title",
        })
    }
}

fn by_catalog_rating_desc(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    b.catalog_rating_value().total_cmp(&a.catalog_rating_value())
}

fn by_year_desc(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    b.release_year_value().cmp(&a.release_year_value())
}

fn by_title(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

fn sort_movies<T: MovieEntry>(items: &mut [&T], compare: fn(&MovieRecord, &MovieRecord) -> Ordering) {
    items.sort_by(|a, b| compare(a.movie(), b.movie()));
}

/// Filtered and sorted watchlist. Watched-only filters show everything.
pub fn watchlist_view(watchlist: &[MovieRecord], filter: ViewFilter, sort: WatchlistSort) -> Vec<&MovieRecord> {
    let mut items: Vec<&MovieRecord> = match filter {
        ViewFilter::HighRated => watchlist
            .iter()
            .filter(|movie| movie.has_catalog_rating() && movie.catalog_rating_value() >= HIGH_RATING_THRESHOLD)
            .collect(),
        _ => watchlist.iter().collect(),
    };

    if filter == ViewFilter::Recent {
        items.sort_by(|a, b| b.id.cmp(&a.id));
    }

    match sort {
        WatchlistSort::Added => {}
        WatchlistSort::Rating => sort_movies(&mut items, by_catalog_rating_desc),
        WatchlistSort::Year => sort_movies(&mut items, by_year_desc),
        WatchlistSort::Title => sort_movies(&mut items, by_title),
    }
    items
}

/// Filtered and sorted watched list. Watchlist-only filters show everything.
pub fn watched_view(watched: &[WatchedRecord], filter: ViewFilter, sort: WatchedSort) -> Vec<&WatchedRecord> {
    let mut items: Vec<&WatchedRecord> = match filter {
        ViewFilter::Rated => watched
            .iter()
            .filter(|record| f64::from(record.personal_rating_value()) >= HIGH_RATING_THRESHOLD)
            .collect(),
        _ => watched.iter().collect(),
    };

    if filter == ViewFilter::RecentWatched {
        items.sort_by(|a, b| b.watched_date.cmp(&a.watched_date));
    }

    match sort {
        WatchedSort::Recent => items.sort_by(|a, b| b.watched_date.cmp(&a.watched_date)),
        WatchedSort::PersonalRating => {
            items.sort_by(|a, b| b.personal_rating_value().cmp(&a.personal_rating_value()))
        }
        WatchedSort::Rating => sort_movies(&mut items, by_catalog_rating_desc),
        WatchedSort::Year => sort_movies(&mut items, by_year_desc),
        WatchedSort::Title => sort_movies(&mut items, by_title),
    }
    items
}

/// Up to `limit` most recently watched movies
pub fn recent_activity(watched: &[WatchedRecord], limit: usize) -> Vec<&WatchedRecord> {
    let mut items: Vec<&WatchedRecord> = watched.iter().collect();
    items.sort_by(|a, b| b.watched_date.cmp(&a.watched_date));
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use cinetrack_models::PersonalRating;

    fn movie(id: &str, title: &str, year: &str, rating: &str) -> MovieRecord {
        MovieRecord {
            id: id.to_string(),
            title: title.to_string(),
            release_year: year.to_string(),
            image: None,
            rating: rating.to_string(),
            description: None,
            genre: None,
        }
    }

    fn watchlist() -> Vec<MovieRecord> {
        vec![
            movie("tt2", "beta", "2001", "8.5"),
            movie("tt3", "Alpha", "1999", "N/A"),
            movie("tt1", "Gamma", "2010", "7.0"),
        ]
    }

    fn watched() -> Vec<WatchedRecord> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rating = |n| Some(PersonalRating::new(n).unwrap());
        vec![
            WatchedRecord::new(movie("tt5", "Older", "1980", "9.1"), base, rating(9)),
            WatchedRecord::new(movie("tt6", "Newest", "2020", "6.0"), base + Duration::days(2), None),
            WatchedRecord::new(movie("tt7", "Middle", "2000", "7.7"), base + Duration::days(1), rating(7)),
        ]
    }

    fn ids<'a, T: MovieEntry>(items: &[&'a T]) -> Vec<&'a str> {
        items.iter().map(|item| item.movie_id()).collect()
    }

    #[test]
    fn test_watchlist_added_order_is_stored_order() {
        let list = watchlist();
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::All, WatchlistSort::Added)), vec!["tt2", "tt3", "tt1"]);
    }

    #[test]
    fn test_watchlist_high_rated_excludes_not_available() {
        let list = watchlist();
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::HighRated, WatchlistSort::Added)), vec!["tt2"]);
    }

    #[test]
    fn test_watchlist_sorts() {
        let list = watchlist();
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::All, WatchlistSort::Rating)), vec!["tt2", "tt1", "tt3"]);
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::All, WatchlistSort::Year)), vec!["tt1", "tt2", "tt3"]);
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::All, WatchlistSort::Title)), vec!["tt3", "tt2", "tt1"]);
        assert_eq!(ids(&watchlist_view(&list, ViewFilter::Recent, WatchlistSort::Added)), vec!["tt3", "tt2", "tt1"]);
    }

    #[test]
    fn test_watched_default_is_most_recent_first() {
        let list = watched();
        assert_eq!(ids(&watched_view(&list, ViewFilter::All, WatchedSort::Recent)), vec!["tt6", "tt7", "tt5"]);
    }

    #[test]
    fn test_watched_rated_filter_and_sorts() {
        let list = watched();
        assert_eq!(ids(&watched_view(&list, ViewFilter::Rated, WatchedSort::Recent)), vec!["tt5"]);
        assert_eq!(
            ids(&watched_view(&list, ViewFilter::All, WatchedSort::PersonalRating)),
            vec!["tt5", "tt7", "tt6"]
        );
        assert_eq!(ids(&watched_view(&list, ViewFilter::All, WatchedSort::Year)), vec!["tt6", "tt7", "tt5"]);
    }

    #[test]
    fn test_recent_activity_limit() {
        let list = watched();
        assert_eq!(ids(&recent_activity(&list, 2)), vec!["tt6", "tt7"]);
        assert!(recent_activity(&[], 5).is_empty());
    }

    #[test]
    fn test_sort_names_parse() {
        assert_eq!("personal-rating".parse::<WatchedSort>(), Ok(WatchedSort::PersonalRating));
        assert_eq!("TITLE".parse::<WatchlistSort>(), Ok(WatchlistSort::Title));
        assert!("random".parse::<WatchlistSort>().is_err());
    }
}
