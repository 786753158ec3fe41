use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::movie::{MovieEntry, MovieRecord};

/// A user's own score for a watched movie, 1 to 10 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PersonalRating(u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("personal rating must be between 1 and 10, got {0}")]
pub struct InvalidPersonalRating(pub u8);

impl PersonalRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, InvalidPersonalRating> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidPersonalRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PersonalRating {
    type Error = InvalidPersonalRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonalRating> for u8 {
    fn from(rating: PersonalRating) -> Self {
        rating.0
    }
}

impl fmt::Display for PersonalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie the user has finished.
///
/// Serialized flat: the movie fields plus `watchedDate` and `personalRating`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedRecord {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub watched_date: DateTime<Utc>,
    #[serde(default)]
    pub personal_rating: Option<PersonalRating>,
}

impl WatchedRecord {
    pub fn new(movie: MovieRecord, watched_date: DateTime<Utc>, personal_rating: Option<PersonalRating>) -> Self {
        Self {
            movie,
            watched_date,
            personal_rating,
        }
    }

    /// Drop the watched-only fields, leaving the plain movie record
    pub fn into_movie(self) -> MovieRecord {
        self.movie
    }

    pub fn personal_rating_value(&self) -> u8 {
        self.personal_rating.map(PersonalRating::value).unwrap_or(0)
    }
}

impl MovieEntry for WatchedRecord {
    fn movie(&self) -> &MovieRecord {
        &self.movie
    }
}
