use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the catalog uses when a movie has no rating
pub const RATING_NOT_AVAILABLE: &str = "N/A";

/// A movie as produced by the catalog or the search engine.
///
/// Field names follow the persisted JSON format (`releaseYear`, ...), so the same
/// shape is used for the durable store and for backup snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub release_year: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_rating", deserialize_with = "string_or_number")]
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

fn default_rating() -> String {
    RATING_NOT_AVAILABLE.to_string()
}

/// Accepts `"1994"`, `1994` or `null`; the catalog is not consistent about it.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(text)) => text,
        Some(Loose::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

impl MovieRecord {
    /// Catalog rating as a number; `N/A` and unparsable values count as 0
    pub fn catalog_rating_value(&self) -> f64 {
        if self.rating == RATING_NOT_AVAILABLE {
            return 0.0;
        }
        self.rating.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Release year as a number for sorting; 0 when the year is not numeric
    pub fn release_year_value(&self) -> i32 {
        self.release_year.trim().parse::<i32>().unwrap_or(0)
    }

    pub fn has_catalog_rating(&self) -> bool {
        self.rating != RATING_NOT_AVAILABLE
    }
}

/// Anything that wraps a movie record: the watchlist holds bare records, the
/// watched collection holds [`crate::WatchedRecord`]s.
pub trait MovieEntry {
    fn movie(&self) -> &MovieRecord;

    fn movie_id(&self) -> &str {
        &self.movie().id
    }
}

impl MovieEntry for MovieRecord {
    fn movie(&self) -> &MovieRecord {
        self
    }
}
