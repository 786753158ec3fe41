use serde_json::Value;
use uuid::Uuid;

use crate::movie::MovieRecord;

pub const DEFAULT_TITLE: &str = "Unknown Title";
pub const DEFAULT_RATING: &str = "7.5";
pub const DEFAULT_RELEASE_YEAR: &str = "2023";
pub const DEFAULT_DESCRIPTION: &str = "Popular movie from IMDb";
pub const DEFAULT_GENRE: &str = "Various";

/// Pseudo-unique id for catalog entries that arrive without one: `tt` plus nine
/// lowercase alphanumerics.
pub fn generate_movie_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("tt{}", &suffix[..9])
}

/// Build a [`MovieRecord`] from a loosely-typed catalog object.
///
/// Missing, `null`, empty and zero values all count as absent and receive a
/// default. The raw catalog calls the year `year`; an already-normalized record
/// calls it `releaseYear`, and both are accepted so that normalizing twice is a
/// no-op. Anything that is not an object normalizes to an all-defaults record.
pub fn normalize(raw: &Value) -> MovieRecord {
    let field = |name: &str| present_text(raw.get(name));

    MovieRecord {
        id: field("id").unwrap_or_else(generate_movie_id),
        title: field("title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        release_year: field("year")
            .or_else(|| field("releaseYear"))
            .unwrap_or_else(|| DEFAULT_RELEASE_YEAR.to_string()),
        image: field("image"),
        rating: field("rating").unwrap_or_else(|| DEFAULT_RATING.to_string()),
        description: Some(field("description").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())),
        genre: Some(field("genre").unwrap_or_else(|| DEFAULT_GENRE.to_string())),
    }
}

fn present_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

fn or_default(value: String, default: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        default()
    } else {
        value
    }
}

impl MovieRecord {
    /// Typed counterpart of [`normalize`]: fills empty fields with the same defaults
    pub fn normalized(self) -> Self {
        let non_empty = |value: Option<String>| value.filter(|text| !text.is_empty());

        Self {
            id: or_default(self.id, generate_movie_id),
            title: or_default(self.title, || DEFAULT_TITLE.to_string()),
            release_year: or_default(self.release_year, || DEFAULT_RELEASE_YEAR.to_string()),
            image: non_empty(self.image),
            rating: or_default(self.rating, || DEFAULT_RATING.to_string()),
            description: Some(non_empty(self.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())),
            genre: Some(non_empty(self.genre).unwrap_or_else(|| DEFAULT_GENRE.to_string())),
        }
    }
}
