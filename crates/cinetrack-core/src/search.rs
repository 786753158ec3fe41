use cinetrack_models::{seed_movies, MovieRecord};
use std::collections::HashSet;

/// How many seed movies are suggested when nothing matches
pub const FALLBACK_SUGGESTIONS: usize = 4;
pub const SIMILAR_SUFFIX: &str = " (Similar)";

/// Title search over the latest popular list and the seed dataset.
///
/// The catalog has no search endpoint, so matching happens locally.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    seed: Vec<MovieRecord>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(seed_movies())
    }
}

impl SearchEngine {
    pub fn new(seed: Vec<MovieRecord>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> &[MovieRecord] {
        &self.seed
    }

    /// Resolve `query` against `popular` followed by the seed dataset.
    ///
    /// A blank query returns `popular` as-is. With no title match, the first
    /// seed movies come back marked as suggestions instead of an empty list.
    pub fn search(&self, query: &str, popular: &[MovieRecord]) -> Vec<MovieRecord> {
        let query = query.trim();
        if query.is_empty() {
            return popular.to_vec();
        }

        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        let matches: Vec<MovieRecord> = popular
            .iter()
            .chain(self.seed.iter())
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .filter(|movie| seen.insert(movie.id.clone()))
            .cloned()
            .collect();

        if matches.is_empty() {
            self.suggestions()
        } else {
            matches
        }
    }

    /// The deterministic "no exact match" result set
    pub fn suggestions(&self) -> Vec<MovieRecord> {
        self.seed
            .iter()
            .take(FALLBACK_SUGGESTIONS)
            .map(|movie| MovieRecord {
                title: format!("{}{}", movie.title, SIMILAR_SUFFIX),
                ..movie.clone()
            })
            .collect()
    }
}
