use cinetrack_models::{normalize, MovieRecord};
use serde_json::Value;
use tracing::debug;

use crate::error::CatalogError;

/// Pull the raw movie list out of a popular-movies response.
///
/// The endpoint has answered both with a bare array and with `{ "movies": [...] }`.
fn raw_movies(body: &Value) -> Result<&[Value], CatalogError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("movies") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(CatalogError::Format("`movies` is not an array".to_string())),
            None => Err(CatalogError::Format("object without a `movies` field".to_string())),
        },
        other => Err(CatalogError::Format(format!("expected array or object, got {}", json_kind(other)))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize the first `max_results` entries of a response body
pub fn parse_popular(body: &Value, max_results: usize) -> Result<Vec<MovieRecord>, CatalogError> {
    let items = raw_movies(body)?;
    debug!("Catalog returned {} raw movies, keeping at most {}", items.len(), max_results);

    let movies: Vec<MovieRecord> = items.iter().take(max_results).map(normalize).collect();
    if movies.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(movies)
}
