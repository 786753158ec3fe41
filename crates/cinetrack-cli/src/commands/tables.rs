use cinetrack_core::CollectionStats;
use cinetrack_models::{MovieRecord, WatchedRecord};
use comfy_table::{Attribute, Cell, Color, Table};

fn styled(mut table: Table) -> Table {
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(columns: &[&str]) -> Vec<Cell> {
    columns
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn rating_cell(rating: &str) -> Cell {
    match rating.parse::<f64>() {
        Ok(value) if value >= 8.0 => Cell::new(rating).fg(Color::Green),
        Ok(_) => Cell::new(rating),
        Err(_) => Cell::new(rating).fg(Color::DarkGrey),
    }
}

pub fn movie_table<'a>(movies: impl IntoIterator<Item = &'a MovieRecord>) -> Table {
    let mut table = styled(Table::new());
    table.set_header(header(&["ID", "Title", "Year", "Rating", "Genre"]));
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.id).fg(Color::Cyan),
            Cell::new(&movie.title),
            Cell::new(&movie.release_year),
            rating_cell(&movie.rating),
            Cell::new(movie.genre.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn watched_table<'a>(records: impl IntoIterator<Item = &'a WatchedRecord>) -> Table {
    let mut table = styled(Table::new());
    table.set_header(header(&["ID", "Title", "Year", "Rating", "My Rating", "Watched"]));
    for record in records {
        let personal = record
            .personal_rating
            .map(|rating| format!("{}/10", rating))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&record.movie.id).fg(Color::Cyan),
            Cell::new(&record.movie.title),
            Cell::new(&record.movie.release_year),
            rating_cell(&record.movie.rating),
            Cell::new(personal).fg(Color::Yellow),
            Cell::new(record.watched_date.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

fn describe(record: Option<&WatchedRecord>, value: impl Fn(&WatchedRecord) -> String) -> String {
    record
        .map(|record| format!("{} ({})", record.movie.title, value(record)))
        .unwrap_or_else(|| "-".to_string())
}

pub fn stats_table(stats: &CollectionStats) -> Table {
    let mut table = styled(Table::new());
    table.set_header(vec![Cell::new("Collection Statistics")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);

    let rows = [
        ("Watchlist", stats.watchlist_count.to_string()),
        ("Watched", stats.watched_count.to_string()),
        ("Total movies", stats.total_movies.to_string()),
        ("Completion", format!("{:.0}%", stats.completion_percent)),
        ("Avg. watchlist rating", format!("{:.1}", stats.average_watchlist_rating)),
        ("Avg. watched rating", format!("{:.1}", stats.average_watched_rating)),
        ("Avg. personal rating", format!("{:.1}", stats.average_personal_rating)),
        ("Rated by you", stats.rated_count.to_string()),
        (
            "Highest rated",
            describe(stats.highest_rated.as_ref(), |record| record.movie.rating.clone()),
        ),
        (
            "Favorite",
            describe(stats.favorite.as_ref(), |record| format!("{}/10", record.personal_rating_value())),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}
