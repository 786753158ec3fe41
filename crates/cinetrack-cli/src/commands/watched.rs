use super::catalog::load_results;
use super::context::AppContext;
use super::tables;
use crate::output::Output;
use cinetrack_core::{watched_view, ViewFilter, WatchedSort};
use cinetrack_models::PersonalRating;
use color_eyre::Result;
use serde_json::json;

pub fn run_list(filter: ViewFilter, sort: WatchedSort, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    ctx.store.set_filter(filter);

    let state = ctx.store.state();
    let records = watched_view(&state.watched, state.active_filter, sort);

    if output.is_human() {
        if records.is_empty() {
            output.info("No watched movies yet. Mark one with `cinetrack watched add <id>`.");
            return Ok(());
        }
        output.println(tables::watched_table(records).to_string());
    } else {
        output.json(&json!({
            "filter": filter.as_str(),
            "sort": sort.to_string(),
            "movies": records,
        }));
    }
    Ok(())
}

pub async fn run_add(id: &str, rating: Option<PersonalRating>, query: Option<&str>, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    mark_watched(&mut ctx, id, rating, query, output).await
}

async fn mark_watched(
    ctx: &mut AppContext,
    id: &str,
    rating: Option<PersonalRating>,
    query: Option<&str>,
    output: &Output,
) -> Result<()> {
    if ctx.store.state().in_watched(id) {
        output.info(format!("{} is already marked as watched", id));
        return Ok(());
    }
    if !ctx.store.state().in_watchlist(id) {
        load_results(ctx, id, query, output).await?;
    }

    if !ctx.store.add_to_watched(id, rating)? {
        return Err(color_eyre::eyre::eyre!(
            "Movie {} not found in your watchlist or the current results. Try --query <title>.",
            id
        ));
    }

    let title = ctx
        .store
        .state()
        .find_watched(id)
        .map(|record| record.movie.title.clone())
        .unwrap_or_else(|| id.to_string());
    match rating {
        Some(rating) => output.success(format!("Marked \"{}\" as watched ({}/10)", title, rating)),
        None => output.success(format!("Marked \"{}\" as watched", title)),
    }
    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    if ctx.store.remove_from_watched(id)? {
        output.success(format!("Removed {} from your watched movies", id));
    } else {
        output.warn(format!("{} is not in your watched movies", id));
    }
    Ok(())
}

pub fn run_unwatch(id: &str, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    if ctx.store.move_to_watchlist(id)? {
        output.success(format!("Moved {} back to your watchlist", id));
    } else {
        output.warn(format!("{} is not in your watched movies", id));
    }
    Ok(())
}

pub fn run_rate(id: &str, rating: PersonalRating, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    if ctx.store.update_personal_rating(id, rating)? {
        output.success(format!("Rated {} {}/10", id, rating));
    } else {
        output.warn(format!("{} is not in your watched movies", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use cinetrack_config::PathManager;
    use cinetrack_core::Action;
    use cinetrack_models::normalize;

    #[tokio::test]
    async fn test_mark_watched_from_saved_results() {
        let dir = tempfile::tempdir().unwrap();
        let paths = || PathManager::from_base(dir.path().to_path_buf());
        let output = Output::new(OutputFormat::Json, true);

        let listed = normalize(&json!({ "title": "Nameless" }));
        let mut ctx = AppContext::load_from(paths()).unwrap();
        ctx.store.dispatch(Action::SetSearchResults(vec![listed.clone()])).unwrap();
        ctx.store.save_results().unwrap();

        let mut ctx = AppContext::load_from(paths()).unwrap();
        let rating = PersonalRating::new(8).unwrap();
        mark_watched(&mut ctx, &listed.id, Some(rating), None, &output).await.unwrap();

        let ctx = AppContext::load_from(paths()).unwrap();
        let record = ctx.store.state().find_watched(&listed.id).unwrap();
        assert_eq!(record.movie, listed);
        assert_eq!(record.personal_rating, Some(rating));
    }
}
