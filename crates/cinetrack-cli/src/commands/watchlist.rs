use super::catalog::load_results;
use super::context::AppContext;
use super::tables;
use crate::output::Output;
use cinetrack_core::{watchlist_view, ViewFilter, WatchlistSort};
use color_eyre::Result;
use serde_json::json;

pub fn run_list(filter: ViewFilter, sort: WatchlistSort, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    ctx.store.set_filter(filter);

    let state = ctx.store.state();
    let movies = watchlist_view(&state.watchlist, state.active_filter, sort);

    if output.is_human() {
        if movies.is_empty() {
            output.info("Your watchlist is empty. Add movies with `cinetrack watchlist add <id>`.");
            return Ok(());
        }
        output.println(tables::movie_table(movies).to_string());
    } else {
        output.json(&json!({
            "filter": filter.as_str(),
            "sort": sort.to_string(),
            "movies": movies,
        }));
    }
    Ok(())
}

pub async fn run_add(id: &str, query: Option<&str>, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    add_movie(&mut ctx, id, query, output).await
}

async fn add_movie(ctx: &mut AppContext, id: &str, query: Option<&str>, output: &Output) -> Result<()> {
    if ctx.store.state().in_watchlist(id) {
        output.info(format!("{} is already in your watchlist", id));
        return Ok(());
    }
    if ctx.store.state().in_watched(id) {
        output.warn(format!("{} is already marked as watched", id));
        return Ok(());
    }

    load_results(ctx, id, query, output).await?;
    let movie = ctx
        .store
        .state()
        .find_movie(id)
        .cloned()
        .ok_or_else(|| color_eyre::eyre::eyre!("Movie {} not found. Try `cinetrack search <title>` to find its id.", id))?;

    if ctx.store.add_to_watchlist(movie.clone())? {
        output.success(format!("Added \"{}\" to your watchlist", movie.title));
    } else {
        output.warn(format!("\"{}\" was not added", movie.title));
    }
    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;

    if ctx.store.remove_from_watchlist(id)? {
        output.success(format!("Removed {} from your watchlist", id));
    } else {
        output.warn(format!("{} is not in your watchlist", id));
    }
    Ok(())
}
