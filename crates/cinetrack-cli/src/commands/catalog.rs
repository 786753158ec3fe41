use super::context::AppContext;
use super::spinner::FetchSpinner;
use super::tables;
use crate::output::Output;
use cinetrack_core::search::SIMILAR_SUFFIX;
use cinetrack_models::MovieRecord;
use color_eyre::eyre::Context;
use color_eyre::Result;
use serde_json::json;
use tracing::debug;

/// Load popular movies into the store, warning when demo data stands in
pub async fn refresh(ctx: &mut AppContext, output: &Output) -> Result<()> {
    let catalog = ctx.catalog()?;
    let spinner = FetchSpinner::start(
        &format!("Fetching popular movies ({})...", catalog.source_name()),
        output.is_human() && !output.is_quiet(),
    );
    let advisory = ctx.store.refresh_popular(catalog.as_ref()).await;
    spinner.finish();

    if let Some(advisory) = advisory {
        output.warn(advisory);
    }
    Ok(())
}

/// Persist the listed movies. Catalog items without an id get a fresh one on
/// every fetch, so later commands resolve ids against this saved list first.
fn remember_results(ctx: &mut AppContext) -> Result<()> {
    ctx.store.save_results().wrap_err("Failed to save the listed movies")
}

/// Make `id` resolvable from the current results.
///
/// The results listed by the previous `popular` or `search` are tried first;
/// the catalog is only fetched when they don't hold `id`, or when a new
/// `query` is given.
pub async fn load_results(ctx: &mut AppContext, id: &str, query: Option<&str>, output: &Output) -> Result<()> {
    if query.is_none() && ctx.store.restore_results() && ctx.store.state().find_movie(id).is_some() {
        debug!(id, "Resolved movie from saved results");
        return Ok(());
    }

    refresh(ctx, output).await?;
    if let Some(query) = query {
        ctx.store.search(query);
    }
    Ok(())
}

fn print_movies(movies: &[MovieRecord], output: &Output) {
    if output.is_human() {
        output.println(tables::movie_table(movies).to_string());
    } else {
        output.json(&json!({ "movies": movies }));
    }
}

pub async fn run_popular(output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    refresh(&mut ctx, output).await?;
    remember_results(&mut ctx)?;

    let movies = ctx.store.state().search_results.clone();
    print_movies(&movies, output);
    Ok(())
}

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    refresh(&mut ctx, output).await?;

    let movies = ctx.store.search(query).to_vec();
    remember_results(&mut ctx)?;
    if !query.trim().is_empty() && movies.iter().all(|movie| movie.title.ends_with(SIMILAR_SUFFIX)) {
        output.info(format!("No titles match \"{}\". You might like:", query.trim()));
    }
    print_movies(&movies, output);
    Ok(())
}
