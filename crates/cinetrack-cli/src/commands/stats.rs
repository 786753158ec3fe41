use super::context::AppContext;
use super::tables;
use crate::output::Output;
use cinetrack_core::{recent_activity, CollectionStats};
use color_eyre::Result;
use serde_json::json;

const RECENT_ACTIVITY_LIMIT: usize = 5;

pub fn run_stats(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let state = ctx.store.state();

    let stats = CollectionStats::compute(&state.watchlist, &state.watched);
    let recent = recent_activity(&state.watched, RECENT_ACTIVITY_LIMIT);

    if output.is_human() {
        output.println(tables::stats_table(&stats).to_string());
        if !recent.is_empty() {
            output.println("\nRecent activity");
            output.println(tables::watched_table(recent).to_string());
        }
    } else {
        output.json(&json!({ "stats": stats, "recentActivity": recent }));
    }
    Ok(())
}
