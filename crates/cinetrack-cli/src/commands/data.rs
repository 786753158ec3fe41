use super::context::AppContext;
use super::prompts::TerminalConfirmation;
use crate::output::Output;
use chrono::Utc;
use cinetrack_core::{default_backup_file_name, parse_snapshot, AssumeYes};
use color_eyre::eyre::Context;
use color_eyre::Result;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run_export(file: Option<PathBuf>, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let snapshot = ctx.store.export_snapshot();
    let path = file.unwrap_or_else(|| PathBuf::from(default_backup_file_name(Utc::now().date_naive())));

    let text = snapshot.to_json_pretty().wrap_err("Failed to serialize backup")?;
    fs::write(&path, text).wrap_err_with(|| format!("Failed to write backup to {}", path.display()))?;
    info!(operation = "export", file = %path.display(), movies = snapshot.movie_count(), "Exported collections");

    if output.is_human() {
        output.success(format!("Exported {} movies to {}", snapshot.movie_count(), path.display()));
    } else {
        output.json(&json!({
            "type": "success",
            "file": path.display().to_string(),
            "totalMovies": snapshot.movie_count(),
        }));
    }
    Ok(())
}

pub fn run_import(file: &Path, yes: bool, output: &Output) -> Result<()> {
    let text = fs::read_to_string(file).wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let snapshot = parse_snapshot(&text).wrap_err_with(|| format!("Error importing data from {}", file.display()))?;

    let mut ctx = AppContext::load()?;
    let imported = if yes {
        ctx.store.import(snapshot, &AssumeYes)?
    } else {
        ctx.store.import(snapshot, &TerminalConfirmation::new(output))?
    };

    if imported {
        let state = ctx.store.state();
        output.success(format!(
            "Data imported successfully! ({} in watchlist, {} watched)",
            state.watchlist.len(),
            state.watched.len()
        ));
    } else {
        output.info("Import cancelled");
    }
    Ok(())
}

pub fn run_clear(yes: bool, output: &Output) -> Result<()> {
    let mut ctx = AppContext::load()?;
    let cleared = if yes {
        ctx.store.clear_all_data(&AssumeYes)?
    } else {
        ctx.store.clear_all_data(&TerminalConfirmation::new(output))?
    };

    if cleared {
        output.success("All data cleared");
    } else {
        output.info("Clear cancelled");
    }
    Ok(())
}
