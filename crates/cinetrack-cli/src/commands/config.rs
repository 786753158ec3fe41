use super::prompts;
use super::spinner::is_interactive;
use crate::output::Output;
use cinetrack_config::{Config, CredentialStore, PathManager, API_KEY_ENV_VAR};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Catalog {
            api_key,
            api_host,
            endpoint,
            enable,
            disable,
        } => configure_catalog(api_key, api_host, endpoint, enable, disable, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load().map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e)
    })?;
    Ok(cred_store)
}

fn section(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let cred_store = load_credentials(&path_manager)?;

    let api_key = cred_store.resolve_catalog_api_key().unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { mask_string(&api_key) };
    let key_source = if std::env::var(API_KEY_ENV_VAR).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        API_KEY_ENV_VAR.to_string()
    } else {
        path_manager.credentials_file().display().to_string()
    };
    let storage_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| path_manager.storage_dir());

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            if !config_file.exists() {
                println!("{}", "(no config file yet, showing defaults)".dimmed());
            }
            println!();

            let files = section(
                "Files",
                vec![
                    ("Config file", config_file.display().to_string()),
                    ("Storage", storage_dir.display().to_string()),
                    ("Logs", path_manager.log_file().display().to_string()),
                ],
            );
            println!("{}\n", files);

            let catalog = section(
                "Catalog",
                vec![
                    ("Enabled", config.catalog.enabled.to_string()),
                    ("Endpoint", config.catalog.popular_url()),
                    ("API host", config.catalog.api_host.clone()),
                    ("API key", api_key_display),
                    ("API key source", key_source),
                    ("Timeout", format!("{}s", config.catalog.timeout_secs)),
                    ("Max results", config.catalog.max_results.to_string()),
                ],
            );
            println!("{}\n", catalog);

            let storage = section("Storage", vec![("Namespace", config.storage.namespace.clone())]);
            println!("{}", storage);
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "catalog": {
                    "enabled": config.catalog.enabled,
                    "endpoint": config.catalog.popular_url(),
                    "api_host": config.catalog.api_host,
                    "api_key": api_key_display,
                    "timeout_secs": config.catalog.timeout_secs,
                    "max_results": config.catalog.max_results,
                },
                "storage": {
                    "namespace": config.storage.namespace,
                    "dir": storage_dir.display().to_string(),
                },
            }));
        }
    }

    Ok(())
}

fn configure_catalog(
    api_key_arg: Option<String>,
    api_host: Option<String>,
    endpoint: Option<String>,
    enable: bool,
    disable: bool,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let nothing_given = api_key_arg.is_none() && api_host.is_none() && endpoint.is_none() && !enable && !disable;

    if let Some(endpoint) = endpoint {
        let (base_url, popular_path) = split_endpoint(&endpoint).ok_or_else(|| {
            color_eyre::eyre::eyre!("Invalid endpoint '{}'. Expected a full URL such as https://host/path", endpoint)
        })?;
        config.catalog.base_url = base_url;
        config.catalog.popular_path = popular_path;
    }
    if let Some(api_host) = api_host {
        config.catalog.api_host = api_host;
    }
    if enable {
        config.catalog.enabled = true;
    }
    if disable {
        config.catalog.enabled = false;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid catalog configuration: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    let api_key = match api_key_arg {
        Some(key) => Some(key),
        None if nothing_given && is_interactive() => {
            let key = prompts::prompt_password("RapidAPI key (leave empty to keep the current one)")?;
            Some(key).filter(|key| !key.trim().is_empty())
        }
        None => None,
    };

    if let Some(api_key) = api_key {
        let mut cred_store = load_credentials(&path_manager)?;
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            cred_store.remove_catalog_api_key();
            output.info("Removed the stored API key");
        } else {
            cred_store.set_catalog_api_key(api_key);
        }
        cred_store.save().map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to save credentials to {}: {}",
                path_manager.credentials_file().display(),
                e
            )
        })?;
    }

    output.success("Catalog settings saved!");
    output.println(format!("  Enabled: {}", config.catalog.enabled));
    output.println(format!("  Endpoint: {}", config.catalog.popular_url()));
    output.println(format!("  API host: {}", config.catalog.api_host));

    Ok(())
}

/// `https://host/api/path` into `("https://host", "/api/path")`
fn split_endpoint(endpoint: &str) -> Option<(String, String)> {
    let endpoint = endpoint.trim();
    let scheme_end = endpoint.find("://")? + 3;
    let path_start = scheme_end + endpoint[scheme_end..].find('/')?;
    let (base, path) = endpoint.split_at(path_start);
    if base.len() == scheme_end || path.len() <= 1 {
        return None;
    }
    Some((base.to_string(), path.to_string()))
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
