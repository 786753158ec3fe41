use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while the catalog is fetched. Nothing is drawn when not on a
/// terminal or when the output is not meant for humans.
pub struct FetchSpinner {
    bar: Option<ProgressBar>,
}

impl FetchSpinner {
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled || !is_interactive() {
            tracing::info!(operation = "progress", status = message, "Progress update");
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
