/// Asks the user before a destructive action. There is no undo.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub const IMPORT_PROMPT: &str = "This will replace your current data. Continue?";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear ALL data? This cannot be undone!";
