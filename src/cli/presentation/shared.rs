//! Formatting helpers shared by several command families.

use crate::error::ApiError;
use crate::job::JobStatus;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Coloured status word for terminal tables.
pub fn status_label(status: JobStatus) -> String {
    match status {
        JobStatus::Done => status.as_str().green().to_string(),
        JobStatus::Error => status.as_str().red().to_string(),
        JobStatus::Generating => status.as_str().yellow().to_string(),
        JobStatus::Idle => status.as_str().dimmed().to_string(),
    }
}

pub(super) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ProviderError(format!("Failed to render JSON: {}", e)))
}

/// Shorten `text` to at most `max` characters, marking the cut.
pub(super) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
