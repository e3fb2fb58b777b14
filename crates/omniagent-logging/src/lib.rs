// Logging module - conversation transcripts and request debugging
pub mod conversation_logger;
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use conversation_logger::ConversationLogger;

pub use request_logger::{log_failure, log_request, log_response};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the logs directory (<work_dir>/logs)
pub fn get_logs_dir(work_dir: &Path) -> Result<PathBuf> {
    let logs_dir = work_dir.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;
    }

    Ok(logs_dir)
}
