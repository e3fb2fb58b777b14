use anyhow::Result;
use chrono::Local;
use omniagent_types::{Message, TeamMode};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::get_logs_dir;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    message_id: &'a str,
    role: &'a str,
    content: &'a str,
    agent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_mode: Option<&'a str>,
}

/// Append-only JSONL transcript of a chat session
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<File>,
}

impl ConversationLogger {
    /// Create a new logger; the file name is based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        Self::open(workspace, None).await
    }

    /// Like [`ConversationLogger::new`], with `label` appended to the file name
    /// so concurrent sessions never share a transcript.
    pub async fn with_label(workspace: &Path, label: &str) -> Result<Self> {
        Self::open(workspace, Some(label)).await
    }

    async fn open(workspace: &Path, label: Option<&str>) -> Result<Self> {
        let logs_dir = get_logs_dir(workspace)?;

        let stamp = Local::now().format("%Y-%m-%d-%H%M%S%.3f");
        let filename = match label {
            Some(label) => format!("omni-{}-{}.jsonl", stamp, label),
            None => format!("omni-{}.jsonl", stamp),
        };
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append one message. Write errors are reported but never propagated.
    pub async fn log(&mut self, message: &Message, agent: &str, team_mode: Option<TeamMode>) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            message_id: &message.id,
            role: message.role.as_str(),
            content: &message.content,
            agent,
            team_mode: team_mode.map(|m| m.as_str()),
        };

        let Some(file) = &mut self.file else {
            return;
        };
        let Ok(json) = serde_json::to_string(&entry) else {
            return;
        };
        if let Err(e) = file.write_all(json.as_bytes()).await {
            eprintln!("[Logging error] {}", e);
        } else if let Err(e) = file.write_all(b"\n").await {
            eprintln!("[Logging error] {}", e);
        } else {
            let _ = file.flush().await;
        }
    }

    /// Close the logger. Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}
