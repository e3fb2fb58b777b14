use omniagent_types::AgentId;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::agent::{Agent, Route};

#[derive(Debug, Error)]
pub enum AgentsFileError {
    #[error("failed to read agents file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse agents file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid agent '{id}': {reason}")]
    Invalid { id: String, reason: String },
}

/// Extra agents declared in a TOML file
///
/// ```toml
/// [[agents]]
/// id = "helper"
/// name = "Helper Agent"
/// description = "Answers locally"
/// simulated = true
///
/// [[agents]]
/// id = "docs"
/// name = "Docs Agent"
/// path = "/docs/ask"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentsFile {
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub simulated: bool,
}

impl AgentEntry {
    pub fn validate(&self) -> Result<(), AgentsFileError> {
        let invalid = |reason: &str| AgentsFileError::Invalid {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if AgentId::from_str(&self.id).is_builtin() {
            return Err(invalid("built-in agents cannot be redefined"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        match (&self.path, self.simulated) {
            (Some(_), true) => Err(invalid("set either path or simulated, not both")),
            (None, false) => Err(invalid("one of path or simulated is required")),
            (Some(path), false) if !path.starts_with('/') => {
                Err(invalid("path must start with '/'"))
            }
            _ => Ok(()),
        }
    }

    pub fn to_agent(&self) -> Agent {
        let route = match &self.path {
            Some(path) => Route::remote(path.clone()),
            None => Route::Simulated,
        };
        Agent::new(
            AgentId::from_str(&self.id),
            self.name.clone(),
            self.description.clone(),
            route,
        )
    }
}

impl AgentsFile {
    pub fn parse(content: &str) -> Result<Self, AgentsFileError> {
        let file: AgentsFile = toml::from_str(content)?;
        for entry in &file.agents {
            entry.validate()?;
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, AgentsFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| AgentsFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }
}
