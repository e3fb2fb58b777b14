//! Core types for omniagent
//!
//! This crate provides the foundational types shared by every omniagent crate:
//! chat messages, agent identifiers and team modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Model identifier sent with every remote request
pub const DEFAULT_MODEL_ID: &str = "o3-mini";

/// Base host serving the agent endpoints
pub const DEFAULT_BASE_URL: &str = "https://agnoagentapi-94777822355.europe-west2.run.app";

/// Delay before a simulated agent answers, in milliseconds
pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 1500;

// ============================================================================
// Agent Identifiers
// ============================================================================

/// Agents known to the system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentId {
    Quality,
    Flkh,
    Omni,
    Custom(String),
}

impl AgentId {
    pub fn as_str(&self) -> &str {
        match self {
            AgentId::Quality => "quality",
            AgentId::Flkh => "flkh",
            AgentId::Omni => "omni",
            AgentId::Custom(id) => id,
        }
    }

    /// Parse an id, ignoring surrounding whitespace and case
    pub fn from_str(s: &str) -> Self {
        let id = s.trim().to_lowercase();
        match id.as_str() {
            "quality" => AgentId::Quality,
            "flkh" => AgentId::Flkh,
            "omni" => AgentId::Omni,
            _ => AgentId::Custom(id),
        }
    }

    /// Whether this id names one of the agents that ship with the binary
    pub fn is_builtin(&self) -> bool {
        !matches!(self, AgentId::Custom(_))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId::from_str(&s)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.as_str().to_string()
    }
}

// ============================================================================
// Team Mode
// ============================================================================

/// How the team endpoint coordinates its sub-agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamMode {
    #[default]
    Collaborate,
    Coordinate,
    Route,
}

impl TeamMode {
    pub const ALL: [TeamMode; 3] = [TeamMode::Collaborate, TeamMode::Coordinate, TeamMode::Route];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamMode::Collaborate => "collaborate",
            TeamMode::Coordinate => "coordinate",
            TeamMode::Route => "route",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "collaborate" => Some(TeamMode::Collaborate),
            "coordinate" => Some(TeamMode::Coordinate),
            "route" => Some(TeamMode::Route),
            _ => None,
        }
    }
}

impl fmt::Display for TeamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message. Messages are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
