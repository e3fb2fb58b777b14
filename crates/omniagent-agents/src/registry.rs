use omniagent_types::AgentId;
use thiserror::Error;

use crate::agent::{Agent, Route};
use crate::agents_file::AgentsFile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown agent: {0}")]
    UnknownAgent(String),
    #[error("agent '{0}' is already registered")]
    Duplicate(String),
}

/// Read-only table of agents, built once at startup
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    /// The three agents that always exist
    pub fn builtin() -> Self {
        Self {
            agents: vec![
                Agent::new(
                    AgentId::Quality,
                    "Quality Agent",
                    "Specialized in providing high-quality, well-researched responses with attention to detail.",
                    Route::remote("/quality/ask"),
                ),
                Agent::new(
                    AgentId::Flkh,
                    "FLKH Agent",
                    "Focused on fast, efficient responses with specialized knowledge in technical domains.",
                    Route::remote("/safety/ask"),
                ),
                Agent::new(
                    AgentId::Omni,
                    "Omni Agent",
                    "Coordinates with multiple specialized agents to provide comprehensive responses to complex queries.",
                    Route::team("/team/ask"),
                ),
            ],
        }
    }

    /// Built-in agents followed by the entries of an agents file
    pub fn with_extras(file: &AgentsFile) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin();
        for entry in &file.agents {
            registry.register(entry.to_agent())?;
        }
        Ok(registry)
    }

    fn register(&mut self, agent: Agent) -> Result<(), RegistryError> {
        if self.agents.iter().any(|a| a.id == agent.id) {
            return Err(RegistryError::Duplicate(agent.id.to_string()));
        }
        self.agents.push(agent);
        Ok(())
    }

    pub fn lookup(&self, id: &AgentId) -> Result<&Agent, RegistryError> {
        self.agents
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| RegistryError::UnknownAgent(id.to_string()))
    }

    pub fn lookup_str(&self, id: &str) -> Result<&Agent, RegistryError> {
        self.lookup(&AgentId::from_str(id))
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
