use omniagent_agents::{Agent, AgentRegistry, FailurePolicy, RegistryError, Route};
use omniagent_logging::log_failure;
use omniagent_types::{AgentId, TeamMode, DEFAULT_BASE_URL, DEFAULT_MODEL_ID, DEFAULT_SIMULATED_DELAY_MS};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::fallback::{simulated_reply, team_fallback, ERROR_NOTICE};
use crate::normalizer::normalize_response;
use crate::transport::{Transport, TransportError};

/// Body POSTed to every agent endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest {
    pub query: String,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_mode: Option<TeamMode>,
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub base_url: String,
    pub model_id: String,
    pub simulated_delay: Duration,
    pub verbose: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            simulated_delay: Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS),
            verbose: false,
        }
    }
}

/// Routes user text to an agent and always comes back with display text
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    transport: Arc<dyn Transport>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<AgentRegistry>,
        transport: Arc<dyn Transport>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            registry,
            transport,
            config,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Look up the agent and dispatch to it. Unknown ids are the only error.
    pub async fn dispatch(
        &self,
        agent_id: &AgentId,
        text: &str,
        team_mode: Option<TeamMode>,
    ) -> Result<String, RegistryError> {
        let agent = self.registry.lookup(agent_id)?;
        Ok(self.dispatch_to(agent, text, team_mode).await)
    }

    /// Dispatch to an already resolved agent
    pub async fn dispatch_to(&self, agent: &Agent, text: &str, team_mode: Option<TeamMode>) -> String {
        match &agent.route {
            Route::Simulated => {
                tokio::time::sleep(self.config.simulated_delay).await;
                simulated_reply(text)
            }
            Route::Remote {
                path,
                forwards_team_mode,
                failure,
            } => {
                let url = self.endpoint_url(path);
                let request = self.build_request(text, *forwards_team_mode, team_mode);
                match self.transport.post_ask(&url, &request).await {
                    Ok(body) => normalize_response(&body),
                    Err(err) => self.fail(agent, *failure, text, &err),
                }
            }
        }
    }

    fn build_request(
        &self,
        text: &str,
        forwards_team_mode: bool,
        team_mode: Option<TeamMode>,
    ) -> AskRequest {
        AskRequest {
            query: text.to_string(),
            model_id: self.config.model_id.clone(),
            team_mode: forwards_team_mode.then(|| team_mode.unwrap_or_default()),
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn fail(&self, agent: &Agent, policy: FailurePolicy, text: &str, err: &TransportError) -> String {
        log_failure(agent.id.as_str(), &err.to_string(), self.config.verbose);
        match policy {
            FailurePolicy::ErrorNotice => ERROR_NOTICE.to_string(),
            FailurePolicy::TeamFallback => team_fallback(text),
        }
    }
}
