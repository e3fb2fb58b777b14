use chrono::{DateTime, Utc};
use omniagent_agents::{Agent, Route};
use omniagent_chat::{ChatSession, SessionId, SessionState};
use omniagent_render::render_markdown;
use omniagent_types::{Message, Role, TeamMode};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub agent_id: String,
    #[serde(default)]
    pub team_mode: Option<String>,
}

/// Body of `POST /api/sessions/:id/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub team: bool,
    pub simulated: bool,
}

impl From<&Agent> for AgentInfo {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.to_string(),
            name: agent.name.clone(),
            description: agent.description.clone(),
            team: agent.is_team(),
            simulated: agent.route == Route::Simulated,
        }
    }
}

/// A message as the web client sees it; assistant text comes pre-rendered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        let html = match message.role {
            Role::Assistant => Some(render_markdown(&message.content)),
            Role::User => None,
        };
        Self {
            id: message.id.clone(),
            role: message.role,
            content: message.content.clone(),
            html,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub agent: AgentInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_mode: Option<TeamMode>,
    pub busy: bool,
    pub messages: Vec<MessageView>,
}

impl From<&ChatSession> for SessionInfo {
    fn from(session: &ChatSession) -> Self {
        Self {
            session_id: session.id(),
            agent: AgentInfo::from(session.agent()),
            team_mode: session.team_mode(),
            busy: session.state() == SessionState::Pending,
            messages: session.messages().iter().map(MessageView::from).collect(),
        }
    }
}
