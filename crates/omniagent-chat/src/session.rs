use omniagent_agents::{Agent, AgentRegistry, RegistryError};
use omniagent_api::Dispatcher;
use omniagent_logging::ConversationLogger;
use omniagent_types::{AgentId, Message, TeamMode};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::store::MessageStore;

pub type SessionId = Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a request is already in flight for this session")]
    Busy,
    #[error("turn belongs to session {0}")]
    ForeignTurn(SessionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Pending,
}

/// A submitted user turn waiting for its reply.
///
/// The session stays busy while the turn is alive. Dropping it without
/// [`ChatSession::complete`] frees the session; the user message then stays
/// unanswered.
#[must_use = "a pending turn leaves the session busy until it is completed"]
#[derive(Debug)]
pub struct PendingTurn {
    session_id: SessionId,
    pub agent: Agent,
    pub text: String,
    pub team_mode: Option<TeamMode>,
    busy: Arc<AtomicBool>,
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Welcome message shown when a chat starts
pub fn greeting(agent: &Agent, team_mode: Option<TeamMode>) -> String {
    let mut text = format!(
        "Hello! I'm the {}. How can I assist you today?",
        agent.name
    );
    if agent.is_team() {
        text.push_str(&format!(
            " I'm operating in {} mode.",
            team_mode.unwrap_or_default()
        ));
    }
    text
}

/// One conversation with one agent
pub struct ChatSession {
    id: SessionId,
    agent: Agent,
    team_mode: Option<TeamMode>,
    messages: MessageStore,
    busy: Arc<AtomicBool>,
    logger: Option<ConversationLogger>,
}

impl ChatSession {
    /// Start a session with the agent registered under `agent_id`
    pub fn start(
        registry: &AgentRegistry,
        agent_id: &AgentId,
        team_mode: Option<TeamMode>,
    ) -> Result<Self, RegistryError> {
        let agent = registry.lookup(agent_id)?.clone();
        Ok(Self::new(agent, team_mode))
    }

    /// Team mode only sticks for the team agent; other agents ignore it
    pub fn new(agent: Agent, team_mode: Option<TeamMode>) -> Self {
        let team_mode = agent.is_team().then(|| team_mode.unwrap_or_default());
        let mut messages = MessageStore::new();
        messages.push(Message::assistant(greeting(&agent, team_mode)));

        Self {
            id: Uuid::new_v4(),
            agent,
            team_mode,
            messages,
            busy: Arc::new(AtomicBool::new(false)),
            logger: None,
        }
    }

    /// Record every message of this session to a transcript, starting with the greeting
    pub async fn attach_logger(&mut self, mut logger: ConversationLogger) {
        for message in self.messages.as_slice() {
            logger.log(message, self.agent.id.as_str(), self.team_mode).await;
        }
        self.logger = Some(logger);
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn team_mode(&self) -> Option<TeamMode> {
        self.team_mode
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.as_slice()
    }

    pub fn state(&self) -> SessionState {
        if self.is_busy() {
            SessionState::Pending
        } else {
            SessionState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Append the user message and mark the session busy.
    ///
    /// Rejects without side effects when the text is blank or a turn is
    /// already pending.
    pub fn begin(&mut self, text: &str) -> Result<PendingTurn, SessionError> {
        self.ensure_ready(text)?;
        Ok(self.open_turn(Message::user(text)))
    }

    fn ensure_ready(&self, text: &str) -> Result<(), SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    fn open_turn(&mut self, question: Message) -> PendingTurn {
        let text = question.content.clone();
        self.messages.push(question);
        self.busy.store(true, Ordering::Release);

        PendingTurn {
            session_id: self.id,
            agent: self.agent.clone(),
            text,
            team_mode: self.team_mode,
            busy: self.busy.clone(),
        }
    }

    /// Append the assistant reply for `turn` and return to idle.
    ///
    /// A turn from another session is refused; dropping it frees that session.
    pub fn complete(&mut self, turn: PendingTurn, reply: String) -> Result<&Message, SessionError> {
        if turn.session_id != self.id {
            return Err(SessionError::ForeignTurn(turn.session_id));
        }
        drop(turn);
        Ok(self.messages.push(Message::assistant(reply)))
    }

    /// [`ChatSession::begin`], then record the user message in the transcript
    pub async fn start_turn(&mut self, text: &str) -> Result<PendingTurn, SessionError> {
        let turn = self.begin(text)?;
        self.log_last().await;
        Ok(turn)
    }

    /// [`ChatSession::complete`], then record the reply in the transcript
    pub async fn finish_turn(
        &mut self,
        turn: PendingTurn,
        reply: String,
    ) -> Result<&Message, SessionError> {
        self.complete(turn, reply)?;
        self.log_last().await;
        let last = self.messages.len() - 1;
        Ok(&self.messages.as_slice()[last])
    }

    /// Run a whole turn: user message, dispatch, assistant message.
    ///
    /// Both messages are appended once the reply is in, so dropping this
    /// future mid-dispatch leaves the session unchanged.
    pub async fn submit(&mut self, dispatcher: &Dispatcher, text: &str) -> Result<&Message, SessionError> {
        self.ensure_ready(text)?;
        let question = Message::user(text);
        let reply = dispatcher
            .dispatch_to(&self.agent, text, self.team_mode)
            .await;

        let turn = self.open_turn(question);
        self.log_last().await;
        self.finish_turn(turn, reply).await
    }

    async fn log_last(&mut self) {
        if let (Some(logger), Some(message)) = (self.logger.as_mut(), self.messages.last()) {
            logger.log(message, self.agent.id.as_str(), self.team_mode).await;
        }
    }

    /// Flush the transcript, if any
    pub async fn close(&mut self) {
        if let Some(mut logger) = self.logger.take() {
            logger.shutdown().await;
        }
    }
}
