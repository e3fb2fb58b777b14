use omniagent_agents::RegistryError;
use omniagent_api::Dispatcher;
use omniagent_chat::{ChatSession, SessionError, SessionId};
use omniagent_logging::ConversationLogger;
use omniagent_types::{AgentId, Message, TeamMode};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Why a message could not be sent
#[derive(Debug, PartialEq)]
pub enum SendError {
    NotFound,
    Session(SessionError),
    /// The task running the turn panicked or was aborted
    Interrupted(String),
}

impl From<SessionError> for SendError {
    fn from(err: SessionError) -> Self {
        SendError::Session(err)
    }
}

/// All live web chat sessions
pub struct SessionManager {
    dispatcher: Arc<Dispatcher>,
    transcript_dir: Option<PathBuf>,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl SessionManager {
    pub fn new(dispatcher: Arc<Dispatcher>, transcript_dir: Option<PathBuf>) -> Self {
        Self {
            dispatcher,
            transcript_dir,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub async fn create_session(
        &self,
        agent_id: &AgentId,
        team_mode: Option<TeamMode>,
    ) -> Result<SharedSession, RegistryError> {
        let mut session = ChatSession::start(self.dispatcher.registry(), agent_id, team_mode)?;

        if let Some(dir) = &self.transcript_dir {
            let label = session.id().simple().to_string();
            match ConversationLogger::with_label(dir, &label).await {
                Ok(logger) => session.attach_logger(logger).await,
                Err(e) => eprintln!("Transcript disabled for session {}: {}", session.id(), e),
            }
        }

        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        Ok(shared)
    }

    pub async fn get_session(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session and flush its transcript. Returns false if it did not exist.
    pub async fn remove_session(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(session) => {
                session.lock().await.close().await;
                true
            }
            None => false,
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Submit `text` to a session and wait for the reply.
    ///
    /// The session lock is only held while the turn is opened and closed, so
    /// readers see the pending state and a second submit fails with `Busy`.
    /// The turn runs on its own task and completes even if the caller is dropped.
    pub async fn send_message(&self, id: &SessionId, text: &str) -> Result<Message, SendError> {
        let session = self.get_session(id).await.ok_or(SendError::NotFound)?;

        let turn = session.lock().await.start_turn(text).await?;
        let dispatcher = self.dispatcher.clone();
        let task = tokio::spawn(async move {
            let reply = dispatcher
                .dispatch_to(&turn.agent, &turn.text, turn.team_mode)
                .await;
            let mut guard = session.lock().await;
            guard.finish_turn(turn, reply).await.map(Message::clone)
        });

        match task.await {
            Ok(result) => Ok(result?),
            Err(e) => Err(SendError::Interrupted(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniagent_agents::AgentRegistry;
    use omniagent_api::{DispatcherConfig, HttpTransport};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager(transcript_dir: Option<PathBuf>) -> SessionManager {
        manager_for("http://127.0.0.1:1", transcript_dir)
    }

    fn manager_for(base_url: &str, transcript_dir: Option<PathBuf>) -> SessionManager {
        let transport = HttpTransport::new(None, false).unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(AgentRegistry::builtin()),
            Arc::new(transport),
            DispatcherConfig {
                base_url: base_url.to_string(),
                simulated_delay: Duration::from_millis(1),
                ..DispatcherConfig::default()
            },
        );
        SessionManager::new(Arc::new(dispatcher), transcript_dir)
    }

    #[tokio::test]
    async fn test_create_get_remove() {
        let manager = manager(None);
        let session = manager.create_session(&AgentId::Omni, None).await.unwrap();
        let id = session.lock().await.id();

        assert_eq!(manager.session_count().await, 1);
        assert!(manager.get_session(&id).await.is_some());
        assert!(manager.remove_session(&id).await);
        assert!(!manager.remove_session(&id).await);
        assert!(manager.get_session(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_agent_is_not_stored() {
        let manager = manager(None);
        let err = manager
            .create_session(&AgentId::from_str("nobody"), None)
            .await
            .err();
        assert_eq!(err, Some(RegistryError::UnknownAgent("nobody".into())));
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_send_to_missing_session() {
        let manager = manager(None);
        let err = manager.send_message(&SessionId::new_v4(), "hi").await.unwrap_err();
        assert_eq!(err, SendError::NotFound);
    }

    #[tokio::test]
    async fn test_empty_text_leaves_session_idle() {
        let manager = manager(None);
        let session = manager.create_session(&AgentId::Quality, None).await.unwrap();
        let id = session.lock().await.id();

        let err = manager.send_message(&id, "   ").await.unwrap_err();
        assert_eq!(err, SendError::Session(SessionError::EmptyInput));
        assert!(!session.lock().await.is_busy());
    }

    #[tokio::test]
    async fn test_transcript_named_after_session() {
        let workspace = tempfile::tempdir().unwrap();
        let manager = manager(Some(workspace.path().to_path_buf()));
        let session = manager.create_session(&AgentId::Flkh, None).await.unwrap();
        let id = session.lock().await.id();
        manager.remove_session(&id).await;

        let names: Vec<String> = std::fs::read_dir(workspace.path().join("logs"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(&format!("-{}.jsonl", id.simple())));
    }

    #[tokio::test]
    async fn test_abandoned_send_still_completes_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quality/ask"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"answer": "late answer"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let manager = manager_for(&server.uri(), None);
        let session = manager.create_session(&AgentId::Quality, None).await.unwrap();
        let id = session.lock().await.id();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(100), manager.send_message(&id, "first")).await;
        assert!(abandoned.is_err());

        for _ in 0..60 {
            if !session.lock().await.is_busy() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        {
            let guard = session.lock().await;
            assert!(!guard.is_busy());
            let contents: Vec<&str> = guard.messages().iter().map(|m| m.content.as_str()).collect();
            assert_eq!(contents[1..].to_vec(), vec!["first", "late answer"]);
        }

        let reply = manager.send_message(&id, "second").await.unwrap();
        assert_eq!(reply.content, "late answer");
        assert_eq!(session.lock().await.messages().len(), 5);
    }
}
