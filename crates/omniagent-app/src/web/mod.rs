// HTTP chat API
pub mod protocol;
pub mod routes;
pub mod server;
pub mod session_manager;

pub use protocol::{AgentInfo, CreateSessionRequest, MessageView, SendMessageRequest, SessionInfo};
pub use routes::{create_router, AppError, AppState};
pub use server::{WebServer, WebServerConfig};
pub use session_manager::{SendError, SessionManager, SharedSession};
