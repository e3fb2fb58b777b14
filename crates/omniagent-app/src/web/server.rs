use anyhow::Result;
use axum::Router;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use omniagent_api::Dispatcher;

use crate::web::{routes, session_manager::SessionManager};

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub dispatcher: Arc<Dispatcher>,
    pub transcript_dir: Option<PathBuf>,
}

/// Web server instance
pub struct WebServer {
    bind_addr: SocketAddr,
    session_manager: Arc<SessionManager>,
}

impl WebServer {
    pub fn new(config: WebServerConfig) -> Self {
        let session_manager = Arc::new(SessionManager::new(
            config.dispatcher,
            config.transcript_dir,
        ));

        Self {
            bind_addr: config.bind_addr,
            session_manager,
        }
    }

    /// Router with every API route and a permissive CORS policy
    pub fn router(&self) -> Router {
        let app_state = routes::AppState {
            session_manager: self.session_manager.clone(),
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(app_state).layer(ServiceBuilder::new().layer(cors))
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        println!("{} Web server starting on http://{}", "🌐".cyan(), self.bind_addr);
        println!("   API endpoints: http://{}/api/agents, /api/sessions", self.bind_addr);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn session_manager(&self) -> Arc<SessionManager> {
        self.session_manager.clone()
    }
}
