use anyhow::{Context, Result};
use colored::Colorize;
use std::net::SocketAddr;

use crate::app::AppConfig;
use crate::web::server::{WebServer, WebServerConfig};

/// Run the web server
pub async fn run_web_server(config: &AppConfig, bind: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    println!("{} Starting omniagent web server...", "🌐".cyan());
    println!("   Address: {}", addr);
    match config.transcript_dir() {
        Some(dir) => println!("   Transcripts: {}", dir.join("logs").display()),
        None => println!("   Transcripts: disabled"),
    }

    let server = WebServer::new(WebServerConfig {
        bind_addr: addr,
        dispatcher: config.build_dispatcher()?,
        transcript_dir: config.transcript_dir(),
    });
    server.start().await
}
