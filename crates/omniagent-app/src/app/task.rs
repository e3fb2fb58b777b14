use anyhow::{Context, Result};
use omniagent_api::Dispatcher;
use omniagent_chat::ChatSession;
use omniagent_logging::ConversationLogger;
use omniagent_types::{AgentId, TeamMode};

use crate::app::AppConfig;

/// Start a session, attaching a transcript when logging is enabled
pub(crate) async fn open_session(
    config: &AppConfig,
    agent_id: &AgentId,
    team_mode: Option<TeamMode>,
) -> Result<ChatSession> {
    let mut session = ChatSession::start(&config.registry, agent_id, team_mode)?;

    if let Some(dir) = config.transcript_dir() {
        match ConversationLogger::new(&dir).await {
            Ok(logger) => {
                if config.verbose {
                    eprintln!("Transcript: {}", logger.file_path().display());
                }
                session.attach_logger(logger).await;
            }
            Err(e) => eprintln!("Logging disabled: {}", e),
        }
    }

    Ok(session)
}

/// Send one message in a fresh session and return the reply text
pub async fn ask_once(
    config: &AppConfig,
    dispatcher: &Dispatcher,
    agent: &str,
    text: &str,
) -> Result<String> {
    let agent_id = AgentId::from_str(agent);
    let mut session = open_session(config, &agent_id, config.team_mode).await?;

    let reply = session
        .submit(dispatcher, text)
        .await
        .context("Message not sent")?
        .content
        .clone();

    session.close().await;
    Ok(reply)
}

/// `omniagent ask <AGENT> <TEXT>`: print the reply and exit
pub async fn run_ask_mode(config: &AppConfig, agent: &str, text: &str) -> Result<()> {
    let dispatcher = config.build_dispatcher()?;
    let reply = ask_once(config, &dispatcher, agent, text).await?;
    println!("{}", reply);
    Ok(())
}
