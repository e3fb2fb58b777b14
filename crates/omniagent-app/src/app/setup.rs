use anyhow::{Context, Result};
use colored::Colorize;
use omniagent_agents::{AgentRegistry, AgentsFile};
use omniagent_api::{Dispatcher, DispatcherConfig, HttpTransport};
use omniagent_types::{AgentId, TeamMode};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dispatcher_config: DispatcherConfig,
    pub registry: Arc<AgentRegistry>,
    pub timeout: Option<Duration>,
    pub agent: Option<AgentId>,
    pub team_mode: Option<TeamMode>,
    pub work_dir: PathBuf,
    pub log_transcripts: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Build the dispatcher every mode talks to the agents through
    pub fn build_dispatcher(&self) -> Result<Arc<Dispatcher>> {
        let transport = HttpTransport::new(self.timeout, self.verbose)
            .context("Failed to build HTTP client")?;
        Ok(Arc::new(Dispatcher::new(
            self.registry.clone(),
            Arc::new(transport),
            self.dispatcher_config.clone(),
        )))
    }

    /// Directory transcripts go under, or `None` with `--no-log`
    pub fn transcript_dir(&self) -> Option<PathBuf> {
        self.log_transcripts.then(|| self.work_dir.clone())
    }
}

/// Set up application configuration from CLI arguments.
///
/// Precedence: CLI flags > OMNIAGENT_* env (resolved by clap) > defaults.
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let registry = match &cli.agents_file {
        Some(path) => {
            let file = AgentsFile::load(path)
                .with_context(|| format!("Failed to load agents file {}", path.display()))?;
            let registry = AgentRegistry::with_extras(&file)
                .with_context(|| format!("Invalid agents file {}", path.display()))?;
            if cli.verbose {
                eprintln!(
                    "{} Loaded {} extra agent(s) from {}",
                    "📋".cyan(),
                    file.agents.len(),
                    path.display()
                );
            }
            registry
        }
        None => AgentRegistry::builtin(),
    };

    let agent = match &cli.agent {
        Some(raw) => {
            let id = AgentId::from_str(raw);
            registry.lookup(&id).context("Unknown --agent")?;
            Some(id)
        }
        None => None,
    };

    let work_dir = match &cli.work_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    let dispatcher_config = DispatcherConfig {
        base_url: cli.base_url.clone(),
        model_id: cli.model_id.clone(),
        simulated_delay: Duration::from_millis(cli.simulated_delay_ms),
        verbose: cli.verbose,
    };

    if cli.verbose {
        eprintln!(
            "{} Agent API: {} (model {})",
            "🔧".bright_black(),
            dispatcher_config.base_url,
            dispatcher_config.model_id
        );
    }

    Ok(AppConfig {
        dispatcher_config,
        registry: Arc::new(registry),
        timeout: cli.timeout_secs.map(Duration::from_secs),
        agent,
        team_mode: cli.team_mode,
        work_dir,
        log_transcripts: !cli.no_log,
        verbose: cli.verbose,
    })
}
