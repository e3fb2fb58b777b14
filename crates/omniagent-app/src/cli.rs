use clap::{Parser, Subcommand};
use clap_complete::Shell;
use omniagent_types::{TeamMode, DEFAULT_BASE_URL, DEFAULT_MODEL_ID, DEFAULT_SIMULATED_DELAY_MS};
use std::path::PathBuf;

/// CLI arguments for omniagent
#[derive(Parser, Debug)]
#[command(name = "omniagent")]
#[command(about = "Chat with the Quality, FLKH and Omni agents from the terminal or over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the agent API
    #[arg(long, global = true, env = "OMNIAGENT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model identifier sent with every request
    #[arg(long, global = true, env = "OMNIAGENT_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    pub model_id: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, global = true, env = "OMNIAGENT_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Delay before a simulated agent answers
    #[arg(long, global = true, value_name = "MS", default_value_t = DEFAULT_SIMULATED_DELAY_MS)]
    pub simulated_delay_ms: u64,

    /// TOML file declaring additional agents
    #[arg(long, global = true, value_name = "PATH")]
    pub agents_file: Option<PathBuf>,

    /// Agent to talk to (skips the selection prompt)
    #[arg(short, long, global = true, value_name = "AGENT")]
    pub agent: Option<String>,

    /// Team mode for the Omni agent (collaborate, coordinate, route)
    #[arg(long, global = true, value_name = "MODE", value_parser = parse_team_mode)]
    pub team_mode: Option<TeamMode>,

    /// Show request/response details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't write conversation transcripts
    #[arg(long, global = true)]
    pub no_log: bool,

    /// Directory transcripts are written under (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List the available agents
    Agents,
    /// Send a single message and print the reply
    Ask {
        /// Agent id (quality, flkh, omni, ...)
        agent: String,
        /// Message text
        text: String,
    },
    /// Interactive chat (default)
    Repl,
    /// Serve the HTTP chat API
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_team_mode(s: &str) -> Result<TeamMode, String> {
    TeamMode::from_str(s).ok_or_else(|| {
        let valid: Vec<&str> = TeamMode::ALL.iter().map(|m| m.as_str()).collect();
        format!("unknown team mode '{}' (expected one of: {})", s, valid.join(", "))
    })
}
