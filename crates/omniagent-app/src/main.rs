use anyhow::Result;
use clap::{CommandFactory, Parser};

use omniagent::app::{print_agents, run_ask_mode, run_repl_mode, run_web_server, setup_from_cli};
use omniagent::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "omniagent", &mut std::io::stdout());
        return Ok(());
    }

    let app_config = setup_from_cli(&cli)?;

    match cli.command {
        Some(Commands::Agents) => {
            print_agents(&app_config.registry);
            Ok(())
        }
        Some(Commands::Ask { agent, text }) => run_ask_mode(&app_config, &agent, &text).await,
        Some(Commands::Serve { bind, port }) => run_web_server(&app_config, &bind, port).await,
        Some(Commands::Completions { .. }) => Ok(()),
        Some(Commands::Repl) | None => run_repl_mode(app_config).await,
    }
}
