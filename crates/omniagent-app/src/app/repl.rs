use anyhow::Result;
use colored::Colorize;
use omniagent_agents::AgentRegistry;
use omniagent_api::Dispatcher;
use omniagent_chat::ChatSession;
use omniagent_types::{AgentId, Message, Role, TeamMode};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::task::open_session;
use crate::app::AppConfig;

/// A line typed at the chat prompt
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Empty,
    Exit,
    ChangeAgent,
    Mode(String),
    History,
    Help,
    Message(String),
}

pub fn parse_repl_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed {
        "" => ReplCommand::Empty,
        "exit" | "quit" => ReplCommand::Exit,
        "/agent" => ReplCommand::ChangeAgent,
        "/history" => ReplCommand::History,
        "/help" => ReplCommand::Help,
        _ => match trimmed.strip_prefix("/mode") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                ReplCommand::Mode(rest.trim().to_string())
            }
            _ => ReplCommand::Message(line.to_string()),
        },
    }
}

/// Resolve the answer to the agent prompt: a 1-based number or an agent id
pub fn resolve_selection(registry: &AgentRegistry, input: &str) -> Option<AgentId> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| registry.agents().get(i))
            .map(|a| a.id.clone());
    }
    registry
        .lookup(&AgentId::from_str(input))
        .ok()
        .map(|a| a.id.clone())
}

/// How the chat loop ended
enum Next {
    Quit,
    PickAgent,
    Restart(TeamMode),
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    let dispatcher = config.build_dispatcher()?;

    println!("{}", "🤖 Omni Agent Chat".bright_cyan().bold());
    println!(
        "{}",
        "Type 'exit' or 'quit' to leave, '/help' for commands\n".bright_black()
    );

    let mut rl = DefaultEditor::new()?;
    let mut selected = config.agent.clone();
    let mut team_mode = config.team_mode;

    loop {
        let agent_id = match selected.take() {
            Some(id) => id,
            None => match select_agent(&mut rl, &config.registry)? {
                Some(id) => id,
                None => break,
            },
        };

        let mut session = open_session(&config, &agent_id, team_mode).await?;
        print_message(session.agent().name.as_str(), &session.messages()[0]);

        let next = chat_loop(&mut rl, &mut session, &dispatcher).await;
        session.close().await;

        match next? {
            Next::Quit => break,
            Next::PickAgent => team_mode = config.team_mode,
            Next::Restart(mode) => {
                selected = Some(agent_id);
                team_mode = Some(mode);
            }
        }
    }

    println!("{}", "Goodbye!".bright_cyan());
    Ok(())
}

fn select_agent(rl: &mut DefaultEditor, registry: &AgentRegistry) -> Result<Option<AgentId>> {
    println!("{}", "Choose an agent:".bright_cyan().bold());
    for (i, agent) in registry.agents().iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            agent.name.bold(),
            format!("- {}", agent.description).bright_black()
        );
    }

    loop {
        match rl.readline(&format!("Select an agent [1-{}]: ", registry.len())) {
            Ok(line) => {
                if matches!(parse_repl_line(&line), ReplCommand::Exit) {
                    return Ok(None);
                }
                match resolve_selection(registry, &line) {
                    Some(id) => return Ok(Some(id)),
                    None => eprintln!("{} Unknown agent: '{}'", "❌".bright_red(), line.trim()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

async fn chat_loop(
    rl: &mut DefaultEditor,
    session: &mut ChatSession,
    dispatcher: &Dispatcher,
) -> Result<Next> {
    let agent_name = session.agent().name.clone();

    loop {
        let prompt = format!("{} ", "You:".bright_green().bold());
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(Next::Quit),
            Err(err) => return Err(err.into()),
        };

        match parse_repl_line(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Exit => return Ok(Next::Quit),
            ReplCommand::ChangeAgent => return Ok(Next::PickAgent),
            ReplCommand::Help => print_help(),
            ReplCommand::History => {
                for message in session.messages() {
                    print_message(&agent_name, message);
                }
            }
            ReplCommand::Mode(raw) => {
                if !session.agent().is_team() {
                    println!(
                        "{} Team modes only apply to team agents; {} ignores them.",
                        "ℹ️".bright_blue(),
                        agent_name
                    );
                    continue;
                }
                if raw.is_empty() {
                    let current = session.team_mode().unwrap_or_default();
                    println!("{} Current team mode: {}", "🔧".bright_cyan(), current);
                    continue;
                }
                match TeamMode::from_str(&raw) {
                    Some(mode) => return Ok(Next::Restart(mode)),
                    None => eprintln!(
                        "{} Unknown team mode '{}'. Use collaborate, coordinate or route.",
                        "❌".bright_red(),
                        raw
                    ),
                }
            }
            ReplCommand::Message(text) => {
                let _ = rl.add_history_entry(text.as_str());
                println!("{}", format!("⏳ {} is thinking...", agent_name).bright_black());
                match session.submit(dispatcher, &text).await {
                    Ok(reply) => print_message(&agent_name, reply),
                    Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                }
            }
        }
    }
}

fn print_message(agent_name: &str, message: &Message) {
    match message.role {
        Role::User => println!("{} {}", "You:".bright_green().bold(), message.content),
        Role::Assistant => println!(
            "{} {}\n",
            format!("{}:", agent_name).bright_cyan().bold(),
            message.content
        ),
    }
}

fn print_help() {
    println!("{} Commands:", "💡".bright_yellow());
    println!("  /agent           - Pick another agent (ends this conversation)");
    println!("  /mode [MODE]     - Show or change the team mode (restarts the conversation)");
    println!("  /history         - Print the conversation so far");
    println!("  exit, quit       - Leave");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_repl_line("   "), ReplCommand::Empty);
        assert_eq!(parse_repl_line(" quit "), ReplCommand::Exit);
        assert_eq!(parse_repl_line("/agent"), ReplCommand::ChangeAgent);
        assert_eq!(parse_repl_line("/history"), ReplCommand::History);
        assert_eq!(parse_repl_line("/mode route"), ReplCommand::Mode("route".into()));
        assert_eq!(parse_repl_line("/mode"), ReplCommand::Mode(String::new()));
    }

    #[test]
    fn test_other_lines_are_messages_kept_verbatim() {
        assert_eq!(
            parse_repl_line("  what does /mode do?"),
            ReplCommand::Message("  what does /mode do?".into())
        );
        assert_eq!(parse_repl_line("/modes"), ReplCommand::Message("/modes".into()));
        assert_eq!(parse_repl_line("exit now"), ReplCommand::Message("exit now".into()));
    }

    #[test]
    fn test_resolve_selection_by_number_or_id() {
        let registry = AgentRegistry::builtin();
        assert_eq!(resolve_selection(&registry, "1"), Some(AgentId::Quality));
        assert_eq!(resolve_selection(&registry, " 3 "), Some(AgentId::Omni));
        assert_eq!(resolve_selection(&registry, "FLKH"), Some(AgentId::Flkh));
        assert_eq!(resolve_selection(&registry, "0"), None);
        assert_eq!(resolve_selection(&registry, "4"), None);
        assert_eq!(resolve_selection(&registry, "ghost"), None);
    }
}
