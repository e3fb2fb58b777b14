use colored::Colorize;
use omniagent_agents::{AgentRegistry, Route};

/// One line per agent: id, name, then description
pub fn format_agent_table(registry: &AgentRegistry) -> String {
    let id_width = registry
        .agents()
        .iter()
        .map(|a| a.id.as_str().len())
        .max()
        .unwrap_or(0);
    let name_width = registry
        .agents()
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for agent in registry.agents() {
        let mut description = agent.description.clone();
        if agent.route == Route::Simulated {
            description.push_str(" (simulated)");
        }
        out.push_str(&format!(
            "{:id_width$}  {:name_width$}  {}\n",
            agent.id.as_str(),
            agent.name,
            description,
            id_width = id_width,
            name_width = name_width,
        ));
    }
    out
}

pub fn print_agents(registry: &AgentRegistry) {
    println!("{}", "Available agents:".bright_cyan().bold());
    print!("{}", format_agent_table(registry));
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniagent_agents::AgentsFile;

    #[test]
    fn test_table_lists_every_agent_aligned() {
        let file = AgentsFile::parse(
            "[[agents]]\nid = \"helper\"\nname = \"Helper\"\ndescription = \"Local stand-in\"\nsimulated = true\n",
        )
        .unwrap();
        let registry = AgentRegistry::with_extras(&file).unwrap();

        let table = format_agent_table(&registry);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("quality  Quality Agent  Specialized"));
        assert!(lines[2].starts_with("omni     Omni Agent     "));
        assert!(lines[3].starts_with("helper   Helper         Local stand-in (simulated)"));
    }
}
