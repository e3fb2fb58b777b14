/// Shown when a single-agent endpoint fails
pub const ERROR_NOTICE: &str =
    "Sorry, there was an error processing your request. Please try again later.";

/// Synthesized answer used when the team endpoint is unavailable
pub fn team_fallback(query: &str) -> String {
    format!(
        r#"I'm coordinating with multiple specialized agents to address: "{query}". Here's what our collective intelligence has determined:

## Analysis from Multiple Experts

* The **Technical Team** has analyzed your query and provided insights
* Our **Research Division** has gathered relevant information from various sources
* The **Domain Specialists** have applied their expertise to your specific question

This collaborative approach allows us to provide a more comprehensive response than any single agent could.

> Note: We're currently experiencing some technical difficulties with our backend services. This is a synthesized response based on typical agent coordination patterns.

Would you like me to focus on any particular aspect of your query?"#
    )
}

/// Canned acknowledgment from agents that have no endpoint
pub fn simulated_reply(query: &str) -> String {
    format!(
        "Thank you for your message. I'll help you with \"{}\" right away.",
        query
    )
}
