use colored::Colorize;
use reqwest::StatusCode;
use serde::Serialize;

use crate::safe_truncate;

const MAX_LOGGED_BODY_CHARS: usize = 5000;

/// Log an outgoing agent request (console output)
pub fn log_request<T: Serialize + ?Sized>(url: &str, payload: &T, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 AGENT REQUEST".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    match reqwest::Url::parse(url) {
        Ok(parsed_url) => {
            println!("{}: {}", "URL".bright_yellow(), url);
            println!("{}: {}", "Host".bright_yellow(), parsed_url.host_str().unwrap_or("unknown"));
            println!("{}: {}", "Path".bright_yellow(), parsed_url.path());
        }
        Err(_) => println!("{}: {}", "URL".bright_yellow(), url),
    }

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    println!("  Accept: application/json");

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(payload) {
        Ok(json) => print_body(&json),
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log a response received from an agent endpoint (console output)
pub fn log_response(url: &str, status: StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    let status_line = format!("{}", status);
    let status_line = if status.is_success() {
        status_line.green()
    } else {
        status_line.red()
    };

    println!("\n{}", "═".repeat(80).bright_magenta());
    println!("{}", "📥 AGENT RESPONSE".bright_magenta().bold());
    println!("{}", "═".repeat(80).bright_magenta());
    println!("{}: {}", "URL".bright_yellow(), url);
    println!("{}: {}", "Status".bright_yellow(), status_line);
    println!("\n{}", "Response Body:".bright_yellow());
    print_body(body);
    println!("{}", "═".repeat(80).bright_magenta());
    println!();
}

/// Report a failed agent call that was replaced by fallback text
pub fn log_failure(agent: &str, reason: &str, verbose: bool) {
    if !verbose {
        return;
    }
    eprintln!(
        "{}",
        format!("⚠️  {} agent call failed, using fallback text: {}", agent, reason).yellow()
    );
}

fn print_body(body: &str) {
    if body.chars().count() > MAX_LOGGED_BODY_CHARS {
        println!("{}", safe_truncate(body, MAX_LOGGED_BODY_CHARS));
        println!(
            "\n{}",
            format!("... (truncated, total {} bytes)", body.len()).bright_black()
        );
    } else {
        println!("{}", body);
    }
}
