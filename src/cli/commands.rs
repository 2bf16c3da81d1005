//! REPL commands
//!
//! Parses a line of input and applies it to an orchestrator.

use serde_json::Value;

use crate::agent::{Agent, Orchestrator};
use crate::core::{parse_params, Result};

/// Result of parsing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
    /// No output needed
    None,
}

/// Parse and handle a REPL command.
///
/// Errors from the orchestrator or its agents are returned so the caller can
/// report them; none of them end the session.
pub fn handle_command(input: &str, orchestrator: &mut Orchestrator) -> Result<CommandResult> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(CommandResult::None);
    }

    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].trim_start_matches('/').to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "agents" | "ls" => Ok(CommandResult::Handled(list_agents(orchestrator))),

        "run" => handle_run_command(args, orchestrator),

        "results" => Ok(CommandResult::Handled(format_results(orchestrator))),

        "state" => {
            if args.is_empty() {
                return Ok(CommandResult::Handled("Usage: state <agent>".to_string()));
            }
            match orchestrator.get_agent(args) {
                Some(agent) => {
                    let state = Value::Object(agent.borrow().get_state());
                    Ok(CommandResult::Handled(serde_json::to_string_pretty(&state)?))
                }
                None => Ok(CommandResult::Handled(format!("Agent '{}' not found", args))),
            }
        }

        "set" => handle_set_command(args, orchestrator),

        "remove" | "rm" => {
            if args.is_empty() {
                return Ok(CommandResult::Handled("Usage: remove <agent>".to_string()));
            }
            let message = if orchestrator.remove_agent(args) {
                format!("Removed agent '{}'", args)
            } else {
                format!("Agent '{}' not found", args)
            };
            Ok(CommandResult::Handled(message))
        }

        "reset" | "clear" => {
            orchestrator.reset()?;
            Ok(CommandResult::Handled(
                "Results and agent state cleared.".to_string(),
            ))
        }

        "status" => Ok(CommandResult::Handled(format!(
            "OR-AF Status:\n\
             ─────────────────────────────\n\
             Orchestrator: {}\n\
             Agents:       {}\n\
             Results:      {}",
            orchestrator.name(),
            orchestrator.agent_count(),
            orchestrator.get_results().len()
        ))),

        _ => Ok(CommandResult::Handled(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            cmd
        ))),
    }
}

/// Handle `run <agent> <task> [json]`
fn handle_run_command(args: &str, orchestrator: &mut Orchestrator) -> Result<CommandResult> {
    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 2 || parts[1].is_empty() {
        return Ok(CommandResult::Handled(
            "Usage: run <agent> <task> [json params]".to_string(),
        ));
    }

    let params = parse_params(parts.get(2).copied().unwrap_or(""))?;
    let result = orchestrator.execute_task(parts[0], parts[1], params)?;

    Ok(CommandResult::Handled(format_output(&result)?))
}

/// Handle `set <agent> <json>`: merge JSON into an agent's state
fn handle_set_command(args: &str, orchestrator: &mut Orchestrator) -> Result<CommandResult> {
    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    if parts.len() < 2 {
        return Ok(CommandResult::Handled(
            "Usage: set <agent> <json object>".to_string(),
        ));
    }

    let updates = parse_params(parts[1])?;
    match orchestrator.get_agent(parts[0]) {
        Some(agent) => {
            let count = updates.len();
            agent.borrow_mut().update_state(updates);
            Ok(CommandResult::Handled(format!(
                "Updated {} key(s) on '{}'",
                count, parts[0]
            )))
        }
        None => Ok(CommandResult::Handled(format!(
            "Agent '{}' not found",
            parts[0]
        ))),
    }
}

/// One `Agent(...)` line per registered agent
pub fn list_agents(orchestrator: &Orchestrator) -> String {
    if orchestrator.agent_count() == 0 {
        return "No agents registered.".to_string();
    }

    orchestrator
        .agents()
        .map(|agent| format!("  {:?}", agent.borrow()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ledger entries, one per line
pub fn format_results(orchestrator: &Orchestrator) -> String {
    let results = orchestrator.get_results();
    if results.is_empty() {
        return "No results yet.".to_string();
    }

    results
        .iter()
        .map(|(key, value)| format!("  {}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strings print as-is, anything else as pretty JSON
pub fn format_output(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

/// Generate help text
fn help_text() -> String {
    r#"OR-AF Commands:
─────────────────────────────────────────────
  help, ?                      Show this help message
  exit, quit, q                Exit OR-AF
  agents                       List registered agents
  run <agent> <task> [json]    Dispatch a task, e.g. run optimizer optimize {"data": [1, 2]}
  results                      Show the latest result per agent:task
  state <agent>                Show an agent's state
  set <agent> <json>           Merge a JSON object into an agent's state
  remove <agent>               Unregister the first agent with that name
  reset, clear                 Clear results and every agent's state
  status                       Show orchestrator summary

Keyboard Shortcuts:
  Ctrl+D           Exit OR-AF
─────────────────────────────────────────────"#
        .to_string()
}
