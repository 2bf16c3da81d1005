//! Interactive REPL for OR-AF
//!
//! Reads commands from stdin and applies them to an orchestrator.

use std::io::{self, BufRead, Write};

use crate::agent::Orchestrator;
use crate::cli::commands::{handle_command, list_agents, CommandResult};
use crate::core::{Config, Result};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    orchestrator: Orchestrator,
}

impl Repl {
    /// Create a REPL around an existing orchestrator
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Create a REPL with the agents listed in `config`
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.build_orchestrator())
    }

    /// The orchestrator commands are applied to
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run the REPL until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("or-af> ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            match handle_command(&input, &mut self.orchestrator) {
                Ok(CommandResult::Exit) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(CommandResult::Handled(output)) => println!("{}\n", output),
                Ok(CommandResult::None) => continue,
                Err(e) => eprintln!("Error: {}\n", e),
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!("OR-AF: agent orchestration shell");
        println!("{}", self.orchestrator);
        println!("Agents:");
        println!("{}", list_agents(&self.orchestrator));
        println!();
        println!("Commands: help, agents, run, results, state, reset, exit");
        println!("─────────────────────────────────────────────────────────────");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentKind, AgentSpec};

    #[test]
    fn test_with_config_registers_default_roster() {
        let mut config = Config::default();
        config.set_name("Shell");
        let repl = Repl::with_config(&config);

        assert_eq!(repl.orchestrator().name(), "Shell");
        assert_eq!(repl.orchestrator().agent_count(), 4);
    }

    #[test]
    fn test_with_config_uses_custom_roster() {
        let mut config = Config::default();
        config.agents = vec![AgentSpec::named(AgentKind::Echo, "parrot")];
        let repl = Repl::with_config(&config);

        assert_eq!(repl.orchestrator().agent_names(), vec!["parrot"]);
    }
}
