//! OR-AF - a small agent orchestration framework
//!
//! Agents are units that perform named tasks and keep a private key/value
//! state. An orchestrator registers agents by name, dispatches tasks to them
//! and records the latest result of every `agent:task` pair.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Agent**: The agent contract, typed agents, and the orchestrator
//! - **Agents**: Built-in agents and a factory that builds them by kind
//! - **CLI**: Interactive REPL
//!
//! # Usage
//!
//! ```rust
//! use or_af::agents::EchoAgent;
//! use or_af::{Orchestrator, Params};
//!
//! let mut orchestrator = Orchestrator::new("demo");
//! orchestrator.register(EchoAgent::new("echo"));
//!
//! let result = orchestrator.execute_task("echo", "ping", Params::new()).unwrap();
//! assert_eq!(result, "ping");
//! assert_eq!(orchestrator.get_results()["echo:ping"], "ping");
//! ```

pub mod agent;
pub mod agents;
pub mod cli;
pub mod core;

// Re-export commonly used items
pub use self::agent::{Agent, AgentCore, AgentRef, Orchestrator, TypedAgent};
pub use self::cli::Repl;
pub use self::core::{Config, Ledger, OrafError, Params, Result, State, TaskOutput};
