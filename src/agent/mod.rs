//! Agent module - the agent contract and the orchestrator
//!
//! Contains the trait every agent implements, the typed-parameter adapter
//! and the registry that dispatches tasks to agents by name.

pub mod base;
pub mod orchestrator;
pub mod typed;

pub use base::{shared, Agent, AgentCore, AgentRef, BaseAgent};
pub use orchestrator::Orchestrator;
pub use typed::TypedAgent;
