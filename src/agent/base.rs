//! The agent contract
//!
//! Every agent carries an [`AgentCore`] (identity, capabilities and a private
//! state bag) and implements [`Agent::execute`]. Anything implementing the
//! trait can be registered with an [`Orchestrator`](crate::agent::Orchestrator).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::core::{OrafError, Params, Result, State, TaskOutput};

/// Shared handle to a registered agent.
///
/// The orchestrator and the caller may both hold one; state changes made
/// through either are visible to the other.
pub type AgentRef = Rc<RefCell<dyn Agent>>;

/// Wrap an agent into a shared handle
pub fn shared<A: Agent + 'static>(agent: A) -> AgentRef {
    Rc::new(RefCell::new(agent))
}

/// Identity, capabilities and state common to every agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCore {
    name: String,
    description: String,
    capabilities: Vec<String>,
    state: State,
}

impl AgentCore {
    /// Create a core with the given name, no description and no capabilities
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            capabilities: Vec::new(),
            state: State::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the capability tags, preserving their order
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> State {
        self.state.clone()
    }

    /// Read a single state entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Merge `updates` into the state; later keys overwrite earlier ones
    pub fn update_state(&mut self, updates: State) {
        self.state.extend(updates);
    }

    /// Set a single state entry
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.state.insert(key.into(), value);
    }

    /// Empty the state
    pub fn reset(&mut self) {
        self.state.clear();
    }
}

impl fmt::Display for AgentCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capabilities = self
            .capabilities
            .iter()
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Agent(name='{}', capabilities=[{}])",
            self.name, capabilities
        )
    }
}

/// An autonomous unit that performs named tasks.
///
/// Implementors only have to expose their [`AgentCore`] and override
/// [`execute`](Agent::execute); the state operations come for free.
pub trait Agent {
    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    /// Run `task` with the given parameters.
    ///
    /// The default body reports [`OrafError::Unimplemented`]; concrete
    /// agents are expected to override it.
    fn execute(&mut self, task: &str, params: Params) -> Result<TaskOutput> {
        let _ = (task, params);
        Err(OrafError::unimplemented(self.core().name()))
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn description(&self) -> &str {
        self.core().description()
    }

    fn capabilities(&self) -> &[String] {
        self.core().capabilities()
    }

    /// Copy of the current state; mutating it does not touch the agent
    fn get_state(&self) -> State {
        self.core().get_state()
    }

    fn update_state(&mut self, updates: State) {
        self.core_mut().update_state(updates);
    }

    /// Clear all state. Idempotent.
    fn reset(&mut self) {
        self.core_mut().reset();
    }
}

impl fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.core(), f)
    }
}

impl fmt::Display for dyn Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.core(), f)
    }
}

/// An agent with no task logic of its own
#[derive(Debug, Clone)]
pub struct BaseAgent {
    core: AgentCore,
}

impl BaseAgent {
    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }
}

impl Agent for BaseAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }
}
