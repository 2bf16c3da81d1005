//! Echo agent
//!
//! Returns the task name unchanged. Useful for wiring checks.

use serde_json::Value;

use crate::agent::{Agent, AgentCore};
use crate::core::{Params, Result, TaskOutput};

/// Agent that answers every task with the task name itself
pub struct EchoAgent {
    core: AgentCore,
}

impl EchoAgent {
    /// Create an echo agent with the default capability tag
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_core(AgentCore::new(name).with_capabilities(["echo"]))
    }

    pub fn with_core(core: AgentCore) -> Self {
        Self { core }
    }
}

impl Agent for EchoAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn execute(&mut self, task: &str, _params: Params) -> Result<TaskOutput> {
        self.core.set("last_task", Value::from(task));
        Ok(Value::from(task))
    }
}
