//! Typed agents
//!
//! Agents whose parameter and output shapes are known can implement
//! [`TypedAgent`] instead of [`Agent`]. The blanket impl decodes the opaque
//! JSON parameters into `Self::Params` and encodes `Self::Output` back, so the
//! orchestrator still only sees JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::agent::base::{Agent, AgentCore};
use crate::core::{OrafError, Params, Result, TaskOutput};

/// An agent with statically known parameter and output types
pub trait TypedAgent {
    /// Parameters decoded from the task's keyword arguments.
    ///
    /// Use `#[serde(default)]` on fields that may be omitted.
    type Params: DeserializeOwned;

    type Output: Serialize;

    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    fn run(&mut self, task: &str, params: Self::Params) -> Result<Self::Output>;
}

impl<T: TypedAgent> Agent for T {
    fn core(&self) -> &AgentCore {
        TypedAgent::core(self)
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        TypedAgent::core_mut(self)
    }

    fn execute(&mut self, task: &str, params: Params) -> Result<TaskOutput> {
        let params: T::Params = serde_json::from_value(Value::Object(params)).map_err(|e| {
            OrafError::invalid_params(TypedAgent::core(self).name(), task, e.to_string())
        })?;

        let output = self.run(task, params)?;
        Ok(serde_json::to_value(output)?)
    }
}
