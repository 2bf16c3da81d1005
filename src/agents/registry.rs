//! Agent factory
//!
//! Builds built-in agents from a declarative [`AgentSpec`], so a roster can
//! live in the config file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agent::{shared, AgentCore, AgentRef};
use crate::agents::{EchoAgent, OptimizationAgent, PreprocessingAgent, ReportingAgent};
use crate::core::{OrafError, Result};

/// Kind of built-in agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Returns the task name
    Echo,
    /// Scales raw data
    Preprocessor,
    /// Computes a solution from data
    Optimizer,
    /// Renders results as text
    Reporter,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Echo,
        AgentKind::Preprocessor,
        AgentKind::Optimizer,
        AgentKind::Reporter,
    ];

    /// Capability tags given to agents of this kind when none are configured
    pub fn default_capabilities(&self) -> &'static [&'static str] {
        match self {
            AgentKind::Echo => &["echo"],
            AgentKind::Preprocessor => &["data_cleaning", "normalization"],
            AgentKind::Optimizer => &["linear_programming"],
            AgentKind::Reporter => &["report_generation"],
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Echo => write!(f, "echo"),
            AgentKind::Preprocessor => write!(f, "preprocessor"),
            AgentKind::Optimizer => write!(f, "optimizer"),
            AgentKind::Reporter => write!(f, "reporter"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = OrafError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Ok(AgentKind::Echo),
            "preprocessor" | "preprocess" => Ok(AgentKind::Preprocessor),
            "optimizer" | "optimize" => Ok(AgentKind::Optimizer),
            "reporter" | "report" => Ok(AgentKind::Reporter),
            other => Err(OrafError::config(format!(
                "Unknown agent kind '{}'. Available: echo, preprocessor, optimizer, reporter",
                other
            ))),
        }
    }
}

/// Declarative description of an agent to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub kind: AgentKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Capability tags; empty means the kind's defaults
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl AgentSpec {
    /// Spec named after its kind with default capabilities
    pub fn new(kind: AgentKind) -> Self {
        Self::named(kind, kind.to_string())
    }

    pub fn named(kind: AgentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: String::new(),
            capabilities: Vec::new(),
        }
    }

    fn core(&self) -> AgentCore {
        let core = AgentCore::new(&self.name).with_description(&self.description);
        if self.capabilities.is_empty() {
            core.with_capabilities(self.kind.default_capabilities().iter().copied())
        } else {
            core.with_capabilities(self.capabilities.iter().cloned())
        }
    }

    /// Construct the agent and wrap it in a shared handle
    pub fn build(&self) -> AgentRef {
        let core = self.core();
        match self.kind {
            AgentKind::Echo => shared(EchoAgent::with_core(core)),
            AgentKind::Preprocessor => shared(PreprocessingAgent::with_core(core)),
            AgentKind::Optimizer => shared(OptimizationAgent::with_core(core)),
            AgentKind::Reporter => shared(ReportingAgent::with_core(core)),
        }
    }
}

/// The default roster: the demo pipeline plus an echo agent
pub fn default_roster() -> Vec<AgentSpec> {
    AgentKind::ALL.iter().map(|kind| AgentSpec::new(*kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::core::Params;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Optimizer".parse::<AgentKind>().unwrap(), AgentKind::Optimizer);
        assert_eq!("report".parse::<AgentKind>().unwrap(), AgentKind::Reporter);
        assert!("solver".parse::<AgentKind>().is_err());
    }

    #[test]
    fn test_build_uses_default_capabilities() {
        let agent = AgentSpec::new(AgentKind::Preprocessor).build();
        let agent = agent.borrow();
        assert_eq!(agent.name(), "preprocessor");
        assert_eq!(agent.capabilities(), ["data_cleaning", "normalization"]);
    }

    #[test]
    fn test_build_respects_configured_fields() {
        let mut spec = AgentSpec::named(AgentKind::Echo, "parrot");
        spec.description = "Repeats things".to_string();
        spec.capabilities = vec!["mimicry".to_string()];

        let agent = spec.build();
        let mut agent = agent.borrow_mut();
        assert_eq!(agent.description(), "Repeats things");
        assert_eq!(agent.capabilities(), ["mimicry"]);
        assert_eq!(agent.execute("hello", Params::new()).unwrap(), "hello");
    }

    #[test]
    fn test_default_roster_names() {
        let names: Vec<String> = default_roster().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["echo", "preprocessor", "optimizer", "reporter"]);
    }
}
