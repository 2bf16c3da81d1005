//! Reporting agent
//!
//! Turns a map of named results into a plain-text report.

use serde::Deserialize;
use serde_json::Value;

use crate::agent::{AgentCore, TypedAgent};
use crate::core::{Params, Result};

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub results: Params,
}

pub struct ReportingAgent {
    core: AgentCore,
}

impl ReportingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_core(
            AgentCore::new(name)
                .with_description("Generates reports from pipeline results")
                .with_capabilities(["report_generation"]),
        )
    }

    pub fn with_core(core: AgentCore) -> Self {
        Self { core }
    }
}

impl TypedAgent for ReportingAgent {
    type Params = ReportParams;
    type Output = String;

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn run(&mut self, _task: &str, params: ReportParams) -> Result<String> {
        let mut report = format!("Report:\n{}\n", "-".repeat(RULE_WIDTH));
        for (key, value) in &params.results {
            report.push_str(&format!("{}: {}\n", key, render(value)));
        }
        Ok(report)
    }
}

/// Strings print bare, everything else as compact JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
