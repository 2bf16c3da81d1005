//! Optimization agent
//!
//! Picks the mean of the data as the "optimal" solution and remembers the
//! last result in its state.

use serde::{Deserialize, Serialize};

use crate::agent::{AgentCore, TypedAgent};
use crate::core::Result;

/// Parameters for an optimization task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeParams {
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Output of an optimization task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeResult {
    pub optimal_solution: f64,
    pub status: String,
}

pub struct OptimizationAgent {
    core: AgentCore,
}

impl OptimizationAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_core(
            AgentCore::new(name)
                .with_description("Solves optimization problems")
                .with_capabilities(["linear_programming"]),
        )
    }

    pub fn with_core(core: AgentCore) -> Self {
        Self { core }
    }
}

impl TypedAgent for OptimizationAgent {
    type Params = OptimizeParams;
    type Output = OptimizeResult;

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn run(&mut self, _task: &str, params: OptimizeParams) -> Result<OptimizeResult> {
        let optimal_solution = if params.data.is_empty() {
            0.0
        } else {
            params.data.iter().sum::<f64>() / params.data.len() as f64
        };

        let result = OptimizeResult {
            optimal_solution,
            status: "optimal".to_string(),
        };
        self.core
            .set("last_result", serde_json::to_value(&result)?);

        Ok(result)
    }
}
