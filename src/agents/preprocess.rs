//! Data preprocessing agent

use serde::{Deserialize, Serialize};

use crate::agent::{AgentCore, TypedAgent};
use crate::core::Result;

/// Parameters for a preprocessing task
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreprocessParams {
    /// Raw data points; missing means an empty data set
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Output of a preprocessing task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessResult {
    pub preprocessed_data: Vec<f64>,
}

/// Scales every data point by a fixed factor
pub struct PreprocessingAgent {
    core: AgentCore,
    factor: f64,
}

impl PreprocessingAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_core(
            AgentCore::new(name)
                .with_description("Cleans and normalizes raw data")
                .with_capabilities(["data_cleaning", "normalization"]),
        )
    }

    pub fn with_core(core: AgentCore) -> Self {
        Self { core, factor: 2.0 }
    }

    /// Override the scale factor (default 2)
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }
}

impl TypedAgent for PreprocessingAgent {
    type Params = PreprocessParams;
    type Output = PreprocessResult;

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn run(&mut self, _task: &str, params: PreprocessParams) -> Result<PreprocessResult> {
        let preprocessed_data = params.data.iter().map(|x| x * self.factor).collect();
        Ok(PreprocessResult { preprocessed_data })
    }
}
