//! Demo pipeline: preprocess → optimize → report
//!
//! Drives three agents through the orchestrator so every step lands in the
//! ledger.

use serde_json::{json, Value};

use crate::agent::Orchestrator;
use crate::core::{params_from_value, OrafError, Result};

pub const PREPROCESSOR: &str = "preprocessor";
pub const OPTIMIZER: &str = "optimizer";
pub const REPORTER: &str = "reporter";

/// Run the pipeline over `raw_data` and return the rendered report
pub fn run_pipeline(orchestrator: &mut Orchestrator, raw_data: &[f64]) -> Result<String> {
    let preprocessed = orchestrator.execute_task(
        PREPROCESSOR,
        "preprocess",
        params_from_value(json!({ "data": raw_data })),
    )?;

    let data = preprocessed
        .get("preprocessed_data")
        .cloned()
        .ok_or_else(|| {
            OrafError::execution(PREPROCESSOR, "preprocess", "missing 'preprocessed_data'")
        })?;

    let optimization = orchestrator.execute_task(
        OPTIMIZER,
        "optimize",
        params_from_value(json!({ "data": data })),
    )?;

    let report = orchestrator.execute_task(
        REPORTER,
        "generate_report",
        params_from_value(json!({
            "results": {
                "raw_data": raw_data,
                "preprocessed": preprocessed,
                "optimization": optimization,
            }
        })),
    )?;

    match report {
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}
