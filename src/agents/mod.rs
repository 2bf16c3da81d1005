//! Built-in agents
//!
//! Small concrete agents for a preprocess → optimize → report pipeline, an
//! echo agent for smoke tests, and a factory that builds them by kind.

mod echo;
mod optimize;
pub mod pipeline;
mod preprocess;
pub mod registry;
mod report;

pub use echo::EchoAgent;
pub use optimize::{OptimizationAgent, OptimizeParams, OptimizeResult};
pub use pipeline::run_pipeline;
pub use preprocess::{PreprocessParams, PreprocessResult, PreprocessingAgent};
pub use registry::{AgentKind, AgentSpec};
pub use report::{ReportParams, ReportingAgent};
