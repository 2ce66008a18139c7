mod callable;
mod common;
mod plan;
mod settings;
mod step;

pub use callable::{CallableMetadata, ParameterMetadata};
pub use common::ExtensionData;
pub use plan::{Plan, PlanBuilder};
pub use settings::{ExecutionSettings, FunctionExecutionConfig, MAX_TOKENS_KEY};
pub use step::{InputValue, Step, StepId, StepKind};
