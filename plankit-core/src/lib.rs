#![forbid(unsafe_code)]

pub mod binding;
pub mod config;
pub mod error;
pub mod parser;
pub mod registry;
pub mod selector;
pub mod types;

pub use crate::binding::{bind_step, ReservedAttributes, StepBindings};
pub use crate::config::{ConfigFormat, ParserConfig};
pub use crate::error::{
    ConfigError, MissingCallableError, PlanError, PlanFormatError, SelectionError,
};
pub use crate::parser::parse_plan;
pub use crate::registry::{CallableResolver, StaticRegistry};
pub use crate::selector::{
    select_service, ModelService, OrderedServiceSelector, Selection, ServiceProvider,
    ServiceRegistry, ServiceSelector,
};
pub use crate::types::{
    CallableMetadata, ExecutionSettings, FunctionExecutionConfig, InputValue, ParameterMetadata,
    Plan, PlanBuilder, Step, StepId, StepKind,
};
