use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Format(#[from] PlanFormatError),
    #[error(transparent)]
    MissingCallable(#[from] MissingCallableError),
}

#[derive(Debug, Error)]
pub enum PlanFormatError {
    #[error("failed to parse plan markup: {source}")]
    Markup {
        text: String,
        #[source]
        source: roxmltree::Error,
    },
    #[error("failed to parse plan markup after recovery: {source}")]
    Recovered {
        text: String,
        recovered: String,
        #[source]
        source: roxmltree::Error,
    },
    #[error("call step `{tag}` does not name a function (expected `<prefix><namespace>.<name>`)")]
    InvalidCallTag { tag: String },
}

impl PlanFormatError {
    /// The raw text handed to the parser.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Markup { text, .. } | Self::Recovered { text, .. } => Some(text),
            Self::InvalidCallTag { .. } => None,
        }
    }

    /// The salvaged region, when recovery found one.
    pub fn recovered(&self) -> Option<&str> {
        match self {
            Self::Recovered { recovered, .. } => Some(recovered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to find function '{name}' in namespace '{namespace}'")]
pub struct MissingCallableError {
    pub namespace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{}", no_backend_message(.capability, .service_ids))]
    NoBackendAvailable {
        capability: String,
        service_ids: Vec<String>,
    },
}

fn no_backend_message(capability: &str, service_ids: &[String]) -> String {
    if service_ids.is_empty() {
        format!("service of type {capability} not registered")
    } else {
        format!(
            "service of type {capability} and names {} not registered",
            service_ids.join("|")
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
