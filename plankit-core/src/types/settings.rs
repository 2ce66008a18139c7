use crate::types::ExtensionData;

pub const MAX_TOKENS_KEY: &str = "max_tokens";

/// One ranked backend configuration for a function.
///
/// Only `service_id` and `model_id` take part in selection; everything else is carried in
/// `extension_data` for the backend to interpret.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "ServiceId", alias = "serviceId")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "ModelId", alias = "modelId")]
    pub model_id: Option<String>,

    #[serde(flatten, default)]
    pub extension_data: ExtensionData,
}

impl ExecutionSettings {
    pub fn for_service(service_id: impl Into<String>) -> Self {
        Self {
            service_id: Some(service_id.into()),
            ..Self::default()
        }
    }

    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id.into()),
            ..Self::default()
        }
    }

    pub fn with_extension(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extension_data.insert(key.into(), value.into());
        self
    }

    /// The service id, if set and non-empty.
    pub fn service_id(&self) -> Option<&str> {
        self.service_id.as_deref().filter(|s| !s.is_empty())
    }

    /// The model id, if set and non-empty.
    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Neither a service nor a model is targeted.
    pub fn is_default(&self) -> bool {
        self.service_id().is_none() && self.model_id().is_none()
    }
}

/// The ordered backend configurations declared for one function.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FunctionExecutionConfig {
    pub execution_settings: Vec<ExecutionSettings>,
}

impl FunctionExecutionConfig {
    pub fn new(execution_settings: Vec<ExecutionSettings>) -> Self {
        Self { execution_settings }
    }

    pub fn candidates(&self) -> &[ExecutionSettings] {
        &self.execution_settings
    }

    /// The first configuration that targets neither a service nor a model.
    pub fn default_settings(&self) -> Option<&ExecutionSettings> {
        self.execution_settings.iter().find(|s| s.is_default())
    }

    /// Sets `max_tokens` on the default configuration.
    ///
    /// An empty list gains a fresh default configuration first. A non-empty list without a default
    /// configuration is left unchanged.
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        if self.execution_settings.is_empty() {
            self.execution_settings.push(ExecutionSettings::default());
        }
        if let Some(settings) = self.execution_settings.iter_mut().find(|s| s.is_default()) {
            settings
                .extension_data
                .insert(MAX_TOKENS_KEY.to_string(), max_tokens.into());
        }
    }
}
