use crate::types::ExecutionSettings;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "defaultValue", alias = "default_value")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            description: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// What the parser needs to know about a callable unit: identity and declared parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallableMetadata {
    #[serde(default, alias = "plugin", alias = "pluginName")]
    pub namespace: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,

    /// Ranked backend configurations, most preferred first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "executionSettings", alias = "execution_settings")]
    pub execution_settings: Vec<ExecutionSettings>,
}

impl CallableMetadata {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
            execution_settings: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterMetadata) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_execution_settings(mut self, settings: ExecutionSettings) -> Self {
        self.execution_settings.push(settings);
        self
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}
