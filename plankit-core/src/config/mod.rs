use serde::de::DeserializeOwned;

use crate::error::ConfigError;

pub const DEFAULT_SOLUTION_TAG: &str = "plan";
pub const DEFAULT_GOAL_TAG: &str = "goal";
pub const DEFAULT_CALL_PREFIX: &str = "function.";
pub const DEFAULT_SET_VARIABLE_ATTRIBUTE: &str = "setContextVariable";
pub const DEFAULT_APPEND_TO_RESULT_ATTRIBUTE: &str = "appendToResult";

/// Markup vocabulary and tolerance switches for the plan parser.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// Tag name of the element whose children are the plan's steps.
    pub solution_tag: String,
    /// Tag name of the element carrying the goal text.
    pub goal_tag: String,
    /// Tag prefix marking a call step, followed by `namespace.name`.
    pub call_prefix: String,
    /// Attribute binding a step's output to a variable.
    pub set_variable_attribute: String,
    /// Attribute binding a step's output to a variable and to the plan result.
    pub append_to_result_attribute: String,
    /// Emit placeholder steps for callables the resolver does not know.
    pub allow_missing: bool,
    /// Keep non-blank text inside the solution element as text steps.
    pub capture_text: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            solution_tag: DEFAULT_SOLUTION_TAG.to_string(),
            goal_tag: DEFAULT_GOAL_TAG.to_string(),
            call_prefix: DEFAULT_CALL_PREFIX.to_string(),
            set_variable_attribute: DEFAULT_SET_VARIABLE_ATTRIBUTE.to_string(),
            append_to_result_attribute: DEFAULT_APPEND_TO_RESULT_ATTRIBUTE.to_string(),
            allow_missing: false,
            capture_text: false,
        }
    }
}

impl ParserConfig {
    pub fn allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    pub fn capture_text(mut self, capture: bool) -> Self {
        self.capture_text = capture;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Auto,
}

pub fn from_str_with<T: DeserializeOwned>(
    input: &str,
    format: ConfigFormat,
) -> Result<T, ConfigError> {
    match format {
        ConfigFormat::Json => Ok(serde_json::from_str(input)?),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(input)?),
        ConfigFormat::Auto => from_str_auto(input),
    }
}

/// Decodes JSON or YAML, choosing by the first non-blank character.
pub fn from_str_auto<T: DeserializeOwned>(input: &str) -> Result<T, ConfigError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(input) {
            Ok(v) => Ok(v),
            // Flow-style YAML also starts with a bracket.
            Err(e) => serde_yaml::from_str(input).map_err(|_| ConfigError::Json(e)),
        };
    }

    match serde_yaml::from_str(input) {
        Ok(v) => Ok(v),
        Err(e) => serde_json::from_str(input).map_err(|_| ConfigError::Yaml(e)),
    }
}
