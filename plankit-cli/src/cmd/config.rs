use std::path::Path;

use plankit_core::config::from_str_auto;
use plankit_core::{ExecutionSettings, ModelService, ParserConfig, StaticRegistry};
use serde::de::DeserializeOwned;

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// A backend entry from a services manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "service_id")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "model_id")]
    pub model_id: Option<String>,
}

impl ModelService for ServiceEntry {
    fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }
}

pub fn read_file(path: &Path, what: &str, output: &OutputArgs) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) => {
            print_error(
                output,
                exit_codes::RUNTIME_ERROR,
                &format!("failed to read {what} {}: {e}", path.display()),
            );
            None
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path, what: &str, output: &OutputArgs) -> Option<T> {
    let content = read_file(path, what, output)?;
    match from_str_auto(&content) {
        Ok(v) => Some(v),
        Err(e) => {
            print_error(
                output,
                exit_codes::RUNTIME_ERROR,
                &format!("invalid {what} {}: {e}", path.display()),
            );
            None
        }
    }
}

pub fn load_registry(path: &Path, output: &OutputArgs) -> Option<StaticRegistry> {
    let content = read_file(path, "function manifest", output)?;
    match StaticRegistry::from_manifest_str(&content) {
        Ok(r) => {
            tracing::debug!(
                path = %path.display(),
                callables = r.len(),
                "loaded function manifest"
            );
            Some(r)
        }
        Err(e) => {
            print_error(
                output,
                exit_codes::RUNTIME_ERROR,
                &format!("invalid function manifest {}: {e}", path.display()),
            );
            None
        }
    }
}

pub fn load_parser_config(path: Option<&Path>, output: &OutputArgs) -> Option<ParserConfig> {
    match path {
        None => Some(ParserConfig::default()),
        Some(p) => load(p, "parser config", output),
    }
}

pub fn load_settings(path: &Path, output: &OutputArgs) -> Option<Vec<ExecutionSettings>> {
    load(path, "settings file", output)
}

pub fn load_services(path: &Path, output: &OutputArgs) -> Option<Vec<ServiceEntry>> {
    load(path, "services manifest", output)
}
