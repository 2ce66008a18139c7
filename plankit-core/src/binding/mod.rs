use indexmap::IndexMap;

use crate::config::ParserConfig;
use crate::types::{InputValue, ParameterMetadata};

/// Attribute names that bind a step's output instead of supplying an input.
#[derive(Debug, Clone, Copy)]
pub struct ReservedAttributes<'a> {
    pub set_variable: &'a str,
    pub append_to_result: &'a str,
}

impl<'a> ReservedAttributes<'a> {
    pub fn from_config(config: &'a ParserConfig) -> Self {
        Self {
            set_variable: &config.set_variable_attribute,
            append_to_result: &config.append_to_result_attribute,
        }
    }

    fn classify(&self, attribute: &str) -> AttributeRole {
        if attribute.eq_ignore_ascii_case(self.set_variable) {
            AttributeRole::SetVariable
        } else if attribute.eq_ignore_ascii_case(self.append_to_result) {
            AttributeRole::AppendToResult
        } else {
            AttributeRole::Input
        }
    }
}

enum AttributeRole {
    Input,
    SetVariable,
    AppendToResult,
}

/// Final inputs and output sinks for one call step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepBindings {
    pub inputs: IndexMap<String, InputValue>,
    pub outputs: Vec<String>,
    pub contributes_to_result: Vec<String>,
}

/// Seeds inputs with declared defaults, then overlays attributes in document order.
///
/// Parameters without a default are not seeded. Input keys compare case-insensitively: an
/// attribute matching an existing key replaces its value in place and keeps the existing
/// spelling; new names are appended.
pub fn bind_step<'v, I>(
    parameters: &[ParameterMetadata],
    attributes: I,
    reserved: ReservedAttributes<'_>,
) -> StepBindings
where
    I: IntoIterator<Item = (&'v str, &'v str)>,
{
    let mut out = StepBindings::default();

    for p in parameters {
        if let Some(default) = &p.default {
            out.inputs
                .insert(p.name.clone(), InputValue::from_raw(default.as_str()));
        }
    }

    for (name, value) in attributes {
        match reserved.classify(name) {
            AttributeRole::SetVariable => out.outputs.push(value.to_string()),
            AttributeRole::AppendToResult => {
                out.outputs.push(value.to_string());
                out.contributes_to_result.push(value.to_string());
            }
            AttributeRole::Input => {
                let value = InputValue::from_raw(value);
                match out.inputs.keys().position(|k| k.eq_ignore_ascii_case(name)) {
                    Some(index) => out.inputs[index] = value,
                    None => {
                        out.inputs.insert(name.to_string(), value);
                    }
                }
            }
        }
    }

    out
}
