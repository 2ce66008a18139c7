use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::ExecutionSettings;

static VARIABLE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([A-Za-z_][A-Za-z0-9_]*)$").expect("valid"));

/// Identity of a step, unique within the plan it was parsed into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StepId(pub usize);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Root of a plan; owns the ordered child steps.
    Goal,
    /// Invocation of a callable unit.
    Call,
    /// Free text captured from the solution element.
    Text,
}

/// A bound input value. Values stay uninterpreted text; `$name` marks a variable reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputValue {
    Literal(String),
    Variable(String),
}

impl InputValue {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match VARIABLE_REF_RE.captures(&raw) {
            Some(cap) => Self::Variable(cap[1].to_string()),
            None => Self::Literal(raw),
        }
    }

    /// The text as it appeared in the plan.
    pub fn as_raw(&self) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Variable(name) => format!("${name}"),
        }
    }

    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl From<String> for InputValue {
    fn from(raw: String) -> Self {
        Self::from_raw(raw)
    }
}

impl From<&str> for InputValue {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<InputValue> for String {
    fn from(value: InputValue) -> Self {
        value.as_raw()
    }
}

impl PartialEq<&str> for InputValue {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Self::Literal(s) => s == other,
            Self::Variable(name) => other.strip_prefix('$') == Some(name.as_str()),
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Variable(name) => write!(f, "${name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub id: StepId,

    pub kind: StepKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Free text for goal and text steps.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, InputValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "contributesToResult")]
    pub contributes_to_result: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Step>,

    /// Ranked backend configurations inherited from the callable, consumed by the selector.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "executionSettings")]
    pub execution_settings: Vec<ExecutionSettings>,

    /// Placeholder for a callable that could not be resolved at parse time.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub missing: bool,
}

impl Step {
    fn empty(id: StepId, kind: StepKind) -> Self {
        Self {
            id,
            kind,
            namespace: String::new(),
            name: String::new(),
            description: String::new(),
            inputs: IndexMap::new(),
            outputs: Vec::new(),
            contributes_to_result: Vec::new(),
            children: Vec::new(),
            execution_settings: Vec::new(),
            missing: false,
        }
    }

    pub fn call(id: StepId, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Self::empty(id, StepKind::Call)
        }
    }

    pub fn placeholder(id: StepId, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            missing: true,
            ..Self::call(id, namespace, name)
        }
    }

    pub fn text(id: StepId, content: impl Into<String>) -> Self {
        Self {
            description: content.into(),
            ..Self::empty(id, StepKind::Text)
        }
    }

    pub fn goal(id: StepId, goal: impl Into<String>, children: Vec<Step>) -> Self {
        Self {
            description: goal.into(),
            children,
            ..Self::empty(id, StepKind::Goal)
        }
    }

    pub fn is_call(&self) -> bool {
        self.kind == StepKind::Call
    }

    /// `namespace.name`, or just `name` when the namespace is empty.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}
