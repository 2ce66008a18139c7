use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::types::CallableMetadata;

/// Resolves a `(namespace, name)` pair from a plan to the callable it names.
pub trait CallableResolver {
    fn resolve(&self, namespace: &str, name: &str) -> Option<CallableMetadata>;
}

impl<F> CallableResolver for F
where
    F: Fn(&str, &str) -> Option<CallableMetadata>,
{
    fn resolve(&self, namespace: &str, name: &str) -> Option<CallableMetadata> {
        self(namespace, name)
    }
}

/// In-memory callable table. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    callables: BTreeMap<(String, String), CallableMetadata>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callable, replacing any earlier one with the same identity.
    pub fn register(&mut self, callable: CallableMetadata) -> &mut Self {
        let key = registry_key(&callable.namespace, &callable.name);
        self.callables.insert(key, callable);
        self
    }

    pub fn with(mut self, callable: CallableMetadata) -> Self {
        self.register(callable);
        self
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallableMetadata> {
        self.callables.values()
    }

    /// Loads a manifest: a JSON or YAML list of callables.
    pub fn from_manifest_str(input: &str) -> Result<Self, ConfigError> {
        let callables: Vec<CallableMetadata> = crate::config::from_str_auto(input)?;
        Ok(callables.into_iter().collect())
    }
}

impl FromIterator<CallableMetadata> for StaticRegistry {
    fn from_iter<I: IntoIterator<Item = CallableMetadata>>(iter: I) -> Self {
        let mut registry = Self::new();
        for callable in iter {
            registry.register(callable);
        }
        registry
    }
}

impl CallableResolver for StaticRegistry {
    fn resolve(&self, namespace: &str, name: &str) -> Option<CallableMetadata> {
        self.callables.get(&registry_key(namespace, name)).cloned()
    }
}

fn registry_key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_ascii_lowercase(), name.to_ascii_lowercase())
}
