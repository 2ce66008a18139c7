use std::collections::BTreeMap;

/// Opaque execution parameters attached to a backend configuration.
///
/// Keys the core does not understand are kept verbatim and handed to the backend untouched.
pub type ExtensionData = BTreeMap<String, serde_json::Value>;
