#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared types and constants for the lettamem memory-retrieval core.
//!
//! Everything that crosses crate boundaries lives here: the `MemoryBlock`
//! record fetched from the Letta service, the `Settings` profile persisted
//! by the extension, and the `KeyValueStore` seam over whatever key-value
//! persistence the host environment provides.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Base URL of the hosted Letta API.
pub const LETTA_API_BASE_URL: &str = "https://api.letta.com";

/// Model identifier used when the user has not picked one.
pub const DEFAULT_MODEL: &str = "letta/letta-free";

/// Namespaced key under which the whole settings record is persisted.
pub const SETTINGS_KEY: &str = "letta_settings";

/// Marker emitted before injected memory content.
pub const MEMORY_HEADER: &str = "--- Relevant memories from previous conversations ---";

/// Marker emitted after injected memory content.
pub const MEMORY_FOOTER: &str = "--- End of memories ---";

/// Reserved memory category describing interaction style. Blocks with this
/// label are meta-information and are never searchable or injectable.
pub const CONVERSATION_PATTERNS_LABEL: &str = "conversation_patterns";

/// A labeled unit of persistent contextual text attached to an agent.
///
/// Blocks are owned by the Letta service; this core only reads them.
/// Unknown response fields are ignored and a missing `value` deserializes
/// as the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryBlock {
    pub id: String,
    /// Category key, e.g. `user_context`, `facts`.
    pub label: String,
    /// Free text; may be empty or whitespace-only.
    #[serde(default)]
    pub value: String,
}

/// The full set of user-configurable options.
///
/// Every field has a default, so a settings profile is always fully
/// populated no matter how little has been persisted. Serialized with
/// camelCase field names to stay compatible with the record the browser
/// extension stores under [`SETTINGS_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Letta API credential. Empty until the user configures one.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "Settings::default_base_url")]
    pub base_url: String,
    #[serde(default = "Settings::default_model")]
    pub model: String,
    /// Agent whose core memory is fetched. Empty means "not selected yet".
    #[serde(default)]
    pub agent_id: String,
    /// Verbose logging toggle consumed by the extension surfaces.
    #[serde(default)]
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            agent_id: String::new(),
            debug: false,
        }
    }
}

impl Settings {
    fn default_base_url() -> String {
        LETTA_API_BASE_URL.to_string()
    }

    fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }
}

/// A partial settings update. `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl SettingsPatch {
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Apply this patch to a settings record. Fields left `None` keep
    /// their previous value verbatim.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(api_key) = self.api_key {
            settings.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(agent_id) = self.agent_id {
            settings.agent_id = agent_id;
        }
        if let Some(debug) = self.debug {
            settings.debug = debug;
        }
    }

    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.base_url.is_none()
            && self.model.is_none()
            && self.agent_id.is_none()
            && self.debug.is_none()
    }
}

/// Asynchronous key-value persistence collaborator.
///
/// The browser extension backs this with `chrome.storage.sync`; the CLI
/// backs it with a JSON file. The settings store only ever addresses the
/// single [`SETTINGS_KEY`] entry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<serde_json::Value>>;
    async fn set(&self, key: &str, value: serde_json::Value) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_fully_populated() {
        let settings = Settings::default();
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.base_url, LETTA_API_BASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.agent_id, "");
        assert!(!settings.debug);
    }

    #[test]
    fn settings_deserialize_missing_fields_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"apiKey": "test-key"}"#).expect("partial record");
        assert_eq!(settings.api_key, "test-key");
        assert_eq!(settings.base_url, LETTA_API_BASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(Settings::default()).expect("serialize");
        assert!(json.get("apiKey").is_some());
        assert!(json.get("baseUrl").is_some());
        assert!(json.get("agentId").is_some());
    }

    #[test]
    fn patch_apply_only_touches_named_fields() {
        let mut settings = Settings::default();
        SettingsPatch::default()
            .with_api_key("new-key")
            .with_debug(true)
            .apply(&mut settings);

        assert_eq!(settings.api_key, "new-key");
        assert!(settings.debug);
        assert_eq!(settings.base_url, LETTA_API_BASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn memory_block_tolerates_missing_value() {
        let block: MemoryBlock =
            serde_json::from_str(r#"{"id": "block-1", "label": "facts"}"#).expect("block");
        assert_eq!(block.value, "");
    }

    #[test]
    fn base_url_constant_matches_service() {
        assert_eq!(LETTA_API_BASE_URL, "https://api.letta.com");
    }
}
