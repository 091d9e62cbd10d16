use lettamem_core::{LETTA_API_BASE_URL, MemoryBlock};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// An agent visible to the configured credential.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Thin HTTP wrapper over the Letta memory service.
///
/// Holds one connection pool per instance, which is why instances are
/// cached per credential by [`crate::get_client`]. Transport concerns stop
/// at bearer auth and status checking; there is no retry or backoff here.
pub struct LettaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LettaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: LETTA_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a self-hosted Letta deployment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// An empty key can never authenticate, so fail before the request.
    /// Key format beyond that is not validated; a bad key surfaces as an
    /// authentication failure from the service.
    fn require_api_key(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(())
    }

    /// List the agents this credential can see.
    pub async fn list_agents(&self) -> Result<Vec<AgentSummary>> {
        self.require_api_key()?;
        info!("Listing agents from Letta API");
        let value = self
            .client
            .get(format!("{}/v1/agents/", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let agents: Vec<AgentSummary> = serde_json::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("agent list: {e}")))?;
        debug!("Letta API returned {} agents", agents.len());
        Ok(agents)
    }

    /// Fetch the current core memory blocks of an agent.
    pub async fn list_memory_blocks(&self, agent_id: &str) -> Result<Vec<MemoryBlock>> {
        self.require_api_key()?;
        info!("Fetching core memory blocks for agent {agent_id}");
        let value = self
            .client
            .get(format!(
                "{}/v1/agents/{agent_id}/core-memory/blocks",
                self.base_url
            ))
            .bearer_auth(&self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let blocks: Vec<MemoryBlock> = serde_json::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("memory blocks: {e}")))?;
        debug!("Letta API returned {} memory blocks", blocks.len());
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_client_uses_the_fixed_base_url() {
        let client = LettaClient::new("test-key");
        assert_eq!(client.base_url(), LETTA_API_BASE_URL);
    }

    #[test]
    fn with_base_url_overrides_the_default() {
        let client = LettaClient::new("test-key").with_base_url("http://localhost:8283");
        assert_eq!(client.base_url(), "http://localhost:8283");
    }

    #[test]
    fn memory_block_payload_ignores_unknown_fields() {
        let payload = json!([
            {
                "id": "block-1",
                "label": "user_context",
                "value": "Works on React",
                "limit": 5000,
                "created_at": "2024-01-01T00:00:00Z"
            },
            {"id": "block-2", "label": "facts"}
        ]);

        let blocks: Vec<MemoryBlock> = serde_json::from_value(payload).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, "user_context");
        assert_eq!(blocks[1].value, "");
    }

    #[tokio::test]
    async fn empty_api_key_fails_before_any_request() {
        let client = LettaClient::new("");
        assert!(matches!(client.list_agents().await, Err(Error::MissingApiKey)));
        assert!(matches!(
            client.list_memory_blocks("agent-1").await,
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn agent_list_payload_decodes() {
        let payload = json!([{"id": "agent-1", "name": "helper", "model": "letta/letta-free"}]);
        let agents: Vec<AgentSummary> = serde_json::from_value(payload).unwrap();
        assert_eq!(agents[0].id, "agent-1");
        assert_eq!(agents[0].name, "helper");
    }
}
