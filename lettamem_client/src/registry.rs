use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use tracing::info;

use crate::client::LettaClient;

/// One client per distinct API key, for the lifetime of the process.
/// Entries are never re-keyed or evicted.
static CLIENTS: Lazy<Mutex<HashMap<String, Arc<LettaClient>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get the shared client for an API key, constructing it on first use.
///
/// Repeated calls with the same key return the same instance, so the
/// connection pool and any per-credential state inside the client are
/// shared across callers. A different key always yields a distinct
/// instance. The key's format is not validated here; a bad key surfaces
/// later as an authentication failure from the service.
#[must_use]
pub fn get_client(api_key: &str) -> Arc<LettaClient> {
    let mut clients = CLIENTS.lock().unwrap_or_else(PoisonError::into_inner);
    clients
        .entry(api_key.to_string())
        .or_insert_with(|| {
            info!("Creating Letta client for a new API key");
            Arc::new(LettaClient::new(api_key))
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_same_instance_for_same_api_key() {
        let first = get_client("registry-test-key");
        let second = get_client("registry-test-key");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn returns_new_instance_for_different_api_key() {
        let a = get_client("registry-test-key-a");
        let b = get_client("registry-test-key-b");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn cached_instance_survives_later_lookups() {
        let first = get_client("registry-test-key-stable");
        let _other = get_client("registry-test-key-unrelated");
        let again = get_client("registry-test-key-stable");
        assert!(Arc::ptr_eq(&first, &again));
    }
}
