use lettamem_core::{KeyValueStore, SETTINGS_KEY, Settings, SettingsPatch};
use serde_json::Value;
use tracing::{info, warn};

/// Persists and defaults the user settings profile.
///
/// The whole record lives under the single [`SETTINGS_KEY`] entry of the
/// wrapped store. Reads never fail: an absent, unreadable or corrupt
/// record is equivalent to "all defaults". Writes propagate their errors
/// so a dropped settings change is never silent.
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying key-value store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read the effective settings.
    ///
    /// Persisted field values override defaults; missing fields fall back
    /// to defaults. The result is always fully populated.
    pub async fn get(&self) -> Settings {
        match self.store.get(SETTINGS_KEY).await {
            Ok(Some(stored)) => merge_with_defaults(&stored),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Failed to read persisted settings, using defaults: {e}");
                Settings::default()
            }
        }
    }

    /// Apply a partial update over the current effective settings and
    /// persist the merged record.
    ///
    /// Fields not named by the patch are retained verbatim. Concurrent
    /// overlapping saves are not synchronized; the persistence layer's
    /// last write wins.
    pub async fn save(&self, patch: SettingsPatch) -> anyhow::Result<Settings> {
        let mut settings = self.get().await;
        patch.apply(&mut settings);
        self.persist(&settings).await?;
        info!("Saved settings");
        Ok(settings)
    }

    /// Overwrite the persisted record with exactly the default record.
    /// A full replace, not a merge.
    pub async fn reset(&self) -> anyhow::Result<Settings> {
        let defaults = Settings::default();
        self.persist(&defaults).await?;
        info!("Reset settings to defaults");
        Ok(defaults)
    }

    async fn persist(&self, settings: &Settings) -> anyhow::Result<()> {
        let value = serde_json::to_value(settings)?;
        self.store.set(SETTINGS_KEY, value).await
    }
}

/// Shallow field-wise merge of a persisted record over the defaults.
///
/// `null` fields count as missing. A record that does not deserialize as
/// a settings object at all yields the defaults unchanged.
fn merge_with_defaults(stored: &Value) -> Settings {
    let defaults = Settings::default();

    let Some(stored_map) = stored.as_object() else {
        warn!("Persisted settings record is not an object, using defaults");
        return defaults;
    };

    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults,
    };

    for (key, value) in stored_map {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!("Persisted settings record is malformed, using defaults: {e}");
        Settings::default()
    })
}
