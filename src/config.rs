use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NUM_RETRIES: &str = "num_retries";
pub const RETRY_DELAY: &str = "retry_delay";

/// Layered plugin configuration as the host passes it to a plugin call.
///
/// Lookups go through the override, repository and plugin layers, in that
/// order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PluginCallConfig {
    pub plugin_config: Map<String, Value>,
    pub repo_plugin_config: Map<String, Value>,
    pub override_config: Map<String, Value>,
}

impl PluginCallConfig {
    pub fn new(
        plugin_config: Map<String, Value>,
        repo_plugin_config: Map<String, Value>,
    ) -> Self {
        Self {
            plugin_config,
            repo_plugin_config,
            override_config: Map::new(),
        }
    }

    pub fn with_repo_value(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.repo_plugin_config
            .insert(key.into(), value.into());
        self
    }

    pub fn with_override(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.override_config
            .insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.override_config
            .get(key)
            .or_else(|| self.repo_plugin_config.get(key))
            .or_else(|| self.plugin_config.get(key))
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn num_retries(&self) -> u64 {
        self.get_u64(NUM_RETRIES).unwrap_or_default()
    }

    /// Delay between retries, configured in seconds
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.get_u64(RETRY_DELAY).unwrap_or_default())
    }
}

/// Configuration with retries disabled and the given repository values
pub fn basic_config<I, K>(repo_values: I) -> PluginCallConfig
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut plugin_config = Map::new();
    plugin_config.insert(NUM_RETRIES.to_owned(), Value::from(0));
    plugin_config.insert(RETRY_DELAY.to_owned(), Value::from(0));

    let repo_plugin_config = repo_values
        .into_iter()
        .map(|(k, v)| (k.into(), v))
        .collect();

    PluginCallConfig::new(plugin_config, repo_plugin_config)
}
