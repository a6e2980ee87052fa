use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analyzer::DEFAULT_MAX_LENGTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Longest accepted value, in codepoints
    pub max_value_length: usize,
    /// Where the in-memory store persists its records (None = not persisted)
    pub data_dir: Option<PathBuf>,
    /// Hosted table store configuration
    pub store: StoreConfig,
}

/// Configuration for the hosted PostgREST-style table store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. "https://xyz.supabase.co".
    /// If None, the in-memory store is used instead.
    pub base_url: Option<String>,
    /// Server-side key sent as both `apikey` and bearer token.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Table holding analyzed strings.
    pub table: String,
    /// Request timeout in seconds (capped at 30).
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            table: "strings".to_string(),
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Both the URL and the key are present.
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_value_length: DEFAULT_MAX_LENGTH,
            data_dir: None,
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = get("STRINGS_API_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(val) = get("STRINGS_API_MAX_VALUE_LENGTH").or_else(|| get("MAX_STRING_LENGTH"))
        {
            if let Ok(v) = val.trim().parse() {
                config.max_value_length = v;
            }
        }
        if let Some(dir) = get("STRINGS_API_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        // Store config
        if let Some(url) = get("SUPABASE_URL").filter(|v| !v.is_empty()) {
            config.store.base_url = Some(url);
        }
        if let Some(key) = get("SUPABASE_SERVICE_ROLE_KEY").filter(|v| !v.is_empty()) {
            config.store.api_key = Some(key);
        }
        if let Some(table) = get("STRINGS_API_TABLE") {
            config.store.table = table;
        }
        if let Some(val) = get("STRINGS_API_STORE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.store.timeout_secs = v.min(30); // Cap at 30s
            }
        }

        config
    }
}
