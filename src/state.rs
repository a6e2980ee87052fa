use std::sync::Arc;

use crate::analyzer::StringAnalyzer;
use crate::config::Config;
use crate::filters::natural_language::FilterParser;
use crate::store::memory::MemoryStore;
use crate::store::rest::RestTableStore;
use crate::store::RecordStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: StringAnalyzer,
    pub parser: Arc<FilterParser>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Pick the store from `config`: the hosted table when credentials are
    /// present, otherwise the in-memory store.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = if config.store.is_remote() {
            let http_client = reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()?;
            Arc::new(RestTableStore::new(http_client, &config.store)?)
        } else {
            tracing::warn!(
                "SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY not set; using the in-memory store"
            );
            match &config.data_dir {
                Some(dir) => Arc::new(MemoryStore::open_or_create(dir)?),
                None => Arc::new(MemoryStore::new()),
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// State over an explicit store.
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        Self {
            analyzer: StringAnalyzer::new(config.max_value_length),
            parser: Arc::new(FilterParser::new()),
            config,
            store,
        }
    }
}
