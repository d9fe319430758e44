use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use backend_application::commands::person_commands;
use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, JsonFileStore, WorkbookCodec};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let store = match &runtime_config.data_path {
            Some(path) => Arc::new(JsonFileStore::open(path).await?),
            None => {
                warn!("data_path is empty, inventory is kept in memory only");
                Arc::new(JsonFileStore::in_memory())
            }
        };

        let state = AppState {
            config: runtime_config,
            person_repo: store.clone(),
            record_repo: store,
            codec: Arc::new(WorkbookCodec::new()),
            metrics: Arc::new(Metrics::default()),
        };
        person_commands::seed_default_people(&state).await?;

        Ok(Self { state })
    }
}
