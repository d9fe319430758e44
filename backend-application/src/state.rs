use std::sync::Arc;

use backend_domain::ports::{PersonRepository, RecordRepository, SpreadsheetCodec};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub person_repo: Arc<dyn PersonRepository>,
    pub record_repo: Arc<dyn RecordRepository>,
    pub codec: Arc<dyn SpreadsheetCodec>,
    pub metrics: Arc<Metrics>,
}
