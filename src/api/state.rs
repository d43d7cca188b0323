use std::sync::Arc;

use crate::config::AppConfig;
use crate::source::DataSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, config: AppConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }
}
