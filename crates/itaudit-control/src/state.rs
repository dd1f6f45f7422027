use std::sync::Arc;

use itaudit_db::sea_orm::DatabaseConnection;

use crate::config::ControlConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<ControlConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: ControlConfig) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}
