use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{mailer::Mailer, store::TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub store: TripStore,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        let store = TripStore::new(db.clone());
        Self {
            config,
            db,
            store,
            mailer,
        }
    }
}
