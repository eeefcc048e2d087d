use std::sync::Arc;

use crate::{config::Config, db::TitleStore, services::Seeder};

/// Shared application state
///
/// `store` is `None` when no database is configured or the connection could
/// not be established at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn TitleStore>>,
    pub seeder: Arc<Seeder>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn TitleStore>>) -> Self {
        Self {
            store,
            seeder: Arc::new(Seeder::new()),
            config: Arc::new(config),
        }
    }

    /// Borrowed view of the store for service calls
    pub fn store(&self) -> Option<&dyn TitleStore> {
        self.store.as_deref()
    }
}
