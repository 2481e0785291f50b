use std::sync::Arc;

use crate::auth::JwtAuthority;
use crate::config::Settings;
use crate::service::CatalogService;
use crate::store::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub jwt: Arc<JwtAuthority>,
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<dyn EntityStore>) -> Self {
        let jwt = Arc::new(JwtAuthority::new(&settings.jwt));
        let catalog = Arc::new(CatalogService::new(store));

        Self {
            settings: Arc::new(settings),
            jwt,
            catalog,
        }
    }
}
