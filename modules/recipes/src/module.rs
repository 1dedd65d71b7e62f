use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::RecipesConfig;
use crate::contract::client::RecipesApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::RecipesLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmRepository;

/// Recipes module: wires the SeaORM repository into the domain service and
/// hands out the REST router and the in-process client.
#[derive(Clone)]
pub struct RecipesModule {
    service: Arc<Service>,
}

impl RecipesModule {
    pub fn new(conn: DatabaseConnection, cfg: &RecipesConfig) -> Self {
        info!("Initializing recipes module");
        debug!(
            "Loaded recipes config: default_page_size={}, max_page_size={}, media_url={}",
            cfg.default_page_size, cfg.max_page_size, cfg.media_url
        );

        // Wire repository (infra) to domain service (ports)
        let repo = Arc::new(SeaOrmRepository::new(conn));
        let service = Service::with_repository(repo, ServiceConfig::from(cfg));
        Self {
            service: Arc::new(service),
        }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running recipes database migrations");
        Migrator::up(conn, None).await?;
        info!("Recipes database migrations completed successfully");
        Ok(())
    }

    /// REST routes with the service attached.
    pub fn router(&self) -> axum::Router {
        info!("Registering recipes REST routes");
        routes::register_routes(axum::Router::new(), self.service.clone())
    }

    /// Local in-process client.
    pub fn client(&self) -> Arc<dyn RecipesApi> {
        Arc::new(RecipesLocalClient::new(self.service.clone()))
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }
}
