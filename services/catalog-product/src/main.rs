//! catalog-product service - product catalog over gRPC

use std::sync::Arc;

use catalog_product::FILE_DESCRIPTOR_SET;
use catalog_product::api::ProductGrpcService;
use catalog_product::application::ProductCatalog;
use catalog_product::domain::ProductRepository;
use catalog_product::infrastructure::persistence::{
    InMemoryProductRepository, MIGRATOR, PostgresProductRepository,
};
use catalog_product::proto::product_service_server::ProductServiceServer;
use nexus_adapter_postgres::run_migrations;
use nexus_bootstrap::reflection::build_reflection;
use nexus_bootstrap::{Infrastructure, run_server};
use nexus_errors::AppError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure, mut routes| async move {
        info!("Initializing catalog-product service...");

        let repository: Arc<dyn ProductRepository> = match infra.postgres_pool() {
            Some(pool) => {
                let migrate = infra
                    .config()
                    .database
                    .as_ref()
                    .is_some_and(|db| db.run_migrations);
                if migrate {
                    run_migrations(&pool, &MIGRATOR).await?;
                }
                info!("Using PostgreSQL product repository");
                Arc::new(PostgresProductRepository::new(pool))
            }
            None => {
                info!("Using in-memory product repository");
                Arc::new(InMemoryProductRepository::new())
            }
        };

        let catalog = Arc::new(ProductCatalog::new(repository));
        let service = ProductGrpcService::new(catalog);

        let reflection = build_reflection(&[FILE_DESCRIPTOR_SET])
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        routes
            .add_service(ProductServiceServer::new(service))
            .add_service(reflection);
        Ok(routes)
    })
    .await
}
