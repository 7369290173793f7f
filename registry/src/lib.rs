use std::sync::Arc;

use adapter::{
    catalog::CatalogApiClient,
    database::ConnectionPool,
    repository::{
        author::AuthorRepositoryImpl, book::BookRepositoryImpl, health::HealthCheckRepositoryImpl,
    },
};
use kernel::{
    client::catalog::CatalogClient,
    repository::{author::AuthorRepository, book::BookRepository, health::HealthCheckRepository},
    service::catalog::CatalogService,
};
use shared::config::AppConfig;

// DI コンテナ。起動時に一度だけ組み立て、State 経由で handler に配る
#[derive(Clone)]
pub struct AppRegistry {
    catalog_service: CatalogService,
    book_repository: Arc<dyn BookRepository>,
    health_check_repository: Arc<dyn HealthCheckRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let book_repository: Arc<dyn BookRepository> =
            Arc::new(BookRepositoryImpl::new(pool.clone()));
        let author_repository: Arc<dyn AuthorRepository> =
            Arc::new(AuthorRepositoryImpl::new(pool.clone()));
        let catalog_client: Arc<dyn CatalogClient> =
            Arc::new(CatalogApiClient::new(&app_config.catalog));
        let health_check_repository: Arc<dyn HealthCheckRepository> =
            Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));

        let catalog_service =
            CatalogService::new(book_repository.clone(), author_repository, catalog_client);

        Self {
            catalog_service,
            book_repository,
            health_check_repository,
        }
    }

    // テストから任意の実装を差し込むためのコンストラクタ
    pub fn from_parts(
        catalog_service: CatalogService,
        book_repository: Arc<dyn BookRepository>,
        health_check_repository: Arc<dyn HealthCheckRepository>,
    ) -> Self {
        Self {
            catalog_service,
            book_repository,
            health_check_repository,
        }
    }

    pub fn catalog_service(&self) -> &CatalogService {
        &self.catalog_service
    }

    pub fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repository.clone()
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }
}
