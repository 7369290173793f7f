use std::env;

const OPENLIBRARY_SEARCH_BASE_URL: &str = "https://openlibrary.org";
const OPENLIBRARY_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub catalog: CatalogApiConfig,
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let catalog = CatalogApiConfig {
            search_base_url: env::var("CATALOG_SEARCH_BASE_URL")
                .unwrap_or_else(|_| OPENLIBRARY_SEARCH_BASE_URL.to_string()),
            covers_base_url: env::var("CATALOG_COVERS_BASE_URL")
                .unwrap_or_else(|_| OPENLIBRARY_COVERS_BASE_URL.to_string()),
        };
        Ok(Self { database, catalog })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct CatalogApiConfig {
    pub search_base_url: String,
    pub covers_base_url: String,
}
