use crate::models::cafe::{Cafe, NewCafe};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Errors from storage operations whose failure mode callers act on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A cafe named '{0}' already exists")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn cafe_repo(&self) -> repositories::cafe::CafeRepository {
        repositories::cafe::CafeRepository::new(self.conn.clone())
    }

    pub async fn insert_cafe(&self, cafe: NewCafe) -> Result<Cafe, StoreError> {
        self.cafe_repo().insert(cafe).await
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>> {
        self.cafe_repo().list_ordered_by_name().await
    }

    pub async fn get_cafe(&self, id: i32) -> Result<Option<Cafe>> {
        self.cafe_repo().get(id).await
    }

    pub async fn find_cafes_by_location(&self, location: &str) -> Result<Vec<Cafe>> {
        self.cafe_repo().find_by_location(location).await
    }

    pub async fn count_cafes(&self) -> Result<u64> {
        self.cafe_repo().count().await
    }

    pub async fn update_coffee_price(&self, id: i32, coffee_price: Option<String>) -> Result<bool> {
        self.cafe_repo().update_coffee_price(id, coffee_price).await
    }

    pub async fn delete_cafe(&self, id: i32) -> Result<bool> {
        self.cafe_repo().remove(id).await
    }
}
