//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use shopdash_types::Product;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        // Run migrations (inline for simplicity)
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                user_id TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Liveness probe used by `/db/health`.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }

    pub async fn insert_product(&self, name: &str, price: f64, user_id: &str) -> Result<Product> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, user_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(price)
        .bind(user_id)
        .execute(&*self.pool)
        .await?;

        // Read the row back so server-assigned timestamps are populated
        let row: ProductRow = sqlx::query_as(
            r#"
            SELECT id, name, price, user_id, created_at, updated_at
            FROM products WHERE id = ?1
            "#,
        )
        .bind(&id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, user_id, created_at, updated_at
            FROM products WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, user_id, created_at, updated_at
            FROM products ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Full-row update; returns the stored product or `None` if no row matched.
    pub async fn update_product(
        &self,
        id: &str,
        name: &str,
        price: f64,
        user_id: &str,
    ) -> Result<Option<Product>> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?1, price = ?2, user_id = ?3, updated_at = datetime('now')
            WHERE id = ?4
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(user_id)
        .bind(id)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_product(id).await
    }

    /// Returns true if a row was deleted.
    pub async fn delete_product(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM products WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
    user_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            price: r.price,
            user_id: r.user_id,
            created_at: Some(r.created_at),
            updated_at: Some(r.updated_at),
            extra: serde_json::Map::new(),
        }
    }
}
