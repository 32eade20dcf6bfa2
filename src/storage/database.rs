//! SQLite Database
//!
//! Embedded report storage using rusqlite with r2d2 connection pooling.
//! Implements the `ReportStore` contract from mirror-core.

use async_trait::async_trait;
use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use mirror_core::{Profile, Report, ReportStore, StoreError, StoreResult};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database. Useful for integration and unit tests.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create a new database instance with connection pooling
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS reports (
                short_code TEXT PRIMARY KEY,
                profile TEXT NOT NULL,
                generated_text TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(())
    }

    /// Check if the database is reachable
    pub fn is_healthy(&self) -> bool {
        self.pool
            .get()
            .map(|conn| conn.query_row("SELECT 1", [], |_| Ok(())).is_ok())
            .unwrap_or(false)
    }

    fn conn(&self) -> StoreResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| StoreError::Backend(format!("Failed to get connection: {}", e)))
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl ReportStore for Database {
    async fn create(&self, short_code: &str, profile: &Profile) -> StoreResult<Report> {
        let conn = self.conn()?;

        let profile_json = serde_json::to_string(profile)
            .map_err(|e| StoreError::Backend(format!("Failed to serialize profile: {}", e)))?;
        let created_at = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO reports (short_code, profile, generated_text, created_at)
             VALUES (?1, ?2, '', ?3)",
            params![short_code, profile_json, created_at],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                StoreError::DuplicateShortCode(short_code.to_string())
            } else {
                StoreError::Backend(e.to_string())
            }
        })?;

        Ok(Report {
            short_code: short_code.to_string(),
            profile: profile.clone(),
            generated_text: String::new(),
            created_at,
        })
    }

    async fn update_text(&self, short_code: &str, generated_text: &str) -> StoreResult<()> {
        let conn = self.conn()?;

        let affected = conn
            .execute(
                "UPDATE reports SET generated_text = ?1 WHERE short_code = ?2",
                params![generated_text, short_code],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(short_code.to_string()));
        }
        Ok(())
    }

    async fn get(&self, short_code: &str) -> StoreResult<Report> {
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT short_code, profile, generated_text, created_at
                 FROM reports WHERE short_code = ?1",
                params![short_code],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let (short_code, profile_json, generated_text, created_at) =
            row.ok_or_else(|| StoreError::NotFound(short_code.to_string()))?;

        let profile: Profile = serde_json::from_str(&profile_json)
            .map_err(|e| StoreError::Backend(format!("Failed to parse stored profile: {}", e)))?;

        Ok(Report {
            short_code,
            profile,
            generated_text,
            created_at,
        })
    }
}
