//! Database module providing connection management, migrations, and queries.
//!
//! Query functions are generic over [`sea_orm::ConnectionTrait`] so the same code runs
//! against the pool or inside a transaction opened with [`Store::begin`].

pub mod pull_requests;
pub mod reviewers;
pub mod teams;
pub mod users;

use std::future::Future;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr,
    TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, DatabaseSettings, WriteMode};
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Process-wide connection pool.
///
/// Created once at startup, pinged before use, closed on shutdown. Cloning is
/// cheap and shares the same underlying pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database).await
    }

    /// Open a pool with explicit settings and verify it answers a ping.
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(settings.url.clone());
        opts.max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(settings.connect_timeout)
            .acquire_timeout(settings.connect_timeout)
            .sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        let pool = DbPool { conn };
        if let Err(e) = pool.ping().await {
            pool.close().await.ok();
            return Err(e);
        }

        info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "Database pool ready"
        );
        Ok(pool)
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Health check round-trip.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn
            .ping()
            .await
            .map_err(|e| AppError::Database(format!("Database ping failed: {}", e)))
    }

    /// Open a transaction. Dropping it without commit rolls back.
    pub async fn begin(&self) -> AppResult<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    /// Apply all pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(self) -> AppResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Point in time after which a workflow call gives up.
///
/// Built by the request boundary; every persistence call made on behalf of the
/// request is bounded by whichever is shorter: the per-call timeout or the time
/// left before the deadline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}

/// Persistence facade handed to the workflows.
///
/// Wraps the pool with the per-call timeout and the configured write mode.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
    query_timeout: Duration,
    write_mode: WriteMode,
}

impl Store {
    pub fn new(pool: DbPool, query_timeout: Duration, write_mode: WriteMode) -> Self {
        Self {
            pool,
            query_timeout,
            write_mode,
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        self.pool.connection()
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Run one persistence call under the time budget.
    pub async fn call<T, F>(&self, deadline: Deadline, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let budget = self.query_timeout.min(deadline.remaining());
        match tokio::time::timeout(budget, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(budget_ms = %budget.as_millis(), "Database call timed out");
                Err(AppError::Timeout)
            }
        }
    }

    /// Open a transaction under the time budget.
    pub async fn begin(&self, deadline: Deadline) -> AppResult<DatabaseTransaction> {
        self.call(deadline, self.pool.begin()).await
    }

    pub async fn commit(&self, deadline: Deadline, txn: DatabaseTransaction) -> AppResult<()> {
        self.call(deadline, async move { txn.commit().await.map_err(AppError::from) })
            .await
    }
}

/// Parse a textual id. Anything that is not a UUID cannot name a stored row.
pub fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
